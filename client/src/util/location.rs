//! Full-page navigation to other origins (Google sign-in, classroom consent).

/// Send the browser to `url`. Returns `false` if the browser refused, or when
/// running outside a browser.
#[cfg(feature = "hydrate")]
pub fn open_external(url: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    match window.location().set_href(url) {
        Ok(()) => true,
        Err(e) => {
            leptos::logging::warn!("navigation to {url} failed: {e:?}");
            false
        }
    }
}

#[cfg(not(feature = "hydrate"))]
pub fn open_external(_url: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_render_cannot_leave_the_page() {
        assert!(!open_external("https://accounts.google.com/"));
    }
}
