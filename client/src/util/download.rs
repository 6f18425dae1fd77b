//! Browser file plumbing: saving bytes as downloads and reading picked files.
//!
//! SYSTEM CONTEXT
//! ==============
//! Exports (Excel and CSV from `util::export`, PDF from the backend) are
//! handed to the browser through a Blob object URL and a temporary anchor. Uploads go the
//! other way: a picked `File` is read into memory so the request layer can
//! send it as multipart without holding web-sys handles.

use leptos::prelude::*;

use crate::net::request::FilePart;

pub const PDF_MIME: &str = "application/pdf";

/// Wrap raw bytes in a typed `Blob`.
#[cfg(feature = "hydrate")]
pub fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<web_sys::Blob, wasm_bindgen::JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// Offer `bytes` to the user as a file named `file_name`.
///
/// Returns `false` when the browser refused (or outside the browser).
#[cfg(feature = "hydrate")]
pub fn download_bytes(file_name: &str, mime: &str, bytes: &[u8]) -> bool {
    use wasm_bindgen::JsCast;

    let Ok(blob) = bytes_to_blob(bytes, mime) else {
        return false;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return false;
    };
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return false;
    };
    let Some(anchor) = document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok())
    else {
        return false;
    };
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    if let Err(e) = web_sys::Url::revoke_object_url(&url) {
        leptos::logging::warn!("object URL not revoked: {e:?}");
    }
    true
}

#[cfg(not(feature = "hydrate"))]
pub fn download_bytes(_file_name: &str, _mime: &str, _bytes: &[u8]) -> bool {
    false
}

/// Read the first file picked in an `<input type="file">` into `target`.
#[cfg(feature = "hydrate")]
pub fn on_file_selected(ev: &leptos::ev::Event, target: RwSignal<Option<FilePart>>) {
    use wasm_bindgen::JsCast;

    let Some(file) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
    else {
        target.set(None);
        return;
    };
    leptos::task::spawn_local(async move {
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await;
        match buffer {
            Ok(buffer) => {
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                target.set(Some(FilePart { file_name: file.name(), content_type: file.type_(), bytes }));
            }
            Err(e) => {
                leptos::logging::warn!("file read failed: {e:?}");
                target.set(None);
            }
        }
    });
}

#[cfg(not(feature = "hydrate"))]
pub fn on_file_selected(_ev: &leptos::ev::Event, target: RwSignal<Option<FilePart>>) {
    target.set(None);
}
