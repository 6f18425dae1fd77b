//! Host error type.

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A required environment variable is not set.
    #[error("missing config: env var {var} not set")]
    MissingVar { var: &'static str },

    /// An environment variable is set but cannot be used.
    #[error("invalid config: {var}={value:?} ({reason})")]
    InvalidVar { var: &'static str, value: String, reason: &'static str },

    /// Leptos site options could not be loaded.
    #[error("leptos configuration: {0}")]
    Leptos(String),

    /// The outbound HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },

    #[error("server failed: {0}")]
    Serve(std::io::Error),
}
