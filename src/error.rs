//! Startup failures of the host binary.

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("failed to bind: {0}")]
    Bind(std::io::Error),
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}
