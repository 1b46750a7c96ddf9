/// Shared error type used across all session-logger crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Credential mismatch on a protected operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("session not found: {0}")]
    NotFound(String),

    /// Persisted state could not be read or written.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("config: {0}")]
    Config(String),
}

impl Error {
    /// Machine-readable error kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Unauthorized(_) => "unauthorized",
            Error::NotFound(_) => "not_found",
            Error::StoreUnavailable(_) => "store_unavailable",
            Error::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
