use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    /// Missing or unusable service configuration (credentials, endpoints).
    /// Fatal for the calling operation, never retried.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Malformed input rejected at the boundary before any side effects.
    #[error("validation error: {0}")]
    Validation(String),
    /// A state transition attempted against a record that is no longer in
    /// the required state.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Network/HTTP failure talking to the payment provider. Surfaces to the
    /// caller as-is; there is no automatic retry in the payment path.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store error: {0}")]
    Store(String),
}
