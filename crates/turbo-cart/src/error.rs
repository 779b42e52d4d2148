//! Cart page error types.

use thiserror::Error;
use turbo_data::FetchError;

/// Errors raised while wiring or running cart page interactions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartUiError {
    /// A required element is not on the page.
    #[error("Element not found: {0}")]
    MissingElement(String),

    /// An element exists but is not the expected kind.
    #[error("Element {selector} is not of type {expected}")]
    WrongElementType { selector: String, expected: String },

    /// No handler is registered under this action name.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// An action was triggered without a parameter it needs.
    #[error("Action {action} is missing parameter {param}")]
    MissingParam { action: String, param: String },

    /// An action parameter could not be interpreted.
    #[error("Invalid value for {param}: {value:?}")]
    InvalidParam { param: String, value: String },

    /// Product identifier unusable in an endpoint path.
    #[error("Invalid product id: {0:?}")]
    InvalidProductId(String),

    /// Configuration rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Outbound request could not be built or sent.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A DOM operation failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CartUiError {
    fn from(e: serde_json::Error) -> Self {
        CartUiError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CartUiError {
    fn from(e: toml::de::Error) -> Self {
        CartUiError::InvalidConfig(e.to_string())
    }
}
