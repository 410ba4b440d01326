use std::{error::Error, fmt::Debug};
use thiserror::Error;

use crate::NodeError;

/// A `RestError` is an abstraction over error types returned by a
/// [`crate::RestClient`].
///
/// All clients can return [`NodeError`] responses, as well as serde
/// deserialization errors. However, because client errors are typically
/// type-erased via the [`ProviderError`], the error info can be difficult to
/// access. This trait provides convenient access to the underlying error
/// types.
pub trait RestError: Error + Debug + Send + Sync {
    /// Access an underlying error body returned by the node (if any)
    ///
    /// Attempts to access an underlying [`NodeError`]. If the underlying
    /// error is not an error response from the node, this function will
    /// return `None`.
    fn as_error_response(&self) -> Option<&NodeError>;

    /// Returns `true` if the underlying error is an error response from the
    /// node
    fn is_error_response(&self) -> bool {
        self.as_error_response().is_some()
    }

    /// Access an underlying `serde_json` error (if any)
    ///
    /// Attempts to access an underlying [`serde_json::Error`]. If the
    /// underlying error is not a serde_json error, this function will return
    /// `None`.
    fn as_serde_error(&self) -> Option<&serde_json::Error>;

    /// Returns `true` if the underlying error is a serde_json
    /// (de)serialization error
    fn is_serde_error(&self) -> bool {
        self.as_serde_error().is_some()
    }
}

#[derive(Debug, Error)]
/// An error thrown when making a call to the provider
pub enum ProviderError {
    /// An internal error in the REST client
    #[error("{0}")]
    RestClientError(Box<dyn RestError + Send + Sync>),

    /// An error during namespace alias resolution
    #[error("alias not found: {0}")]
    AliasNotFound(String),

    /// Error in underlying lib `serde_json`
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// Error in underlying lib `hex`
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),

    /// Error in underlying lib `reqwest`
    #[error(transparent)]
    HTTPError(#[from] reqwest::Error),

    /// Custom error from unknown source
    #[error("custom error: {0}")]
    CustomError(String),
}

impl RestError for ProviderError {
    fn as_error_response(&self) -> Option<&NodeError> {
        if let ProviderError::RestClientError(err) = self {
            err.as_error_response()
        } else {
            None
        }
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            ProviderError::RestClientError(e) => e.as_serde_error(),
            ProviderError::SerdeJson(e) => Some(e),
            _ => None,
        }
    }
}
