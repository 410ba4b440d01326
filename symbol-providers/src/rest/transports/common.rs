use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An error body returned by a Symbol REST gateway.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Error)]
pub struct NodeError {
    /// The machine readable error code, e.g. `ResourceNotFound`
    pub code: String,
    /// The human readable description
    pub message: String,
}

impl NodeError {
    /// Whether the node reported the requested resource as missing.
    ///
    /// Queries for state an account simply does not have (multisig settings,
    /// restriction entries) come back as this rather than as an empty object.
    pub fn is_not_found(&self) -> bool {
        self.code == "ResourceNotFound"
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(code: {}, message: {})", self.code, self.message)
    }
}
