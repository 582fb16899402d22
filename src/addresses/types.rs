//! Address lookup types and error definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored customer address, owned by the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Opaque address identifier.
    pub id: String,
    /// Opaque identifier of the owning user.
    pub owner_id: String,
    /// Free-text address as entered by the customer.
    pub text: String,
}

/// Errors raised by an address lookup backend.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Seed file could not be read.
    #[error("failed to read address seed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed file is not a JSON array of addresses.
    #[error("invalid address seed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend could not answer (store down, timeout).
    #[error("address lookup unavailable: {0}")]
    Unavailable(String),
}

/// Result type for address lookups.
pub type AddressResult<T> = Result<T, AddressError>;
