//! Quote and confirmation types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::addresses::AddressError;
use crate::matching::{MatchedBy, NoMatchResult};

/// A price the server has recomputed and agreed to honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedPrice {
    pub address_id: String,
    pub confirmed_price: i64,
    pub zone_id: i64,
    pub zone_name: String,
    pub matched_by: MatchedBy,
    pub confidence: f64,
}

/// Errors returned by the quote/confirm protocol.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Address does not exist or belongs to another owner.
    #[error("address {address_id} not found")]
    AddressNotFound { address_id: String },

    /// No zone matched at confirmation time.
    #[error("no delivery zone matched the address")]
    NoZone(NoMatchResult),

    /// Client price differs from the recomputed price.
    #[error("price conflict: client sent {client_price}, server computed {server_price}")]
    PriceConflict { client_price: i64, server_price: i64 },

    /// The address lookup backend failed.
    #[error(transparent)]
    Lookup(#[from] AddressError),
}

/// Result type for quoting operations.
pub type QuoteResult<T> = Result<T, QuoteError>;
