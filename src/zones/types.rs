//! Zone catalog types and error definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A zone record as it appears in the catalog file.
///
/// Field names follow the catalog wire format (`zoneId`, `price`, `locations`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// Zone identifier.
    pub zone_id: i64,
    /// Flat delivery price in minor currency units.
    pub price: i64,
    /// Keyword/location strings identifying the zone, in priority order.
    pub locations: Vec<String>,
    /// Optional display name. Defaults to `Zone {zone_id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A zone keyword with its normalized form computed once at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    /// Keyword exactly as written in the catalog.
    pub raw: String,
    /// Normalized form used for every comparison.
    pub normalized: String,
    /// Length of `normalized` in characters.
    pub len: usize,
}

/// A priced delivery zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub keywords: Vec<Keyword>,
}

/// Errors raised while loading or validating a zone catalog.
///
/// Every variant is fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read zone catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON catalog did not parse.
    #[error("invalid JSON zone catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML catalog did not parse.
    #[error("invalid TOML zone catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither `.json` nor `.toml`.
    #[error("unsupported zone catalog format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Two records share a zone identifier.
    #[error("duplicate zone id {0}")]
    DuplicateZone(i64),

    /// Prices must be positive minor units.
    #[error("zone {zone_id} has non-positive price {price}")]
    NonPositivePrice { zone_id: i64, price: i64 },

    /// A zone must be recognizable by at least one location.
    #[error("zone {0} has no locations")]
    NoLocations(i64),

    /// A location that normalizes to nothing would match every address.
    #[error("zone {zone_id} location {location:?} is empty after normalization")]
    EmptyLocation { zone_id: i64, location: String },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
