//! Immutable zone catalog and its file loader.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::matching::normalize;
use crate::zones::types::{CatalogError, CatalogResult, Keyword, Zone, ZoneRecord};

/// TOML catalogs wrap the records in `[[zones]]` tables.
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    zones: Vec<ZoneRecord>,
}

/// The ordered list of zones known to the service.
///
/// Never mutated after construction. Iteration order is the order of the
/// source records and serves as the final tie-break during matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneCatalog {
    zones: Vec<Zone>,
}

impl ZoneCatalog {
    /// Catalog with no zones. Every address falls through to no-match.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from records, validating and normalizing keywords.
    pub fn from_records(records: Vec<ZoneRecord>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut zones = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.zone_id) {
                return Err(CatalogError::DuplicateZone(record.zone_id));
            }
            if record.price <= 0 {
                return Err(CatalogError::NonPositivePrice {
                    zone_id: record.zone_id,
                    price: record.price,
                });
            }
            if record.locations.is_empty() {
                return Err(CatalogError::NoLocations(record.zone_id));
            }

            let mut keywords = Vec::with_capacity(record.locations.len());
            for location in record.locations {
                let normalized = normalize(&location);
                if normalized.is_empty() {
                    return Err(CatalogError::EmptyLocation {
                        zone_id: record.zone_id,
                        location,
                    });
                }
                keywords.push(Keyword {
                    len: normalized.chars().count(),
                    raw: location,
                    normalized,
                });
            }

            zones.push(Zone {
                name: record
                    .name
                    .unwrap_or_else(|| format!("Zone {}", record.zone_id)),
                id: record.zone_id,
                price: record.price,
                keywords,
            });
        }

        Ok(Self { zones })
    }

    /// Zones in catalog order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Total number of keywords across all zones.
    pub fn keyword_count(&self) -> usize {
        self.zones.iter().map(|z| z.keywords.len()).sum()
    }

    /// Back to wire records, e.g. for listing zones over the API.
    pub fn records(&self) -> Vec<ZoneRecord> {
        self.zones
            .iter()
            .map(|zone| ZoneRecord {
                zone_id: zone.id,
                price: zone.price,
                locations: zone.keywords.iter().map(|k| k.raw.clone()).collect(),
                name: Some(zone.name.clone()),
            })
            .collect()
    }
}

/// Parse catalog records from a string in the given format.
pub fn parse_catalog(content: &str, format: CatalogFormat) -> CatalogResult<ZoneCatalog> {
    let records = match format {
        CatalogFormat::Json => serde_json::from_str::<Vec<ZoneRecord>>(content)?,
        CatalogFormat::Toml => toml::from_str::<TomlCatalog>(content)?.zones,
    };
    ZoneCatalog::from_records(records)
}

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Load and validate a zone catalog from disk.
pub fn load_catalog(path: &Path) -> CatalogResult<ZoneCatalog> {
    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&content, format)?;
    tracing::info!(
        path = %path.display(),
        zones = catalog.len(),
        keywords = catalog.keyword_count(),
        "Zone catalog loaded"
    );
    Ok(catalog)
}
