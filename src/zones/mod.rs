//! Zone catalog subsystem.
//!
//! # Data Flow
//! ```text
//! catalog file (JSON array / TOML [[zones]])
//!     → catalog.rs (parse, validate, normalize keywords)
//!     → ZoneCatalog (immutable, ordered)
//!     → owned by a Matcher, shared via Arc
//!
//! With catalog.watch enabled:
//!     watcher.rs detects change
//!     → catalog.rs loads and validates the new file
//!     → new Matcher swapped into the QuoteEngine atomically
//! ```
//!
//! # Design Decisions
//! - Load failures are fatal at startup, logged and ignored on reload
//! - File order is preserved; it is the matcher's final tie-break
//! - Keywords are normalized once at load

pub mod catalog;
pub mod types;
pub mod watcher;

pub use catalog::{load_catalog, parse_catalog, CatalogFormat, ZoneCatalog};
pub use types::{CatalogError, CatalogResult, Keyword, Zone, ZoneRecord};
pub use watcher::CatalogWatcher;
