//! Delivery zone quoting service library.

pub mod addresses;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod matching;
pub mod observability;
pub mod quoting;
pub mod zones;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use matching::Matcher;
pub use quoting::QuoteEngine;
pub use zones::ZoneCatalog;
