//! Quote/confirm protocol.

pub mod engine;
pub mod types;

pub use engine::QuoteEngine;
pub use types::{ConfirmedPrice, QuoteError, QuoteResult};
