//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, owner identity)
//!     → quote.rs (estimate / confirm) or status.rs (health, zones)
//!     → response.rs (error → status code + JSON body)
//!     → Send to client
//! ```

pub mod quote;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use request::{UuidRequestId, X_OWNER_ID, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
