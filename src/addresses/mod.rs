//! Address lookup collaborator.
//!
//! The quoting engine never owns addresses; it resolves them through
//! [`AddressLookup`] by owner and address id.

pub mod memory;
pub mod types;

use futures_util::future::BoxFuture;

pub use memory::InMemoryAddressBook;
pub use types::{Address, AddressError, AddressResult};

/// Resolves a stored address by owner and address identifier.
pub trait AddressLookup: Send + Sync {
    /// Returns `Ok(None)` when the address does not exist or belongs to
    /// another owner. `Err` is reserved for backend failures.
    fn find<'a>(
        &'a self,
        owner_id: &'a str,
        address_id: &'a str,
    ) -> BoxFuture<'a, AddressResult<Option<Address>>>;
}
