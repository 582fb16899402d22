//! In-memory address book.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use futures_util::future::{self, BoxFuture, FutureExt};

use crate::addresses::types::{Address, AddressError, AddressResult};
use crate::addresses::AddressLookup;

/// A thread-safe address store keyed by address id.
///
/// Reference implementation of [`AddressLookup`]; a database-backed store
/// would implement the same trait.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressBook {
    inner: Arc<DashMap<String, Address>>,
}

impl InMemoryAddressBook {
    /// Create an empty address book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of addresses.
    pub fn load_from_file(path: &Path) -> AddressResult<Self> {
        let file = File::open(path).map_err(|source| AddressError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let addresses: Vec<Address> = serde_json::from_reader(BufReader::new(file))?;

        let book = Self::new();
        for address in addresses {
            book.insert(address);
        }
        tracing::info!(path = %path.display(), addresses = book.len(), "Loaded address seed");
        Ok(book)
    }

    /// Insert or replace an address.
    pub fn insert(&self, address: Address) {
        self.inner.insert(address.id.clone(), address);
    }

    /// Fetch an address only if it belongs to `owner_id`.
    pub fn get(&self, owner_id: &str, address_id: &str) -> Option<Address> {
        self.inner
            .get(address_id)
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Address> for InMemoryAddressBook {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        let book = Self::new();
        for address in iter {
            book.insert(address);
        }
        book
    }
}

impl AddressLookup for InMemoryAddressBook {
    fn find<'a>(
        &'a self,
        owner_id: &'a str,
        address_id: &'a str,
    ) -> BoxFuture<'a, AddressResult<Option<Address>>> {
        future::ready(Ok(self.get(owner_id, address_id))).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn address(id: &str, owner: &str, text: &str) -> Address {
        Address {
            id: id.to_string(),
            owner_id: owner.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_owner_scoping() {
        let book: InMemoryAddressBook =
            [address("a1", "u1", "House 3, Lagos Island")].into_iter().collect();

        assert_eq!(book.get("u1", "a1").unwrap().text, "House 3, Lagos Island");
        assert!(book.get("u2", "a1").is_none());
        assert!(book.get("u1", "missing").is_none());
        assert_eq!(book.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_trait() {
        let book = InMemoryAddressBook::new();
        book.insert(address("a1", "u1", "Yaba"));

        let found = book.find("u1", "a1").await.unwrap();
        assert_eq!(found.map(|a| a.text).as_deref(), Some("Yaba"));
        assert!(book.find("u2", "a1").await.unwrap().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a1", "ownerId": "u1", "text": "Ikoyi"}}, {{"id": "a2", "ownerId": "u2", "text": "Yaba"}}]"#
        )
        .unwrap();

        let book = InMemoryAddressBook::load_from_file(file.path()).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.get("u2", "a2").unwrap().text, "Yaba");

        let missing = InMemoryAddressBook::load_from_file(Path::new("/nonexistent/addresses.json"));
        assert!(matches!(missing, Err(AddressError::Io { .. })));
    }
}
