//! Estimate and confirm delivery prices for stored addresses.

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;

use crate::addresses::AddressLookup;
use crate::matching::{MatchOutcome, Matcher};
use crate::observability::metrics;
use crate::quoting::types::{ConfirmedPrice, QuoteError, QuoteResult};

/// Engine behind the quote/confirm protocol.
///
/// Estimates are advisory; confirmation recomputes the quote from scratch and
/// only honors a client price equal to the recomputed one.
#[derive(Clone)]
pub struct QuoteEngine {
    matcher: Arc<ArcSwap<Matcher>>,
    addresses: Arc<dyn AddressLookup>,
}

impl QuoteEngine {
    /// Create a new quote engine.
    pub fn new(matcher: Matcher, addresses: Arc<dyn AddressLookup>) -> Self {
        metrics::record_catalog_size(matcher.catalog().len());
        Self {
            matcher: Arc::new(ArcSwap::from_pointee(matcher)),
            addresses,
        }
    }

    /// Current matcher snapshot.
    pub fn matcher(&self) -> Arc<Matcher> {
        self.matcher.load_full()
    }

    /// Swap in a matcher built from a reloaded catalog.
    ///
    /// In-flight requests finish against the snapshot they already loaded.
    pub fn replace_matcher(&self, matcher: Matcher) {
        metrics::record_catalog_size(matcher.catalog().len());
        self.matcher.store(Arc::new(matcher));
    }

    /// Quote a delivery price for a stored address.
    pub async fn estimate(&self, owner_id: &str, address_id: &str) -> QuoteResult<MatchOutcome> {
        let result = self.compute_quote(owner_id, address_id).await;

        match &result {
            Ok(outcome) => {
                tracing::debug!(address_id, outcome = outcome.label(), "Estimate computed");
                metrics::record_quote("estimate", outcome.label());
            }
            Err(e) => {
                tracing::debug!(address_id, error = %e, "Estimate failed");
                metrics::record_quote("estimate", error_label(e));
            }
        }

        result
    }

    /// Confirm the price a client is about to pay.
    pub async fn confirm_order(
        &self,
        owner_id: &str,
        address_id: &str,
        client_price: i64,
    ) -> QuoteResult<ConfirmedPrice> {
        let result = self
            .compute_quote(owner_id, address_id)
            .await
            .and_then(|outcome| match outcome {
                MatchOutcome::NoMatch(no_match) => Err(QuoteError::NoZone(no_match)),
                MatchOutcome::Matched(m) if m.price != client_price => {
                    tracing::warn!(
                        address_id,
                        zone_id = m.zone_id,
                        client_price,
                        server_price = m.price,
                        "Rejected confirmation with mismatched price"
                    );
                    Err(QuoteError::PriceConflict {
                        client_price,
                        server_price: m.price,
                    })
                }
                MatchOutcome::Matched(m) => Ok(ConfirmedPrice {
                    address_id: address_id.to_string(),
                    confirmed_price: m.price,
                    zone_id: m.zone_id,
                    zone_name: m.zone_name,
                    matched_by: m.matched_by,
                    confidence: m.confidence,
                }),
            });

        match &result {
            Ok(confirmed) => {
                tracing::info!(
                    address_id,
                    zone_id = confirmed.zone_id,
                    price = confirmed.confirmed_price,
                    "Order price confirmed"
                );
                metrics::record_quote("confirm", "confirmed");
            }
            Err(e) => metrics::record_quote("confirm", error_label(e)),
        }

        result
    }

    /// Resolve the address and match it against the current catalog.
    ///
    /// Shared by estimate and confirm so both always compute the same quote.
    async fn compute_quote(&self, owner_id: &str, address_id: &str) -> QuoteResult<MatchOutcome> {
        let address = self
            .addresses
            .find(owner_id, address_id)
            .await?
            .filter(|a| a.owner_id == owner_id)
            .ok_or_else(|| QuoteError::AddressNotFound {
                address_id: address_id.to_string(),
            })?;

        let matcher = self.matcher.load();
        let start = Instant::now();
        let outcome = matcher.match_address(&address.text);
        metrics::record_match(outcome.label(), start);

        if let Some(m) = outcome.matched() {
            tracing::debug!(
                address_id,
                zone_id = m.zone_id,
                matched_by = m.matched_by.as_str(),
                confidence = m.confidence,
                "Address matched"
            );
        }

        Ok(outcome)
    }
}

fn error_label(error: &QuoteError) -> &'static str {
    match error {
        QuoteError::AddressNotFound { .. } => "address_not_found",
        QuoteError::NoZone(_) => "no_zone",
        QuoteError::PriceConflict { .. } => "price_conflict",
        QuoteError::Lookup(_) => "lookup_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addresses::{Address, AddressError, AddressResult, InMemoryAddressBook};
    use crate::matching::MatchedBy;
    use crate::zones::{ZoneCatalog, ZoneRecord};
    use futures_util::future::{self, BoxFuture, FutureExt};

    fn record(zone_id: i64, price: i64, locations: &[&str]) -> ZoneRecord {
        ZoneRecord {
            zone_id,
            price,
            locations: locations.iter().map(|s| s.to_string()).collect(),
            name: None,
        }
    }

    fn matcher(records: Vec<ZoneRecord>) -> Matcher {
        Matcher::new(ZoneCatalog::from_records(records).unwrap())
    }

    fn lagos_matcher() -> Matcher {
        matcher(vec![
            record(1, 1000, &["Lagos"]),
            record(2, 1500, &["Lagos Island"]),
            record(3, 2000, &["Ikoyi"]),
        ])
    }

    fn address(id: &str, owner: &str, text: &str) -> Address {
        Address {
            id: id.to_string(),
            owner_id: owner.to_string(),
            text: text.to_string(),
        }
    }

    fn test_engine() -> QuoteEngine {
        let book: InMemoryAddressBook = [
            address("a1", "u1", "House 3, Lagos Island, Nigeria"),
            address("a2", "u1", "Ikoyy"),
            address("a3", "u1", "Plot 9, Garki, Abuja"),
            address("a4", "u2", "12 Marina, Lagos"),
        ]
        .into_iter()
        .collect();
        QuoteEngine::new(lagos_matcher(), Arc::new(book))
    }

    /// Lookup that ignores ownership, to check the engine enforces it.
    struct CarelessLookup(Address);

    impl AddressLookup for CarelessLookup {
        fn find<'a>(
            &'a self,
            _owner_id: &'a str,
            _address_id: &'a str,
        ) -> BoxFuture<'a, AddressResult<Option<Address>>> {
            future::ready(Ok(Some(self.0.clone()))).boxed()
        }
    }

    struct DownLookup;

    impl AddressLookup for DownLookup {
        fn find<'a>(
            &'a self,
            _owner_id: &'a str,
            _address_id: &'a str,
        ) -> BoxFuture<'a, AddressResult<Option<Address>>> {
            future::ready(Err(AddressError::Unavailable("connection refused".into()))).boxed()
        }
    }

    #[tokio::test]
    async fn test_estimate_match() {
        let engine = test_engine();
        let outcome = engine.estimate("u1", "a1").await.unwrap();
        let m = outcome.matched().expect("expected a match");
        assert_eq!(m.zone_id, 2);
        assert_eq!(m.price, 1500);
        assert_eq!(m.matched_by, MatchedBy::Exact);
    }

    #[tokio::test]
    async fn test_estimate_no_match_is_not_an_error() {
        let engine = test_engine();
        match engine.estimate("u1", "a3").await.unwrap() {
            MatchOutcome::NoMatch(n) => assert_eq!(n.suggestions.len(), 3),
            other => panic!("expected no match, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_address_not_found() {
        let engine = test_engine();
        let missing = engine.estimate("u1", "nope").await;
        assert!(matches!(missing, Err(QuoteError::AddressNotFound { .. })));

        // a4 exists but belongs to u2
        let foreign = engine.confirm_order("u1", "a4", 1000).await;
        assert!(matches!(foreign, Err(QuoteError::AddressNotFound { .. })));
    }

    #[tokio::test]
    async fn test_engine_enforces_ownership() {
        let lookup = CarelessLookup(address("a1", "someone-else", "Ikoyi"));
        let engine = QuoteEngine::new(lagos_matcher(), Arc::new(lookup));
        let result = engine.estimate("u1", "a1").await;
        assert!(matches!(result, Err(QuoteError::AddressNotFound { .. })));
    }

    #[tokio::test]
    async fn test_lookup_failure_surfaces() {
        let engine = QuoteEngine::new(lagos_matcher(), Arc::new(DownLookup));
        let result = engine.confirm_order("u1", "a1", 1000).await;
        assert!(matches!(result, Err(QuoteError::Lookup(AddressError::Unavailable(_)))));
    }

    #[tokio::test]
    async fn test_estimate_confirm_agreement() {
        let engine = test_engine();
        for address_id in ["a1", "a2"] {
            let estimate = engine.estimate("u1", address_id).await.unwrap();
            let quoted = estimate.matched().unwrap().clone();

            let confirmed = engine
                .confirm_order("u1", address_id, quoted.price)
                .await
                .unwrap();
            assert_eq!(confirmed.address_id, address_id);
            assert_eq!(confirmed.confirmed_price, quoted.price);
            assert_eq!(confirmed.zone_id, quoted.zone_id);
            assert_eq!(confirmed.zone_name, quoted.zone_name);
            assert_eq!(confirmed.matched_by, quoted.matched_by);
            assert_eq!(confirmed.confidence, quoted.confidence);
        }
    }

    #[tokio::test]
    async fn test_price_tampering_rejected() {
        let engine = test_engine();
        let quoted = engine.estimate("u1", "a1").await.unwrap().matched().unwrap().price;

        for tampered in [quoted + 1, quoted - 1, 1] {
            match engine.confirm_order("u1", "a1", tampered).await {
                Err(QuoteError::PriceConflict {
                    client_price,
                    server_price,
                }) => {
                    assert_eq!(client_price, tampered);
                    assert_eq!(server_price, quoted);
                }
                other => panic!("expected price conflict, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_confirm_no_zone_carries_estimate_suggestions() {
        let engine = test_engine();
        let estimate = match engine.estimate("u1", "a3").await.unwrap() {
            MatchOutcome::NoMatch(n) => n,
            other => panic!("expected no match, got {other:?}"),
        };

        match engine.confirm_order("u1", "a3", 1000).await {
            Err(QuoteError::NoZone(n)) => assert_eq!(n, estimate),
            other => panic!("expected no zone, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_confirm_sees_reloaded_catalog() {
        let engine = test_engine();
        let quoted = engine.estimate("u1", "a1").await.unwrap().matched().unwrap().price;

        engine.replace_matcher(matcher(vec![record(2, 1800, &["Lagos Island"])]));

        let stale = engine.confirm_order("u1", "a1", quoted).await;
        assert!(matches!(
            stale,
            Err(QuoteError::PriceConflict {
                server_price: 1800,
                ..
            })
        ));
        assert_eq!(engine.matcher().catalog().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_catalog_estimates() {
        let engine = QuoteEngine::new(
            Matcher::new(ZoneCatalog::empty()),
            Arc::new(InMemoryAddressBook::from_iter([address("a1", "u1", "Lagos")])),
        );
        match engine.estimate("u1", "a1").await.unwrap() {
            MatchOutcome::NoMatch(n) => assert!(n.suggestions.is_empty()),
            other => panic!("expected no match, got {other:?}"),
        }
    }
}
