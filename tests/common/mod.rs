#![allow(dead_code)]

//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use delivery_zones::addresses::{Address, InMemoryAddressBook};
use delivery_zones::config::ServiceConfig;
use delivery_zones::zones::{ZoneCatalog, ZoneRecord};
use delivery_zones::{HttpServer, Matcher, QuoteEngine, Shutdown};

/// A running service bound to a loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub engine: QuoteEngine,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn zone(zone_id: i64, price: i64, locations: &[&str]) -> ZoneRecord {
    ZoneRecord {
        zone_id,
        price,
        locations: locations.iter().map(|s| s.to_string()).collect(),
        name: None,
    }
}

pub fn address(id: &str, owner: &str, text: &str) -> Address {
    Address {
        id: id.to_string(),
        owner_id: owner.to_string(),
        text: text.to_string(),
    }
}

/// Lagos catalog used across the integration tests.
pub fn lagos_zones() -> Vec<ZoneRecord> {
    vec![
        zone(1, 1000, &["Lagos"]),
        zone(2, 1500, &["Lagos Island"]),
        zone(3, 2000, &["Ikoyi", "Banana Island"]),
        zone(4, 2500, &["Lekki Phase 1", "Lekki"]),
    ]
}

/// Addresses owned by `u1` (and one by `u2`).
pub fn lagos_addresses() -> Vec<Address> {
    vec![
        address("a1", "u1", "House 3, Lagos Island, Nigeria"),
        address("a2", "u1", "Ikoyy"),
        address("a3", "u1", "Plot 9, Garki, Abuja"),
        address("a4", "u2", "12 Admiralty Way, Lekki Phase 1"),
    ]
}

/// Start the service on an ephemeral port.
pub async fn start_server(zones: Vec<ZoneRecord>, addresses: Vec<Address>) -> TestServer {
    let catalog = ZoneCatalog::from_records(zones).expect("invalid test catalog");
    let book: InMemoryAddressBook = addresses.into_iter().collect();
    let engine = QuoteEngine::new(Matcher::new(catalog), Arc::new(book));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let server = HttpServer::new(ServiceConfig::default(), engine.clone());
    let server_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        engine,
        shutdown,
    }
}
