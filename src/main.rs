//! Delivery Zone Quoting Service
//!
//! Resolves free-text customer addresses to priced delivery zones and
//! re-verifies the price when an order is confirmed.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                DELIVERY ZONES                     │
//!                      │                                                   │
//!  Estimate / Confirm  │  ┌────────┐    ┌─────────────┐    ┌───────────┐  │
//!  ────────────────────┼─▶│  http  │───▶│   quoting   │───▶│ addresses │  │
//!                      │  │ server │    │   engine    │    │  lookup   │  │
//!                      │  └────────┘    └──────┬──────┘    └───────────┘  │
//!                      │                       │                          │
//!                      │                       ▼                          │
//!                      │                ┌─────────────┐    ┌───────────┐  │
//!                      │                │  matching   │───▶│   zones   │  │
//!                      │                │ exact/fuzzy │    │  catalog  │  │
//!                      │                └─────────────┘    └───────────┘  │
//!                      │                                                   │
//!                      │  config · observability · lifecycle               │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use delivery_zones::addresses::InMemoryAddressBook;
use delivery_zones::config::{load_config, ServiceConfig};
use delivery_zones::lifecycle::{spawn_signal_listener, Shutdown};
use delivery_zones::observability::{logging, metrics};
use delivery_zones::zones::{load_catalog, CatalogWatcher};
use delivery_zones::{HttpServer, Matcher, QuoteEngine};

#[derive(Parser)]
#[command(name = "delivery-zones")]
#[command(about = "Delivery zone quoting service", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "delivery-zones starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        catalog = %config.catalog.path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // A missing or malformed catalog is fatal.
    let catalog = load_catalog(&config.catalog.path).map_err(|e| {
        tracing::error!(error = %e, "Failed to load zone catalog");
        e
    })?;

    let addresses = match &config.addresses.seed_path {
        Some(path) => InMemoryAddressBook::load_from_file(path)?,
        None => InMemoryAddressBook::new(),
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let engine = QuoteEngine::new(Matcher::new(catalog), Arc::new(addresses));

    let _watcher = if config.catalog.watch {
        Some(CatalogWatcher::new(&config.catalog.path, engine.clone()).run()?)
    } else {
        None
    };

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let tls = config.listener.tls.clone();
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, engine);

    match tls {
        Some(tls) => server.run_tls(&tls, shutdown).await?,
        None => {
            let listener = TcpListener::bind(&bind_address).await?;
            server.run(listener, shutdown).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
