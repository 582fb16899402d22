use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use delivery_zones::http::X_OWNER_ID;
use delivery_zones::matching::{MatchOutcome, Matcher};
use delivery_zones::zones::load_catalog;

#[derive(Parser)]
#[command(name = "zone-cli")]
#[command(about = "Operator CLI for the delivery zone service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a price estimate for a stored address
    Estimate {
        /// Address identifier
        address_id: String,
        /// Owner of the address
        #[arg(short, long)]
        owner: String,
    },
    /// Confirm the price for a stored address
    Confirm {
        /// Address identifier
        address_id: String,
        /// Owner of the address
        #[arg(short, long)]
        owner: String,
        /// Price the client intends to pay, in minor units
        #[arg(short, long)]
        price: i64,
    },
    /// Match an address against a catalog file without a server
    Match {
        /// Zone catalog (.json or .toml)
        #[arg(short, long)]
        catalog: PathBuf,
        /// Free-text address
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Estimate { address_id, owner } => {
            let res = client
                .post(format!("{}/api/v1/delivery/estimate", cli.url))
                .header(X_OWNER_ID, owner)
                .json(&json!({ "addressId": address_id }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Confirm {
            address_id,
            owner,
            price,
        } => {
            let res = client
                .post(format!("{}/api/v1/delivery/confirm", cli.url))
                .header(X_OWNER_ID, owner)
                .json(&json!({ "addressId": address_id, "clientPrice": price }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Match { catalog, address } => {
            let matcher = Matcher::new(load_catalog(&catalog)?);
            let value = match matcher.match_address(&address) {
                MatchOutcome::Matched(result) => serde_json::to_value(result)?,
                MatchOutcome::NoMatch(no_match) => serde_json::to_value(no_match)?,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body: Value = res.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
