//! datakit - command-line client for the datakit enrichment API.
//!
//! Authorizes with an API key and instance id, then prints collections
//! (attractions, categories, concepts, countries, entities, keywords) as JSON.

mod cli;
mod config;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use datakit_core::{Collection, CollectionQuery, CountryList, SessionClient};
use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Command, ConfigAction};
use config::Config;

// ============================================================================
// Constants
// ============================================================================

/// Location used by the tour's attraction search (San Francisco)
const TOUR_LOCATION: &str = "37.7749,-122.4194";

/// Category used by the tour's attraction search
const TOUR_CATEGORY: &str = "landmarks";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.apply_env(|name| std::env::var(name).ok());
    config.merge(cli.overrides());

    match cli.command {
        Command::Config { action } => run_config(&config, action),
        command => {
            let client = connect(&config).await?;
            run(&client, command).await
        }
    }
}

fn run_config(config: &Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let shown = serde_json::json!({
                "token_url": config.token_url,
                "api_url": config.api_url,
                "api_key": config.api_key.as_ref().map(|_| "********"),
                "instance_id": config.instance_id,
            });
            print_json(&shown)
        }
        ConfigAction::Save => {
            let path = config.save()?;
            println!("Saved {}", path.display());
            Ok(())
        }
    }
}

async fn connect(config: &Config) -> Result<SessionClient> {
    let creds = config.credentials()?;
    let client = SessionClient::new().context("Failed to create API client")?;
    client
        .authorize(&creds.token_url, &creds.api_url, &creds.api_key, &creds.instance_id)
        .await
        .context("Failed to authorize with the token endpoint")?;
    info!(instance_id = %creds.instance_id, "Authorized");
    Ok(client)
}

async fn run(client: &SessionClient, command: Command) -> Result<()> {
    let data = match command {
        Command::Categories => client.get_categories().await?,
        Command::Countries { names: true } => {
            for name in client.get_country_list().await?.names() {
                println!("{}", name);
            }
            return Ok(());
        }
        Command::Countries { names: false } => client.get_countries().await?,
        Command::Attractions(args) => client.get_attractions(&args.to_query()).await?,
        Command::Concepts(args) => client.get_concepts(&args.to_query()).await?,
        Command::Entities(args) => client.get_entities(&args.to_query()).await?,
        Command::Keywords(args) => client.get_keywords(&args.to_query()).await?,
        Command::Tour => return tour(client).await,
        Command::Config { .. } => anyhow::bail!("Config commands do not use a session"),
    };
    print_json(&data)
}

/// Fetch every collection concurrently and print what came back.
async fn tour(client: &SessionClient) -> Result<()> {
    let landmarks = CollectionQuery::new()
        .with("location", TOUR_LOCATION)
        .with("category", TOUR_CATEGORY);

    let requests = Collection::ALL.into_iter().map(|collection| {
        let query = (collection == Collection::Attractions).then_some(&landmarks);
        async move { (collection, client.fetch(collection, query).await) }
    });

    let mut failures = 0;
    for (collection, result) in join_all(requests).await {
        match result {
            Ok(data) => {
                println!("== {}", collection);
                print_json(&data)?;
                if collection == Collection::Countries {
                    print_first_country(data);
                }
            }
            Err(e) => {
                warn!(%collection, error = %e, "Fetch failed");
                eprintln!("== {}: {}", collection, e);
                failures += 1;
            }
        }
    }

    if failures == Collection::ALL.len() {
        anyhow::bail!("Every collection request failed");
    }
    Ok(())
}

fn print_first_country(data: Value) {
    match serde_json::from_value::<CountryList>(data) {
        Ok(list) => match list.first_name() {
            Some(name) => println!("First country: {}", name),
            None => println!("First country: (none)"),
        },
        Err(e) => warn!(error = %e, "Countries response has no results[].name"),
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
