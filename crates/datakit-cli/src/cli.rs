//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use datakit_core::CollectionQuery;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "datakit", version, about = "Query the datakit enrichment API")]
pub struct Cli {
    /// Token endpoint used for the API-key exchange
    #[arg(long, global = true)]
    pub token_url: Option<String>,

    /// Base URL of the data API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API key to exchange for a bearer token
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Instance the session is scoped to
    #[arg(long, global = true)]
    pub instance_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List categories
    Categories,
    /// List countries
    Countries {
        /// Print one country name per line instead of JSON
        #[arg(long)]
        names: bool,
    },
    /// Search attractions
    Attractions(QueryArgs),
    /// Search concepts
    Concepts(QueryArgs),
    /// Search entities
    Entities(QueryArgs),
    /// Search keywords
    Keywords(QueryArgs),
    /// Fetch every collection at once, starting from San Francisco landmarks
    Tour,
    /// Inspect or persist connection settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings (API key masked)
    Show,
    /// Write the effective settings, minus the API key, to the config file
    Save,
}

#[derive(Debug, Default, Args)]
pub struct QueryArgs {
    /// Query parameter as key=value; repeat for more
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

impl QueryArgs {
    pub fn to_query(&self) -> CollectionQuery {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

impl Cli {
    /// Settings given as flags, for layering over file and environment.
    pub fn overrides(&self) -> Config {
        Config {
            token_url: self.token_url.clone(),
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            instance_id: self.instance_id.clone(),
        }
    }
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}
