// places - command line front end for the Places API client
// Author: kelexine (https://github.com/kelexine)

use anyhow::{Context, Result};
use clap::Parser;
use places_api::cache;
use places_api::cli::{Args, Command};
use places_api::config::AppConfig;
use places_api::utils::logging;
use places_api::{Params, PlacesClient};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Phase 1: Load configuration, CLI flags win
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    if let Some(key) = args.key.clone() {
        config.places.api_key = Some(key);
    }
    if args.insecure {
        config.places.verify_tls = false;
    }
    if args.no_cache {
        config.cache.enabled = false;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;

    // Phase 3: Build cache backend and client
    let cache = cache::from_config(&config.cache)
        .await
        .context("Failed to initialize response cache")?;
    let client = PlacesClient::from_config(&config.places, cache)?;

    // Phase 4: Run the requested operation
    let params: Params = args.params.into_iter().collect();
    let (status, from_cache, data) = match args.command {
        Command::Find { input, input_type } => {
            let r = client.find_place(&input, input_type.into(), params).await?;
            (r.status, r.from_cache, Value::Array(r.data))
        }
        Command::Nearby { location, radius } => {
            let r = client.nearby_search(&location, radius, params).await?;
            (r.status, r.from_cache, Value::Array(r.data))
        }
        Command::Text { query } => {
            let r = client.text_search(&query, params).await?;
            (r.status, r.from_cache, Value::Array(r.data))
        }
        Command::Details { place_id } => {
            let r = client.place_details(&place_id, params).await?;
            (r.status, r.from_cache, r.data)
        }
        Command::Autocomplete { input } => {
            let r = client.place_autocomplete(&input, params).await?;
            (r.status, r.from_cache, Value::Array(r.data))
        }
        Command::QueryAutocomplete { input } => {
            let r = client.query_autocomplete(&input, params).await?;
            (r.status, r.from_cache, Value::Array(r.data))
        }
    };

    info!(status = %status, from_cache, "Request completed");
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
