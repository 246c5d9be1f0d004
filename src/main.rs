use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use oec::oec::products_call;
use oec::{config::Config, engine::Client, trade_params, VisualOptions};

// pull country/product attributes and one trade query down into ./data as csv
// config path can be set with OEC_CONFIG (a .env file works too)

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load config variables; every setting has a default
    let config_path = std::env::var("OEC_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        Config::load_toml(&config_path).with_context(|| format!("Failed to load {config_path}"))?
    } else {
        tracing::info!(path = %config_path, "No config file, using defaults");
        Config::default()
    };
    let client = Client::new(&config);

    let data_dir = PathBuf::from("./data");
    std::fs::create_dir_all(&data_dir).context("Failed to create ./data")?;

    let countries_csv = data_dir.join("countries.csv");
    let countries = client
        .get_countries(Some(countries_csv.as_path()))
        .await
        .context("Failed to fetch countries")?;
    tracing::info!(count = countries.len(), "Countries fetched");

    // product lists for every classification, a few at a time
    let classifications = ["hs92", "hs96", "hs02", "hs07", "sitc"];
    let calls: Vec<String> = classifications
        .iter()
        .map(|c| products_call(&client, c))
        .collect();
    let results = client.request_many(&calls, client.concurrency()).await;
    for (classification, result) in classifications.iter().zip(results) {
        let records =
            result.with_context(|| format!("Failed to fetch {classification} products"))?;
        let path = data_dir.join(format!("products_{classification}.csv"));
        oec::save_csv(&records, &path, client.export_options())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let params = trade_params("hs92", "export", 2015, "egy", "all", "show");
    let trade_csv = data_dir.join("trade_egy_2015.csv");
    let trade = client
        .get_trade(&params, Some(trade_csv.as_path()))
        .await
        .context("Failed to fetch trade data")?;
    tracing::info!(count = trade.len(), "Trade rows fetched");

    println!("{}", oec::embed_visual(client.base_url(), &params, &VisualOptions::new()));
    Ok(())
}
