use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use city_catalog::catalog;
use city_catalog::store::{PgCityStore, StoreCredentials};
use city_catalog::uploader;

#[derive(Parser, Debug)]
#[command(name = "upload")]
#[command(about = "Upload a city catalog to the document store in batches", long_about = None)]
struct Args {
    /// Path to the store credentials JSON file
    credentials: PathBuf,

    /// Path to the city catalog JSON file
    #[arg(default_value = "data/cities5000.min.json")]
    catalog: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if !args.credentials.exists() {
        tracing::error!("Credentials file not found: {}", args.credentials.display());
        std::process::exit(1);
    }

    if !args.catalog.exists() {
        tracing::error!("Catalog file not found: {}", args.catalog.display());
        std::process::exit(1);
    }

    tracing::info!(
        "Initializing store with credentials: {}",
        args.credentials.display()
    );
    let credentials = StoreCredentials::load(&args.credentials)?;
    let store = PgCityStore::connect(&credentials).await?;

    let cities = catalog::read(&args.catalog)?;
    tracing::info!("Loaded {} cities from {}", cities.len(), args.catalog.display());

    uploader::upload_catalog(&store, &cities).await?;

    Ok(())
}
