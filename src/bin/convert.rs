use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use city_catalog::converter::{self, DEFAULT_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(about = "Convert a GeoNames TSV extract into a sorted city catalog", long_about = None)]
struct Args {
    /// Path to the GeoNames tab-separated input file
    input: PathBuf,

    /// Path to write the JSON catalog
    output: PathBuf,

    /// Maximum number of cities to keep (default 1000)
    limit: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Wrong argument count exits 1, not clap's usual 2.
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let limit = parse_limit(args.limit.as_deref());

    converter::convert_tsv(&args.input, &args.output, limit)?;

    Ok(())
}

/// Invalid or non-positive limits fall back to the default with a warning.
fn parse_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };

    match raw.parse::<usize>() {
        Ok(limit) if limit > 0 => limit,
        _ => {
            tracing::warn!(
                "Invalid limit value: {}. Using default limit of {}.",
                raw,
                DEFAULT_LIMIT
            );
            DEFAULT_LIMIT
        }
    }
}
