pub mod parser;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::catalog;
use crate::domain::City;
use parser::Skip;

/// Default maximum number of cities kept in the catalog.
pub const DEFAULT_LIMIT: usize = 1000;

/// Convert a GeoNames TSV extract into a sorted, size-limited JSON catalog.
///
/// Rows that fail validation are logged and skipped; only an unopenable
/// input or output path aborts the run. Returns the number of cities
/// written.
pub fn convert_tsv(input: &Path, output: &Path, limit: usize) -> Result<usize> {
    tracing::info!("Reading GeoNames TSV from {}", input.display());

    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut cities: Vec<City> = Vec::new();
    let mut skipped = 0usize;
    let mut filtered = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Error reading row: {}", e);
                skipped += 1;
                continue;
            }
        };

        match parser::parse_row(&record) {
            Ok(city) => cities.push(city),
            Err(Skip::BelowThreshold) => filtered += 1,
            Err(skip) => {
                log_skip(&skip);
                skipped += 1;
            }
        }
    }

    // Stable sort keeps input order for equal populations.
    cities.sort_by(|a, b| b.population.cmp(&a.population));
    cities.truncate(limit);

    catalog::write(output, &cities)?;

    tracing::info!(
        "Converted {} cities to {} ({} skipped, {} below population threshold)",
        cities.len(),
        output.display(),
        skipped,
        filtered
    );

    Ok(cities.len())
}

fn log_skip(skip: &Skip) {
    match skip {
        Skip::ShortRow { row } => {
            tracing::warn!("Skipping row with insufficient columns: {}", row);
        }
        Skip::InvalidPopulation { name } => {
            tracing::warn!("Skipping city with invalid population: {}", name);
        }
        Skip::InvalidCoordinate { name, value } => {
            tracing::warn!("Skipping city with invalid coordinate: {} ({})", name, value);
        }
        Skip::BelowThreshold => {}
    }
}
