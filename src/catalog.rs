use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::City;

/// Read a city catalog from a JSON file.
///
/// A missing file or an unparsable document is fatal to the caller.
pub fn read(path: &Path) -> Result<Vec<City>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open catalog file: {}", path.display()))?;

    let cities: Vec<City> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

    Ok(cities)
}

/// Write a city catalog as pretty-printed UTF-8 JSON.
pub fn write(path: &Path, cities: &[City]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, cities)
        .with_context(|| format!("Failed to write catalog to {}", path.display()))?;
    writer.flush()?;

    Ok(())
}
