use csv::StringRecord;

use crate::domain::City;

/// Minimum number of tab-separated fields a GeoNames row must carry.
pub const MIN_FIELDS: usize = 15;

/// Cities below this population are filtered out (not an error).
pub const MIN_POPULATION: i64 = 5000;

// Field indices in the GeoNames TSV layout.
const NAME: usize = 1;
const LATITUDE: usize = 4;
const LONGITUDE: usize = 5;
const COUNTRY_CODE: usize = 8;
const POPULATION: usize = 14;

/// Why a row was dropped instead of becoming a `City`.
#[derive(Debug, Clone, PartialEq)]
pub enum Skip {
    /// Fewer than `MIN_FIELDS` columns; carries the raw row for logging.
    ShortRow { row: String },
    /// Population column did not parse as an integer.
    InvalidPopulation { name: String },
    /// Population parsed but is below `MIN_POPULATION`. Filtered silently.
    BelowThreshold,
    /// Latitude or longitude did not parse as a float.
    InvalidCoordinate { name: String, value: String },
}

/// Validate one raw row into a `City`, or explain why it was skipped.
///
/// A `Skip` is a per-row outcome, never a reason to abort the run.
pub fn parse_row(record: &StringRecord) -> Result<City, Skip> {
    if record.len() < MIN_FIELDS {
        return Err(Skip::ShortRow {
            row: record.iter().collect::<Vec<_>>().join("\t"),
        });
    }

    let name = record[NAME].to_string();

    let population: i64 = record[POPULATION]
        .trim()
        .parse()
        .map_err(|_| Skip::InvalidPopulation { name: name.clone() })?;

    if population < MIN_POPULATION {
        return Err(Skip::BelowThreshold);
    }

    let lat: f64 = parse_coordinate(&record[LATITUDE], &name)?;
    let lon: f64 = parse_coordinate(&record[LONGITUDE], &name)?;

    Ok(City {
        name,
        country: record[COUNTRY_CODE].to_string(),
        population,
        lat,
        lon,
    })
}

fn parse_coordinate(raw: &str, name: &str) -> Result<f64, Skip> {
    raw.trim().parse().map_err(|_| Skip::InvalidCoordinate {
        name: name.to_string(),
        value: raw.to_string(),
    })
}
