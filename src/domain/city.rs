use serde::{Deserialize, Serialize};

/// A populated place from the GeoNames dataset that passed validation.
///
/// Immutable once built: the converter only constructs a `City` after the
/// population and coordinate fields parsed successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub population: i64,
    pub lat: f64,
    pub lon: f64,
}
