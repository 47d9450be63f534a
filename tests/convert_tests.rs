use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

use city_catalog::catalog;
use city_catalog::converter::{self, DEFAULT_LIMIT};
use city_catalog::domain::City;

// Test helper: build one GeoNames-shaped TSV row (19 columns).
fn tsv_row(name: &str, lat: &str, lon: &str, country: &str, population: &str) -> String {
    let mut fields = vec![""; 19];
    fields[0] = "1";
    fields[1] = name;
    fields[4] = lat;
    fields[5] = lon;
    fields[8] = country;
    fields[14] = population;
    fields.join("\t")
}

// Test helper: write rows to an input file, returning (dir, input, output).
fn write_input(rows: &[String]) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cities.txt");
    let output = dir.path().join("catalog.json");
    std::fs::write(&input, rows.join("\n")).unwrap();
    (dir, input, output)
}

// ========== Sorting and truncation ==========

#[test]
fn test_convert_sorts_by_population_descending() {
    let rows = vec![
        tsv_row("Midtown", "1.0", "2.0", "US", "50000"),
        tsv_row("Bigtown", "3.0", "4.0", "US", "900000"),
        tsv_row("Smalltown", "5.0", "6.0", "US", "6000"),
    ];
    let (_dir, input, output) = write_input(&rows);

    let count = converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();
    let cities = catalog::read(&output).unwrap();

    assert_eq!(count, 3);
    let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bigtown", "Midtown", "Smalltown"]);
}

#[test]
fn test_convert_equal_populations_keep_input_order() {
    let rows = vec![
        tsv_row("First", "1.0", "2.0", "US", "10000"),
        tsv_row("Second", "3.0", "4.0", "US", "10000"),
        tsv_row("Third", "5.0", "6.0", "US", "10000"),
    ];
    let (_dir, input, output) = write_input(&rows);

    converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();
    let cities = catalog::read(&output).unwrap();

    let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[test]
fn test_convert_truncates_to_limit() {
    let rows = vec![
        tsv_row("Alpha", "1.0", "2.0", "US", "12000"),
        tsv_row("Beta", "3.0", "4.0", "US", "90000"),
        tsv_row("Gamma", "5.0", "6.0", "US", "45000"),
    ];
    let (_dir, input, output) = write_input(&rows);

    let count = converter::convert_tsv(&input, &output, 1).unwrap();
    let cities = catalog::read(&output).unwrap();

    assert_eq!(count, 1);
    assert_eq!(cities.len(), 1);
    // The single kept entry is the most populous one.
    assert_eq!(cities[0].name, "Beta");
}

// ========== Filtering and skipping ==========

#[test]
fn test_convert_filters_below_population_threshold() {
    let rows = vec![
        tsv_row("Alphaville", "1.0", "2.0", "US", "12000"),
        tsv_row("Tinyville", "3.0", "4.0", "US", "100"),
    ];
    let (_dir, input, output) = write_input(&rows);

    let count = converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();
    let cities = catalog::read(&output).unwrap();

    assert_eq!(count, 1);
    assert_eq!(cities[0].name, "Alphaville");
    assert!(cities.iter().all(|c| c.population >= 5000));
}

#[test]
fn test_convert_skips_short_rows_without_aborting() {
    let rows = vec![
        "42\tOrphan".to_string(),
        tsv_row("Keeper", "1.0", "2.0", "US", "12000"),
    ];
    let (_dir, input, output) = write_input(&rows);

    let count = converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();

    assert_eq!(count, 1);
}

#[test]
fn test_convert_skips_invalid_population_without_aborting() {
    let rows = vec![
        tsv_row("Badpop", "1.0", "2.0", "US", "a lot"),
        tsv_row("Keeper", "1.0", "2.0", "US", "12000"),
    ];
    let (_dir, input, output) = write_input(&rows);

    let count = converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();
    let cities = catalog::read(&output).unwrap();

    assert_eq!(count, 1);
    assert_eq!(cities[0].name, "Keeper");
}

#[test]
fn test_convert_skips_invalid_coordinates_without_aborting() {
    let rows = vec![
        tsv_row("Nocoords", "", "2.0", "US", "12000"),
        tsv_row("Keeper", "1.0", "2.0", "US", "12000"),
    ];
    let (_dir, input, output) = write_input(&rows);

    let count = converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();
    let cities = catalog::read(&output).unwrap();

    assert_eq!(count, 1);
    assert_eq!(cities[0].name, "Keeper");
}

#[test]
fn test_convert_empty_input_writes_empty_catalog() {
    let (_dir, input, output) = write_input(&[]);

    let count = converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();
    let cities = catalog::read(&output).unwrap();

    assert_eq!(count, 0);
    assert!(cities.is_empty());
}

// ========== Output format ==========

#[test]
fn test_convert_output_objects_have_exactly_five_fields() {
    let rows = vec![tsv_row("Alphaville", "1.5", "-2.25", "US", "12000")];
    let (_dir, input, output) = write_input(&rows);

    converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();

    let raw = std::fs::read_to_string(&output).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    let object = value.as_array().unwrap()[0].as_object().unwrap();

    assert_eq!(object.len(), 5);
    assert!(object["name"].is_string());
    assert!(object["country"].is_string());
    assert!(object["population"].is_i64());
    assert!(object["lat"].is_f64());
    assert!(object["lon"].is_f64());
}

#[test]
fn test_convert_output_is_pretty_printed_utf8() {
    let rows = vec![tsv_row("Região Norte", "1.0", "2.0", "BR", "12000")];
    let (_dir, input, output) = write_input(&rows);

    converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains('\n'), "Expected indented output, got {}", raw);
    assert!(
        raw.contains("Região Norte"),
        "Expected unescaped Unicode in {}",
        raw
    );
}

#[test]
fn test_convert_round_trips_through_catalog_reader() {
    let rows = vec![tsv_row("Alphaville", "1.5", "-2.25", "US", "12000")];
    let (_dir, input, output) = write_input(&rows);

    converter::convert_tsv(&input, &output, DEFAULT_LIMIT).unwrap();
    let cities = catalog::read(&output).unwrap();

    assert_eq!(
        cities,
        vec![City {
            name: "Alphaville".to_string(),
            country: "US".to_string(),
            population: 12000,
            lat: 1.5,
            lon: -2.25,
        }]
    );
}

// ========== Fatal setup errors ==========

#[test]
fn test_convert_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.txt");
    let output = dir.path().join("catalog.json");

    let result = converter::convert_tsv(&input, &output, DEFAULT_LIMIT);

    assert!(result.is_err());
}

#[test]
fn test_convert_unwritable_output_is_fatal() {
    let rows = vec![tsv_row("Alphaville", "1.0", "2.0", "US", "12000")];
    let (dir, input, _output) = write_input(&rows);
    let output = dir.path().join("no-such-dir").join("catalog.json");

    let result = converter::convert_tsv(&input, &output, DEFAULT_LIMIT);

    assert!(result.is_err());
}
