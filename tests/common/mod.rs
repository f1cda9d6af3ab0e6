//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small test DataFrame with known characteristics
///
/// - `age`, `score`: numeric criteria with perfect 2-way splits available
/// - `sex`: binary categorical with an even value count (4 m, 4 f)
/// - `site`: binary categorical, also evenly split
pub fn create_test_dataframe() -> DataFrame {
    df! {
        "age" => [20.0f64, 30.0, 40.0, 50.0, 25.0, 35.0, 45.0, 55.0],
        "score" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        "sex" => ["m", "f", "m", "f", "m", "f", "m", "f"],
        "site" => ["a", "a", "b", "b", "a", "a", "b", "b"],
    }
    .unwrap()
}

/// Four rows whose single criterion admits a perfect mean split:
/// {1, 4} vs {2, 3}
pub fn create_perfect_split_dataframe() -> DataFrame {
    df! {
        "x" => [1.0f64, 2.0, 3.0, 4.0],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Extract the `groups` column as plain labels
pub fn groups_labels(df: &DataFrame) -> Vec<u32> {
    df.column("groups")
        .unwrap()
        .cast(&DataType::UInt32)
        .unwrap()
        .u32()
        .unwrap()
        .iter()
        .map(|v| v.unwrap())
        .collect()
}
