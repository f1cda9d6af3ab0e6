//! Integration tests for dataset loading

use eqsplit::pipeline::load_dataset_with_progress;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_load_csv() {
    let mut df = create_test_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let (loaded, rows, cols, _memory) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 8);
    assert_eq!(cols, 4);
    assert_has_columns(&loaded, &["age", "score", "sex", "site"]);
}

#[test]
fn test_load_parquet() {
    let mut df = create_test_dataframe();
    let (_temp_dir, parquet_path) = create_temp_parquet(&mut df);

    let (loaded, rows, cols, _memory) = load_dataset_with_progress(&parquet_path, 100).unwrap();

    assert_eq!(rows, 8);
    assert_eq!(cols, 4);
    assert_has_columns(&loaded, &["age", "score", "sex", "site"]);
}

#[test]
fn test_csv_and_parquet_agree() {
    let mut df = create_test_dataframe();
    let (_dir_csv, csv_path) = create_temp_csv(&mut df.clone());
    let (_dir_parquet, parquet_path) = create_temp_parquet(&mut df);

    let (df_csv, rows_csv, cols_csv, _) = load_dataset_with_progress(&csv_path, 100).unwrap();
    let (df_parquet, rows_parquet, cols_parquet, _) =
        load_dataset_with_progress(&parquet_path, 100).unwrap();

    assert_eq!(rows_csv, rows_parquet);
    assert_eq!(cols_csv, cols_parquet);
    assert_eq!(df_csv.get_column_names(), df_parquet.get_column_names());
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("data.xlsx");
    std::fs::write(&path, b"not a dataset").unwrap();

    let result = load_dataset_with_progress(&path, 100);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Unsupported file format"));
}
