//! Eqsplit: Balanced Grouping CLI Tool
//!
//! A command-line tool for splitting tabular datasets into a fixed number of
//! groups balanced on numeric and categorical criteria.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use eqsplit::cli::Cli;
use eqsplit::pipeline::{
    create_groups, group_sizes, load_dataset_with_progress, statistic_by_group, CriteriaData,
};
use eqsplit::report::{export_run_report, GroupingSummary};
use eqsplit::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_info,
    print_step_header, print_step_time, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let output_path = cli.output_path().unwrap();
    let config = cli.grouping_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, &output_path, &config);

    // Step 1: Load dataset
    let step_start = Instant::now();
    println!();
    let (mut df, rows, cols, memory_mb) =
        load_dataset_with_progress(input, cli.infer_schema_length)?;
    print_success("Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let mut summary = GroupingSummary::new(rows, config.n_groups);
    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_step_time(load_elapsed);

    // Step 2: Group assignment search
    print_step_header(1, "Group Assignment Search");

    let step_start = Instant::now();
    let outcome = create_groups(&mut df, &config)?;

    match outcome.best_score {
        Some(score) => print_success(&format!(
            "Best of {} candidates kept (score {:.6})",
            outcome.candidates_considered, score
        )),
        None => print_warning("No grouping satisfied the nominal tolerances"),
    }
    summary.best_score = outcome.best_score;
    summary.candidates_considered = outcome.candidates_considered;
    summary.candidates_rejected = outcome.candidates_rejected;
    let search_elapsed = step_start.elapsed();
    summary.set_search_time(search_elapsed);
    print_step_time(search_elapsed);

    // Group profile on the original (unscaled) criterion values
    if let Some(assignment) = &outcome.assignment {
        summary.group_sizes = group_sizes(assignment, config.n_groups);
        let criteria_data = CriteriaData::from_frame(&df, &config.criteria)?;
        for statistic in &config.statistics {
            let by_group =
                statistic_by_group(assignment, &criteria_data, statistic, config.n_groups);
            for (name, values) in criteria_data.names().iter().zip(by_group) {
                summary.add_stat_row(format!("{}({})", statistic, name), values);
            }
        }
    }

    // Step 3: Save output
    print_step_header(2, "Save Results");

    let step_start = Instant::now();
    if outcome.found_grouping() {
        let spinner = create_spinner("Writing output file...");
        save_dataset(&mut df, &output_path)?;
        finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
    } else {
        print_info("Dataset unchanged; no output file written");
    }
    let save_elapsed = step_start.elapsed();
    summary.set_save_time(save_elapsed);
    print_step_time(save_elapsed);

    // Optional machine-readable run report
    if cli.report {
        let report_path = cli.report_path().unwrap();
        export_run_report(
            &report_path,
            input,
            &config,
            &outcome,
            summary.group_sizes.clone(),
        )?;
        print_success(&format!("Run report written to {}", report_path.display()));
    }

    summary.display();
    print_completion();

    Ok(())
}

/// Save dataset to file (CSV or Parquet based on extension)
fn save_dataset(df: &mut polars::prelude::DataFrame, path: &std::path::Path) -> Result<()> {
    use anyhow::Context;
    use polars::prelude::*;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
