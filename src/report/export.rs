//! Run report export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{GroupingConfig, GroupingOutcome, Statistic};

/// Metadata about the grouping run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Eqsplit version
    pub eqsplit_version: String,
    /// Input file path
    pub input_file: String,
    /// Continuous criterion columns
    pub criteria: Vec<String>,
    /// Nominal criterion columns
    pub criteria_nominal: Vec<String>,
    /// Tolerances paired with the nominal criteria
    pub nominal_tolerance: Vec<u32>,
    /// Number of groups requested
    pub n_groups: usize,
    /// Sampled-mode candidate budget
    pub n_iter: usize,
    /// Statistics contributing to the score
    pub statistics: Vec<Statistic>,
    /// Whether criteria were min-max scaled before scoring
    pub scale: bool,
    /// Whether the search enumerated exhaustively
    pub exact: bool,
    /// Sampler seed (if fixed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Machine-readable summary of one grouping run
#[derive(Serialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    /// Whether a constraint-satisfying grouping was written
    pub found_grouping: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f64>,
    pub candidates_considered: usize,
    pub candidates_rejected: usize,
    /// Scores of every constraint-satisfying candidate, in discovery order
    pub score_history: Vec<f64>,
    /// Sizes of the final groups (empty when no grouping was found)
    pub group_sizes: Vec<usize>,
}

/// Write the JSON run report to `path`.
pub fn export_run_report(
    path: &Path,
    input: &Path,
    config: &GroupingConfig,
    outcome: &GroupingOutcome,
    group_sizes: Vec<usize>,
) -> Result<()> {
    let report = RunReport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            eqsplit_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input.display().to_string(),
            criteria: config.criteria.clone(),
            criteria_nominal: config.criteria_nominal.clone(),
            nominal_tolerance: config.nominal_tolerance.clone(),
            n_groups: config.n_groups,
            n_iter: config.n_iter,
            statistics: config.statistics.clone(),
            scale: config.scale,
            exact: config.exact,
            seed: config.seed,
        },
        found_grouping: outcome.found_grouping(),
        best_score: outcome.best_score,
        candidates_considered: outcome.candidates_considered,
        candidates_rejected: outcome.candidates_rejected,
        score_history: outcome.score_history.clone(),
        group_sizes,
    };

    let json =
        serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run report: {}", path.display()))?;

    Ok(())
}
