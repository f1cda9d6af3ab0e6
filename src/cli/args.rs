//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{GroupingConfig, Statistic};

/// Eqsplit - Split a dataset into groups balanced on numeric and categorical criteria
#[derive(Parser, Debug)]
#[command(name = "eqsplit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Continuous criterion columns to equalize across groups (comma-separated)
    #[arg(short = 'c', long, value_delimiter = ',')]
    pub criteria: Vec<String>,

    /// Categorical criterion columns whose imbalance is bounded (comma-separated)
    #[arg(long = "nominal", value_delimiter = ',')]
    pub criteria_nominal: Vec<String>,

    /// Allowed per-category frequency imbalance, one value per nominal
    /// criterion (comma-separated)
    #[arg(long = "tolerance", value_delimiter = ',')]
    pub nominal_tolerance: Vec<u32>,

    /// Number of groups to create
    #[arg(short = 'g', long, default_value = "2")]
    pub n_groups: usize,

    /// Number of random candidate assignments to evaluate (ignored with --exact)
    #[arg(short = 'n', long, default_value = "100")]
    pub n_iter: usize,

    /// Statistics to equalize (comma-separated).
    /// Options: "mean", "median", "variance", "std", "min", "max", "sum"
    #[arg(long, value_delimiter = ',', default_value = "mean")]
    pub statistics: Vec<Statistic>,

    /// Min-max scale criteria before scoring so differently-scaled columns
    /// contribute comparably to the score
    #[arg(long, default_value = "false")]
    pub scale: bool,

    /// Exhaustively enumerate every partition instead of sampling.
    /// Guarantees the optimum at combinatorial cost; keep the row count small.
    #[arg(long, default_value = "false")]
    pub exact: bool,

    /// Seed for the random sampler (sampled mode only); runs with the same
    /// seed evaluate the same candidates
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to the input directory with a '_grouped' suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a JSON run report next to the output file
    #[arg(long, default_value = "false")]
    pub report: bool,

    /// Print the full score history to stderr
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Get the input path, if provided.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the output path, deriving from input if not explicitly provided.
    /// The derived path sits next to the input with a '_grouped' suffix.
    pub fn output_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(self.output.clone().unwrap_or_else(|| {
            let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let extension = input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("parquet");
            parent.join(format!("{}_grouped.{}", stem, extension))
        }))
    }

    /// Get the run-report path, derived from the input file.
    pub fn report_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
        let stem = input.file_stem().and_then(|s| s.to_str())?;
        Some(parent.join(format!("{}_grouping.json", stem)))
    }

    /// Assemble the optimizer configuration from the parsed flags.
    pub fn grouping_config(&self) -> GroupingConfig {
        GroupingConfig {
            criteria: self.criteria.clone(),
            criteria_nominal: self.criteria_nominal.clone(),
            nominal_tolerance: self.nominal_tolerance.clone(),
            n_groups: self.n_groups,
            n_iter: self.n_iter,
            statistics: self.statistics.clone(),
            scale: self.scale,
            exact: self.exact,
            verbose: self.verbose,
            seed: self.seed,
        }
    }
}
