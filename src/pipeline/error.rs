//! Error types for the grouping pipeline.
//!
//! Argument problems are caught synchronously before any search work begins;
//! an infeasible search (no candidate within the nominal tolerances) is not
//! an error and is reported through the search outcome instead.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while configuring or running a grouping search.
#[derive(Debug, Error)]
pub enum GroupingError {
    /// The supplied arguments cannot describe a valid search: no criteria at
    /// all, mismatched nominal/tolerance lists, unknown column names, an
    /// invalid group count, or a malformed pre-existing assignment.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A continuous criterion column cannot be aggregated numerically.
    #[error("criterion column '{column}' is not numeric and cannot be aggregated")]
    NonNumericCriterion {
        /// Name of the offending column
        column: String,
    },

    /// An underlying dataframe operation failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
