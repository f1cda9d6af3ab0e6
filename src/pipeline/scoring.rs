//! Disparity scoring of candidate assignments
//!
//! Criterion columns are extracted once into dense f64 buffers; per
//! candidate, group labels index into those buffers and each statistic is
//! evaluated over one group's gathered values. This explicit per-group
//! accumulation replaces dataframe group-by/aggregate in the scoring loop,
//! which runs once per candidate.

use polars::prelude::*;

use crate::pipeline::error::GroupingError;
use crate::pipeline::statistics::Aggregate;

/// Continuous criterion columns in evaluation-ready form.
///
/// Nulls are stored as NaN and skipped when gathering group values.
#[derive(Debug, Clone, Default)]
pub struct CriteriaData {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl CriteriaData {
    /// Extract and validate the named criterion columns.
    ///
    /// A column that is not primitive-numeric (or cannot be cast to f64)
    /// fails with [`GroupingError::NonNumericCriterion`] before any search
    /// work happens.
    pub fn from_frame(df: &DataFrame, criteria: &[String]) -> Result<Self, GroupingError> {
        let mut columns = Vec::with_capacity(criteria.len());
        for name in criteria {
            let column = df.column(name)?;
            if !column.dtype().is_primitive_numeric() {
                return Err(GroupingError::NonNumericCriterion {
                    column: name.clone(),
                });
            }
            let float = column.cast(&DataType::Float64).map_err(|_| {
                GroupingError::NonNumericCriterion {
                    column: name.clone(),
                }
            })?;
            let ca = float.f64()?;
            columns.push(ca.iter().map(|v| v.unwrap_or(f64::NAN)).collect());
        }
        Ok(Self {
            names: criteria.to_vec(),
            columns,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Mutable access for in-place scaling of the working copy.
    pub fn columns_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.columns
    }
}

/// Row indices per group label.
fn group_rows(assignment: &[u32], n_groups: usize) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); n_groups];
    for (row, &label) in assignment.iter().enumerate() {
        rows[label as usize].push(row);
    }
    rows
}

/// Sizes of the groups of `assignment`.
pub fn group_sizes(assignment: &[u32], n_groups: usize) -> Vec<usize> {
    let mut sizes = vec![0usize; n_groups];
    for &label in assignment {
        sizes[label as usize] += 1;
    }
    sizes
}

/// Total disparity of one assignment.
///
/// For each statistic and each criterion, the statistic is evaluated per
/// group and the spread (max - min across groups) is accumulated; the final
/// score sums spreads over criteria and statistics. Zero means every group
/// agrees on every aggregated value. An empty criteria list scores 0
/// unconditionally, so the first constraint-satisfying candidate wins.
pub fn score_assignment<A: Aggregate>(
    assignment: &[u32],
    criteria: &CriteriaData,
    statistics: &[A],
    n_groups: usize,
) -> f64 {
    if criteria.columns.is_empty() {
        return 0.0;
    }
    let rows = group_rows(assignment, n_groups);

    let mut total = 0.0;
    let mut gathered = Vec::new();
    for statistic in statistics {
        for column in &criteria.columns {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for group in &rows {
                gathered.clear();
                gathered.extend(group.iter().map(|&r| column[r]).filter(|v| !v.is_nan()));
                if gathered.is_empty() {
                    continue;
                }
                let value = statistic.evaluate(&gathered);
                lo = lo.min(value);
                hi = hi.max(value);
            }
            if hi >= lo {
                total += hi - lo;
            }
        }
    }
    total
}

/// Per-group statistic values for reporting.
///
/// Entry `[c][g]` is the statistic of criterion `c` over group `g`, or None
/// when the group has no non-null values for that criterion.
pub fn statistic_by_group<A: Aggregate>(
    assignment: &[u32],
    criteria: &CriteriaData,
    statistic: &A,
    n_groups: usize,
) -> Vec<Vec<Option<f64>>> {
    let rows = group_rows(assignment, n_groups);
    criteria
        .columns
        .iter()
        .map(|column| {
            rows.iter()
                .map(|group| {
                    let gathered: Vec<f64> = group
                        .iter()
                        .map(|&r| column[r])
                        .filter(|v| !v.is_nan())
                        .collect();
                    if gathered.is_empty() {
                        None
                    } else {
                        Some(statistic.evaluate(&gathered))
                    }
                })
                .collect()
        })
        .collect()
}
