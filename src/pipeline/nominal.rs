//! Nominal constraint checking
//!
//! Bounds the frequency imbalance of categorical columns: for each
//! constrained column, every distinct category value must have per-group
//! counts whose spread (max - min over all K groups) stays within the
//! configured tolerance. Candidates failing any constraint are filtered out
//! before scoring and never influence best-candidate tracking.

use std::collections::HashMap;

use polars::prelude::*;

use crate::pipeline::error::GroupingError;

/// A categorical column paired with its allowed frequency imbalance.
#[derive(Debug, Clone)]
pub struct NominalConstraint {
    pub column: String,
    pub tolerance: u32,
}

/// Category codes for one constrained column, extracted once per run.
#[derive(Debug, Clone)]
struct NominalColumn {
    tolerance: u32,
    /// Per-row category code; None where the source value was null.
    codes: Vec<Option<u32>>,
    n_categories: usize,
}

/// All constrained columns in evaluation-ready form.
#[derive(Debug, Clone, Default)]
pub struct NominalData {
    columns: Vec<NominalColumn>,
}

impl NominalData {
    /// Extract category codes for every constrained column.
    ///
    /// Values are compared by their string rendering, so integer-coded and
    /// string categories both work. Nulls carry no code and stay out of the
    /// counts.
    pub fn from_frame(
        df: &DataFrame,
        constraints: &[NominalConstraint],
    ) -> Result<Self, GroupingError> {
        let mut columns = Vec::with_capacity(constraints.len());
        for constraint in constraints {
            let rendered = df.column(&constraint.column)?.cast(&DataType::String)?;
            let ca = rendered.str()?;

            let mut seen: HashMap<String, u32> = HashMap::new();
            let mut codes = Vec::with_capacity(ca.len());
            for value in ca.iter() {
                codes.push(value.map(|v| {
                    let next = seen.len() as u32;
                    *seen.entry(v.to_string()).or_insert(next)
                }));
            }

            columns.push(NominalColumn {
                tolerance: constraint.tolerance,
                codes,
                n_categories: seen.len(),
            });
        }
        Ok(Self { columns })
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True iff every constrained column keeps every category value within
    /// tolerance across all `n_groups` groups of `assignment`.
    ///
    /// A category absent from a group counts as 0 there, so a tolerance of 0
    /// demands an exact per-group split of every category.
    pub fn tolerance_met(&self, assignment: &[u32], n_groups: usize) -> bool {
        for column in &self.columns {
            if column.n_categories == 0 {
                continue;
            }
            let mut counts = vec![0u32; column.n_categories * n_groups];
            for (row, code) in column.codes.iter().enumerate() {
                if let Some(code) = code {
                    counts[*code as usize * n_groups + assignment[row] as usize] += 1;
                }
            }
            for value in 0..column.n_categories {
                let group_counts = &counts[value * n_groups..(value + 1) * n_groups];
                let max = group_counts.iter().max().copied().unwrap_or(0);
                let min = group_counts.iter().min().copied().unwrap_or(0);
                if max - min > column.tolerance {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df! {
            "sex" => ["m", "f", "m", "f"],
            "site" => [1i32, 1, 2, 2],
        }
        .unwrap()
    }

    fn data(column: &str, tolerance: u32) -> NominalData {
        NominalData::from_frame(
            &frame(),
            &[NominalConstraint {
                column: column.to_string(),
                tolerance,
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_no_constraints_always_passes() {
        let none = NominalData::default();
        assert!(none.tolerance_met(&[0, 1, 0], 2));
    }

    #[test]
    fn test_exact_split_within_zero_tolerance() {
        // One m and one f per side
        assert!(data("sex", 0).tolerance_met(&[0, 1, 1, 0], 2));
    }

    #[test]
    fn test_lopsided_split_rejected() {
        // Both m in group 0, both f in group 1: spread 2 for each value
        assert!(!data("sex", 0).tolerance_met(&[0, 1, 0, 1], 2));
        assert!(!data("sex", 1).tolerance_met(&[0, 1, 0, 1], 2));
        // Allowed once the tolerance is wide enough
        assert!(data("sex", 2).tolerance_met(&[0, 1, 0, 1], 2));
    }

    #[test]
    fn test_integer_categories_are_rendered() {
        assert!(data("site", 0).tolerance_met(&[0, 1, 0, 1], 2));
    }

    #[test]
    fn test_absent_category_counts_as_zero() {
        // Both m rows land in group 0: spread for "m" is 2 - 0 = 2
        let frame = df! { "sex" => ["m", "m", "f", "f"] }.unwrap();
        let data = NominalData::from_frame(
            &frame,
            &[NominalConstraint {
                column: "sex".to_string(),
                tolerance: 1,
            }],
        )
        .unwrap();
        assert!(!data.tolerance_met(&[0, 0, 1, 1], 2));
    }
}
