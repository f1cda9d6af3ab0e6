//! Min-max scaling of criterion columns
//!
//! Normalizes each criterion into [0, 1] so that criteria measured on very
//! different scales contribute comparably to the disparity score. The fitted
//! bounds live in an explicit [`ScalerState`] so a transform can be undone
//! exactly with `inverse_transform`.
//!
//! Constant columns (max == min) are skipped in both directions; scaling them
//! would divide by zero. NaN entries (nulls in the source column) pass
//! through untouched.

/// Per-column bounds captured when the scaler is fitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerState {
    bounds: Vec<(f64, f64)>,
}

impl ScalerState {
    /// Number of columns the scaler was fitted on.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Fitted (min, max) of column `idx`.
    pub fn bounds(&self, idx: usize) -> (f64, f64) {
        self.bounds[idx]
    }

    /// True when column `idx` held a single distinct value at fit time and
    /// is therefore excluded from scaling.
    pub fn is_constant(&self, idx: usize) -> bool {
        let (min, max) = self.bounds[idx];
        !(max > min)
    }
}

/// Capture per-column min/max over `columns`, ignoring NaN entries.
pub fn fit(columns: &[Vec<f64>]) -> ScalerState {
    let bounds = columns
        .iter()
        .map(|column| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &value in column.iter().filter(|v| !v.is_nan()) {
                min = min.min(value);
                max = max.max(value);
            }
            (min, max)
        })
        .collect();
    ScalerState { bounds }
}

/// Rewrite each value as `(x - min) / (max - min)` using the fitted bounds.
///
/// `columns` must have the same column count as the fitted state.
pub fn transform(columns: &mut [Vec<f64>], state: &ScalerState) {
    assert_eq!(columns.len(), state.len(), "scaler state / column count mismatch");
    for (idx, column) in columns.iter_mut().enumerate() {
        if state.is_constant(idx) {
            continue;
        }
        let (min, max) = state.bounds(idx);
        let range = max - min;
        for value in column.iter_mut() {
            *value = (*value - min) / range;
        }
    }
}

/// Exactly undo [`transform`]: `x' = x * (max - min) + min`.
pub fn inverse_transform(columns: &mut [Vec<f64>], state: &ScalerState) {
    assert_eq!(columns.len(), state.len(), "scaler state / column count mismatch");
    for (idx, column) in columns.iter_mut().enumerate() {
        if state.is_constant(idx) {
            continue;
        }
        let (min, max) = state.bounds(idx);
        let range = max - min;
        for value in column.iter_mut() {
            *value = *value * range + min;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_maps_to_unit_interval() {
        let mut columns = vec![vec![2.0, 4.0, 6.0]];
        let state = fit(&columns);
        transform(&mut columns, &state);
        assert_eq!(columns[0], vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_round_trip_recovers_values() {
        let original = vec![vec![1.5, -3.0, 8.25, 0.0], vec![100.0, 250.0, 175.0, 130.0]];
        let mut columns = original.clone();
        let state = fit(&columns);
        transform(&mut columns, &state);
        inverse_transform(&mut columns, &state);
        for (col, orig) in columns.iter().zip(&original) {
            for (a, b) in col.iter().zip(orig) {
                assert!((a - b).abs() < 1e-12, "round trip drifted: {} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_constant_column_is_skipped() {
        let mut columns = vec![vec![5.0, 5.0, 5.0]];
        let state = fit(&columns);
        assert!(state.is_constant(0));
        transform(&mut columns, &state);
        assert_eq!(columns[0], vec![5.0, 5.0, 5.0]);
        inverse_transform(&mut columns, &state);
        assert_eq!(columns[0], vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_nan_passes_through() {
        let mut columns = vec![vec![0.0, f64::NAN, 10.0]];
        let state = fit(&columns);
        assert_eq!(state.bounds(0), (0.0, 10.0));
        transform(&mut columns, &state);
        assert_eq!(columns[0][0], 0.0);
        assert!(columns[0][1].is_nan());
        assert_eq!(columns[0][2], 1.0);
    }

    #[test]
    fn test_all_nan_column_treated_as_constant() {
        let columns = vec![vec![f64::NAN, f64::NAN]];
        let state = fit(&columns);
        assert!(state.is_constant(0));
    }
}
