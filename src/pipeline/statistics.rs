//! Aggregation statistics for disparity scoring
//!
//! Each statistic reduces one group's criterion values to a single number;
//! the score evaluator then compares these numbers across groups.

use serde::Serialize;

/// A reduction from a sequence of numeric values to a single value.
///
/// Implemented by the built-in [`Statistic`] set. Callers who need a custom
/// aggregation can implement this trait and pass their own slice to the
/// lower-level scoring functions.
pub trait Aggregate {
    /// Reduce `values` to a single number. Inputs are the non-null values of
    /// one group; an empty slice yields NaN.
    fn evaluate(&self, values: &[f64]) -> f64;
}

/// Built-in aggregation statistics.
///
/// Variance and standard deviation are population-flavored (divide by n),
/// matching the usual scientific-stack defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    /// Arithmetic mean
    #[default]
    Mean,
    /// Middle value; the mean of the two middle values for even counts
    Median,
    /// Population variance
    Variance,
    /// Population standard deviation
    StdDev,
    /// Smallest value
    Min,
    /// Largest value
    Max,
    /// Sum of values
    Sum,
}

impl Aggregate for Statistic {
    fn evaluate(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        let n = values.len() as f64;
        match self {
            Statistic::Mean => values.iter().sum::<f64>() / n,
            Statistic::Median => median(values),
            Statistic::Variance => variance(values),
            Statistic::StdDev => variance(values).sqrt(),
            Statistic::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Statistic::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Statistic::Sum => values.iter().sum(),
        }
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

fn variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statistic::Mean => write!(f, "mean"),
            Statistic::Median => write!(f, "median"),
            Statistic::Variance => write!(f, "variance"),
            Statistic::StdDev => write!(f, "std"),
            Statistic::Min => write!(f, "min"),
            Statistic::Max => write!(f, "max"),
            Statistic::Sum => write!(f, "sum"),
        }
    }
}

impl std::str::FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" | "avg" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            "variance" | "var" => Ok(Statistic::Variance),
            "std" | "stddev" | "sd" => Ok(Statistic::StdDev),
            "min" => Ok(Statistic::Min),
            "max" => Ok(Statistic::Max),
            "sum" => Ok(Statistic::Sum),
            _ => Err(format!(
                "Unknown statistic: '{}'. Use 'mean', 'median', 'variance', 'std', 'min', 'max', or 'sum'.",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistic_from_str() {
        assert_eq!("mean".parse::<Statistic>().unwrap(), Statistic::Mean);
        assert_eq!("avg".parse::<Statistic>().unwrap(), Statistic::Mean);
        assert_eq!("median".parse::<Statistic>().unwrap(), Statistic::Median);
        assert_eq!("var".parse::<Statistic>().unwrap(), Statistic::Variance);
        assert_eq!("std".parse::<Statistic>().unwrap(), Statistic::StdDev);
        assert_eq!("sd".parse::<Statistic>().unwrap(), Statistic::StdDev);
        assert_eq!("min".parse::<Statistic>().unwrap(), Statistic::Min);
        assert_eq!("max".parse::<Statistic>().unwrap(), Statistic::Max);
        assert_eq!("sum".parse::<Statistic>().unwrap(), Statistic::Sum);
        assert!("mode".parse::<Statistic>().is_err());
    }

    #[test]
    fn test_statistic_display() {
        assert_eq!(Statistic::Mean.to_string(), "mean");
        assert_eq!(Statistic::StdDev.to_string(), "std");
        assert_eq!(Statistic::Variance.to_string(), "variance");
    }

    #[test]
    fn test_mean() {
        assert_eq!(Statistic::Mean.evaluate(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(Statistic::Median.evaluate(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(Statistic::Median.evaluate(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_population_variance_and_std() {
        // var([1, 2, 3, 4]) = 1.25 with the population denominator
        let var = Statistic::Variance.evaluate(&[1.0, 2.0, 3.0, 4.0]);
        assert!((var - 1.25).abs() < 1e-12);
        let std = Statistic::StdDev.evaluate(&[1.0, 2.0, 3.0, 4.0]);
        assert!((std - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_sum() {
        let values = [4.0, -1.0, 7.5];
        assert_eq!(Statistic::Min.evaluate(&values), -1.0);
        assert_eq!(Statistic::Max.evaluate(&values), 7.5);
        assert_eq!(Statistic::Sum.evaluate(&values), 10.5);
    }

    #[test]
    fn test_empty_input_is_nan() {
        assert!(Statistic::Mean.evaluate(&[]).is_nan());
        assert!(Statistic::Median.evaluate(&[]).is_nan());
    }
}
