//! Eqsplit: Balanced Grouping Library
//!
//! A library for splitting tabular datasets into a fixed number of groups
//! whose numeric criteria are as equal as possible across groups, with
//! optional bounds on categorical frequency imbalance.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
