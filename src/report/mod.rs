//! Report module - summarizing grouping results

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
