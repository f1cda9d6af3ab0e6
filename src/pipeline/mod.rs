//! Pipeline module - the grouping search and its collaborators

pub mod error;
pub mod loader;
pub mod nominal;
pub mod optimizer;
pub mod partitions;
pub mod sampling;
pub mod scale;
pub mod scoring;
pub mod statistics;

pub use error::GroupingError;
pub use loader::*;
pub use nominal::{NominalConstraint, NominalData};
pub use optimizer::{create_groups, GroupingConfig, GroupingOutcome, GROUPS_COLUMN};
pub use partitions::{all_partitions, assignment_from_partition, Partition, SetPartitions};
pub use sampling::{balanced_pool, RandomAssignments};
pub use scale::ScalerState;
pub use scoring::{group_sizes, score_assignment, statistic_by_group, CriteriaData};
pub use statistics::{Aggregate, Statistic};
