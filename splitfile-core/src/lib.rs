pub mod error;
pub mod merge;
pub mod name;
pub mod parallel;
pub mod plan;
pub mod progress;
pub mod split;

pub use error::SplitError;
pub use plan::{compute_partition, PartSpec, PartitionMode, PartitionPlan};
