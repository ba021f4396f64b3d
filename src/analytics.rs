//! Table-level stages: ranking, aggregation and report filters.

pub mod aggregate;
pub mod rank;
pub mod reports;

pub use aggregate::{BrandLeader, brand_model_counts, leading_brand, leading_brand_frame};
pub use rank::{RANK_KEYS, rank_by_partition, top_n};
pub use reports::{LeaderCountMode, discontinued_after, tag_leader, tagged};
