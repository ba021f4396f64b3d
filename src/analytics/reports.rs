//! Report filters composed from the classified and ranked catalog.

use super::aggregate::leading_brand_frame;
use crate::catalog::schema::{ANNOUNCED_YEAR, DeviceStatus, STATUS};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Which records feed the per-tag brand leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderCountMode {
    /// Count only records carrying the tag, then pick the top brand.
    #[default]
    TaggedOnly,
    /// Count every record of the brand regardless of the tag. This is how the
    /// legacy batch job computed the leaders; both leaders then coincide.
    AllModels,
}

/// Records where the boolean `tag_column` is set.
pub fn tagged(lf: LazyFrame, tag_column: &str) -> LazyFrame {
    lf.filter(col(tag_column))
}

/// Discontinued records announced strictly after `year`. Records without a
/// parseable announcement year never qualify.
pub fn discontinued_after(lf: LazyFrame, year: i32) -> LazyFrame {
    lf.filter(
        col(STATUS)
            .eq(lit(DeviceStatus::Discontinued.as_str()))
            .and(col(ANNOUNCED_YEAR).gt(lit(year))),
    )
}

/// Single-row table naming the brand with the most records for `tag_column`.
pub fn tag_leader(
    lf: LazyFrame,
    tag_column: &str,
    count_column: &str,
    mode: LeaderCountMode,
) -> LazyFrame {
    let counted = match mode {
        LeaderCountMode::TaggedOnly => tagged(lf, tag_column),
        LeaderCountMode::AllModels => lf,
    };
    leading_brand_frame(counted, count_column)
}
