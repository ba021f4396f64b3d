//! Per-operating-system ordinal ranking.
//!
//! Ranking is done in two explicit phases rather than through a window
//! expression: rows are grouped into partitions by operating system, then each
//! partition is stable-sorted by `(storage, batteryCapacity, processor)`
//! descending and numbered from 1. Equal keys never share a rank; the earlier
//! physical row wins the smaller number.

use crate::catalog::schema::{BATTERY_CAPACITY, OPERATING_SYSTEM, PROCESSOR, RANK, STORAGE};
use crate::error::Result;
use polars::prelude::*;

/// Composite sort key, most significant first.
pub const RANK_KEYS: [&str; 3] = [STORAGE, BATTERY_CAPACITY, PROCESSOR];

fn rank_order() -> SortMultipleOptions {
    SortMultipleOptions::default()
        .with_order_descending(true)
        .with_nulls_last(true)
        .with_maintain_order(true)
}

/// Number one partition 1..=height in rank order.
fn rank_partition(partition: &DataFrame) -> Result<DataFrame> {
    let sorted = partition.sort(RANK_KEYS, rank_order())?;
    Ok(sorted.with_row_index(RANK.into(), Some(1))?)
}

/// Prepend a `rank` column scoped to each operating system.
///
/// Rows come back grouped by partition (in order of first appearance) and
/// sorted by rank within a partition. A null operating system forms its own
/// partition. Empty input yields an empty table that still has `rank`.
///
/// # Errors
///
/// Fails if the rank key columns or `operatingSystem` are absent.
pub fn rank_by_partition(df: &DataFrame) -> Result<DataFrame> {
    let mut ranked = df.clear().with_row_index(RANK.into(), Some(1))?;
    if df.height() == 0 {
        return Ok(ranked);
    }

    let partitions = df.partition_by_stable([OPERATING_SYSTEM], true)?;
    tracing::debug!(partitions = partitions.len(), "Ranking partitions");

    for partition in &partitions {
        ranked.vstack_mut(&rank_partition(partition)?)?;
    }

    Ok(ranked)
}

/// The best `n` rows of one operating system from a ranked table.
pub fn top_n(ranked: LazyFrame, operating_system: &str, n: u32) -> LazyFrame {
    ranked.filter(
        col(OPERATING_SYSTEM)
            .eq(lit(operating_system))
            .and(col(RANK).lt_eq(lit(n))),
    )
}
