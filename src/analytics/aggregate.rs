//! Per-brand counting and the single-winner brand selection.

use crate::catalog::schema::{BRAND, MODEL_COUNT};
use crate::error::Result;
use polars::prelude::*;

/// Count desc, then brand asc. The brand order is the documented tie-break
/// for the argmax: among brands with equal counts the lexicographically
/// smallest name wins.
fn by_count_then_brand(count_column: &str) -> (Vec<Expr>, SortMultipleOptions) {
    (
        vec![col(count_column), col(BRAND)],
        SortMultipleOptions::default()
            .with_order_descending_multi([true, false])
            .with_nulls_last(true)
            .with_maintain_order(true),
    )
}

fn counts_per_brand(lf: LazyFrame, count_column: &str) -> LazyFrame {
    let (by, options) = by_count_then_brand(count_column);
    lf.group_by([col(BRAND)])
        .agg([len().cast(DataType::UInt64).alias(count_column)])
        .sort_by_exprs(by, options)
}

/// One row per distinct brand with its record count in `modelCount`.
pub fn brand_model_counts(lf: LazyFrame) -> LazyFrame {
    counts_per_brand(lf, MODEL_COUNT)
}

/// The brand with the most records as a table of zero or one rows, the count
/// stored under `count_column`.
pub fn leading_brand_frame(lf: LazyFrame, count_column: &str) -> LazyFrame {
    counts_per_brand(lf, count_column).limit(1)
}

/// Brand selected by the argmax aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandLeader {
    pub brand: String,
    pub model_count: u64,
}

impl BrandLeader {
    /// Read the first row of a `leading_brand_frame` result.
    ///
    /// # Errors
    ///
    /// Fails when the frame lacks `brand` or `count_column`.
    pub fn from_frame(df: &DataFrame, count_column: &str) -> Result<Option<Self>> {
        if df.height() == 0 {
            df.column(BRAND)?;
            df.column(count_column)?;
            return Ok(None);
        }
        let brands = df.column(BRAND)?.as_materialized_series().str()?.clone();
        let counts = df
            .column(count_column)?
            .as_materialized_series()
            .cast(&DataType::UInt64)?;

        let leader = brands
            .get(0)
            .zip(counts.u64()?.get(0))
            .map(|(brand, model_count)| Self {
                brand: brand.to_owned(),
                model_count,
            });
        Ok(leader)
    }

    pub fn to_frame(&self, count_column: &str) -> Result<DataFrame> {
        Ok(DataFrame::new(vec![
            Column::new(BRAND.into(), [self.brand.as_str()]),
            Column::new(count_column.into(), [self.model_count]),
        ])?)
    }
}

/// Collect the argmax brand; `None` when there are no rows to count.
pub fn leading_brand(lf: LazyFrame, count_column: &str) -> Result<Option<BrandLeader>> {
    let df = leading_brand_frame(lf, count_column).collect()?;
    BrandLeader::from_frame(&df, count_column)
}
