//! Completeness filter over normalized records.

use super::schema::REQUIRED_FIELDS;
use crate::error::Result;
use polars::prelude::*;

/// Conjunction of `is_not_null` over `columns`; `true` for an empty list.
pub fn completeness_predicate(columns: &[&str]) -> Expr {
    columns
        .iter()
        .map(|name| col(*name).is_not_null())
        .reduce(|acc, predicate| acc.and(predicate))
        .unwrap_or_else(|| lit(true))
}

/// Keep only records where every required field is non-null. Partial records
/// are dropped whole; nothing is imputed.
pub fn drop_incomplete_lazy(lf: LazyFrame) -> LazyFrame {
    lf.filter(completeness_predicate(&REQUIRED_FIELDS))
}

pub fn drop_incomplete(df: DataFrame) -> Result<DataFrame> {
    Ok(drop_incomplete_lazy(df.lazy()).collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{RawRow, raw_frame};
    use crate::catalog::normalize::normalize;
    use crate::catalog::schema::MODEL;

    #[test]
    fn test_single_missing_field_drops_record() -> Result<()> {
        let raw = raw_frame(&[
            RawRow::phone("Acme", "Complete"),
            RawRow {
                memory: "",
                ..RawRow::phone("Acme", "NoStorage")
            },
            RawRow {
                battery: "unknown",
                ..RawRow::phone("Acme", "BadBattery")
            },
            RawRow {
                cpu: "",
                ..RawRow::phone("Acme", "NoCpu")
            },
            RawRow {
                network: "",
                ..RawRow::phone("Acme", "NoNetwork")
            },
            RawRow::phone("", "NoBrand"),
        ]);

        let normalized = normalize(raw)?;
        let width = normalized.width();
        let filtered = drop_incomplete(normalized)?;

        assert_eq!(filtered.height(), 1);
        assert_eq!(filtered.width(), width);
        let models = filtered.column(MODEL)?.as_materialized_series().str()?.get(0);
        assert_eq!(models, Some("Complete"));
        Ok(())
    }

    #[test]
    fn test_optional_fields_do_not_exclude() -> Result<()> {
        let raw = raw_frame(&[RawRow {
            os: "",
            announced: "",
            status: "",
            ..RawRow::phone("Acme", "Sparse")
        }]);

        let filtered = drop_incomplete(normalize(raw)?)?;

        assert_eq!(filtered.height(), 1);
        Ok(())
    }

    #[test]
    fn test_every_retained_row_is_complete() -> Result<()> {
        let raw = raw_frame(&[
            RawRow::phone("Acme", "A"),
            RawRow {
                memory: "n/a",
                ..RawRow::phone("Acme", "B")
            },
            RawRow::phone("Zeta", ""),
            RawRow::phone("Zeta", "C"),
        ]);

        let filtered = drop_incomplete(normalize(raw)?)?;

        assert_eq!(filtered.height(), 2);
        for name in REQUIRED_FIELDS {
            assert_eq!(filtered.column(name)?.null_count(), 0, "{name} has nulls");
        }
        Ok(())
    }
}
