//! Schema normalization: raw catalog text into typed, null-safe columns.
//!
//! Every coercion here is total. Text that cannot be read as the target type
//! becomes null instead of failing the run; the only error is a structurally
//! missing source column.

use super::schema::{
    ANNOUNCED_DATE, ANNOUNCED_YEAR, DERIVED_COLUMNS, DeviceStatus, FIELDS, FieldKind,
    require_schema,
};
use crate::error::{CatalogError, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Integer part of a decimal number, surrounding whitespace already removed.
/// The fraction is dropped the way a string-to-int cast truncates.
const INTEGER_PATTERN: &str = r"^(-?\d+)(?:\.\d*)?$";

/// `YYYY`, `YYYY-M[M]` or `YYYY-M[M]-D[D]`, optionally followed by a time.
/// Groups: year, month, day.
const DATE_PATTERN: &str =
    r"^(\d{4})(?:-(0?[1-9]|1[0-2])(?:-(0?[1-9]|[12]\d|3[01]))?)?(?:[T ].*)?$";

pub fn normalize(df: DataFrame) -> Result<DataFrame> {
    Ok(normalize_lazy(df.lazy())?.collect()?)
}

/// Build the normalization plan for a raw or already-normalized catalog.
///
/// Output columns are the canonical fields in declared order (with
/// `announcedYear` after `announcedDate`), followed by any columns the schema
/// does not declare, untouched. Input columns named like a derived column
/// (`announcedYear`, the network tags, `rank`, `modelCount`) are dropped.
///
/// # Errors
///
/// Returns [`CatalogError::SchemaMismatch`] when a declared column is absent.
pub fn normalize_lazy(mut lf: LazyFrame) -> Result<LazyFrame> {
    let schema = lf.collect_schema()?;
    require_schema(&schema)?;

    let mut exprs = Vec::with_capacity(schema.len() + 1);
    let mut consumed: HashSet<&str> = HashSet::new();

    for field in &FIELDS {
        let (_, source, dtype) = field
            .resolve(&schema)
            .and_then(|name| schema.get_full(name.as_str()))
            .ok_or_else(|| CatalogError::SchemaMismatch {
                missing: vec![field.source.to_owned()],
            })?;
        consumed.insert(source.as_str());

        let expr = match field.kind {
            FieldKind::Text => null_if_empty(source, dtype),
            FieldKind::Integer => parse_integer(source, dtype),
            FieldKind::Status => status_of(null_if_empty(source, dtype)),
        };
        exprs.push(expr.alias(field.name));

        if field.name == ANNOUNCED_DATE {
            exprs.push(year_of(null_if_empty(source, dtype)).alias(ANNOUNCED_YEAR));
        }
    }

    let canonical: HashSet<&str> = FIELDS.iter().map(|f| f.name).collect();

    for name in schema.iter_names() {
        let name_str = name.as_str();
        if consumed.contains(name_str) || canonical.contains(name_str) {
            continue;
        }
        if DERIVED_COLUMNS.contains(&name_str) {
            if name_str != ANNOUNCED_YEAR {
                tracing::warn!(column = name_str, "Input column shadows a derived column; ignored");
            }
            continue;
        }
        exprs.push(col(name.clone()));
    }

    Ok(lf.select(exprs))
}

/// Text column with the exact empty string replaced by null.
fn null_if_empty(source: &str, dtype: &DataType) -> Expr {
    let text = match dtype {
        DataType::String => col(source),
        _ => col(source).cast(DataType::String),
    };
    when(text.clone().eq(lit("")))
        .then(lit(NULL).cast(DataType::String))
        .otherwise(text)
}

fn parse_integer(source: &str, dtype: &DataType) -> Expr {
    if dtype.is_integer() {
        return col(source).cast(DataType::Int64);
    }
    null_if_empty(source, dtype)
        .str()
        .strip_chars(lit(NULL))
        .str()
        .extract(lit(INTEGER_PATTERN), 1)
        .cast(DataType::Int64)
}

/// Year of a date prefix, null unless the date exists on the calendar
/// (`2017-02-31` and `2019-02-29` give null).
fn year_of(date_text: Expr) -> Expr {
    let text = date_text.str().strip_chars(lit(NULL));
    let part = |group: usize| {
        text.clone()
            .str()
            .extract(lit(DATE_PATTERN), group)
            .cast(DataType::Int32)
    };
    let (year, month, day) = (part(1), part(2), part(3));

    let leap = (year.clone() % lit(4))
        .eq(lit(0))
        .and((year.clone() % lit(100)).neq(lit(0)))
        .or((year.clone() % lit(400)).eq(lit(0)));
    let month_is = |m: i32| month.clone().eq(lit(m));
    let last_day = when(month_is(2))
        .then(when(leap).then(lit(29)).otherwise(lit(28)))
        .when(month_is(4).or(month_is(6)).or(month_is(9)).or(month_is(11)))
        .then(lit(30))
        .otherwise(lit(31));

    when(day.clone().is_null().or(day.lt_eq(last_day)))
        .then(year)
        .otherwise(lit(NULL).cast(DataType::Int32))
}

/// Expression form of [`DeviceStatus::classify`].
fn status_of(text: Expr) -> Expr {
    when(text.clone().eq(lit(DeviceStatus::Discontinued.as_str())))
        .then(lit(DeviceStatus::Discontinued.as_str()))
        .when(text.str().starts_with(lit(DeviceStatus::Available.as_str())))
        .then(lit(DeviceStatus::Available.as_str()))
        .otherwise(lit(DeviceStatus::Unknown.as_str()))
}
