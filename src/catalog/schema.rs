//! Declared schema of the device catalog.
//!
//! The catalog is never type-inferred. Every field the engine understands is
//! listed here with its raw source column and the kind of coercion applied to
//! it. Column lookups accept either the raw name (as exported by the catalog
//! provider) or the canonical name produced by normalization.

use crate::error::{CatalogError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Bumped whenever a field is added, removed or re-typed.
pub const SCHEMA_VERSION: &str = "1";

pub const BRAND: &str = "brand";
pub const MODEL: &str = "model";
pub const STORAGE: &str = "storage";
pub const BATTERY_CAPACITY: &str = "batteryCapacity";
pub const PROCESSOR: &str = "processor";
pub const NETWORK: &str = "network";
pub const OPERATING_SYSTEM: &str = "operatingSystem";
pub const ANNOUNCED_DATE: &str = "announcedDate";
pub const ANNOUNCED_YEAR: &str = "announcedYear";
pub const STATUS: &str = "status";

pub const HAS_LTE_4G: &str = "hasLTE4G";
pub const HAS_5G: &str = "has5G";
pub const RANK: &str = "rank";
pub const MODEL_COUNT: &str = "modelCount";

/// Columns the engine derives itself. An input column with one of these
/// names is discarded during normalization and recomputed downstream.
pub const DERIVED_COLUMNS: [&str; 5] = [ANNOUNCED_YEAR, HAS_LTE_4G, HAS_5G, RANK, MODEL_COUNT];

/// Fields that must be non-null for a record to take part in any report.
pub const REQUIRED_FIELDS: [&str; 6] = [BRAND, MODEL, STORAGE, BATTERY_CAPACITY, PROCESSOR, NETWORK];

/// How a raw column is coerced during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text; empty string becomes null.
    Text,
    /// Integer parsed out of free text; unparsable becomes null.
    Integer,
    /// Lifecycle status mapped onto [`DeviceStatus`].
    Status,
}

/// One sourced column of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub source: &'static str,
    pub kind: FieldKind,
}

impl Field {
    const fn new(name: &'static str, source: &'static str, kind: FieldKind) -> Self {
        Self { name, source, kind }
    }

    /// Find the column backing this field, preferring the raw source name.
    pub fn resolve<'a>(&self, schema: &'a Schema) -> Option<&'a PlSmallStr> {
        schema
            .get_full(self.source)
            .or_else(|| schema.get_full(self.name))
            .map(|(_, name, _)| name)
    }
}

/// All sourced fields, in output column order. `announcedYear` is derived
/// from `announcedDate` and is inserted right after it.
pub const FIELDS: [Field; 9] = [
    Field::new(BRAND, "Brand", FieldKind::Text),
    Field::new(MODEL, "Model", FieldKind::Text),
    Field::new(STORAGE, "Internal_memory", FieldKind::Integer),
    Field::new(BATTERY_CAPACITY, "Battery", FieldKind::Integer),
    Field::new(PROCESSOR, "CPU", FieldKind::Text),
    Field::new(NETWORK, "Network", FieldKind::Text),
    Field::new(OPERATING_SYSTEM, "Operating_System", FieldKind::Text),
    Field::new(ANNOUNCED_DATE, "Announced", FieldKind::Text),
    Field::new(STATUS, "Status", FieldKind::Status),
];

/// Lifecycle status of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceStatus {
    Available,
    Discontinued,
    Unknown,
}

impl DeviceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Discontinued => "Discontinued",
            Self::Unknown => "Unknown",
        }
    }

    /// Map raw status text onto a status. Catalog entries read like
    /// `"Available. Released 2019, March"`, so availability is a prefix match;
    /// discontinuation must be exact.
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            Some("Discontinued") => Self::Discontinued,
            Some(text) if text.starts_with("Available") => Self::Available,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presence report for every declared field against an input schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaCheck {
    pub present: Vec<(&'static str, String)>,
    pub missing: Vec<&'static str>,
    /// Input columns named like a derived column; they are replaced.
    pub shadowed: Vec<String>,
}

impl SchemaCheck {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Match the declared fields against `schema` without failing.
pub fn check_schema(schema: &Schema) -> SchemaCheck {
    let mut check = SchemaCheck::default();
    for field in &FIELDS {
        match field.resolve(schema) {
            Some(column) => check.present.push((field.name, column.to_string())),
            None => check.missing.push(field.source),
        }
    }
    check.shadowed = schema
        .iter_names()
        .filter(|name| DERIVED_COLUMNS.contains(&name.as_str()))
        .map(ToString::to_string)
        .collect();
    check
}

/// Fail when any declared field has no backing column.
///
/// # Errors
///
/// Returns [`CatalogError::SchemaMismatch`] naming every missing raw column.
pub fn require_schema(schema: &Schema) -> Result<()> {
    let check = check_schema(schema);
    if check.is_complete() {
        Ok(())
    } else {
        Err(CatalogError::SchemaMismatch {
            missing: check.missing.iter().map(|s| (*s).to_owned()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_schema(names: &[&str]) -> Schema {
        names
            .iter()
            .map(|n| polars::prelude::Field::new((*n).into(), DataType::String))
            .collect()
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(
            DeviceStatus::classify(Some("Discontinued")),
            DeviceStatus::Discontinued
        );
        assert_eq!(
            DeviceStatus::classify(Some("Available. Released 2020, May")),
            DeviceStatus::Available
        );
        assert_eq!(
            DeviceStatus::classify(Some("discontinued")),
            DeviceStatus::Unknown
        );
        assert_eq!(DeviceStatus::classify(None), DeviceStatus::Unknown);
    }

    #[test]
    fn test_status_classification_is_a_fixed_point() {
        for status in [
            DeviceStatus::Available,
            DeviceStatus::Discontinued,
            DeviceStatus::Unknown,
        ] {
            assert_eq!(DeviceStatus::classify(Some(status.as_str())), status);
        }
    }

    #[test]
    fn test_raw_and_canonical_names_both_resolve() {
        let raw = raw_schema(&["Brand"]);
        let canonical = raw_schema(&["brand"]);
        let brand = FIELDS[0];
        assert_eq!(brand.resolve(&raw).map(|s| s.as_str()), Some("Brand"));
        assert_eq!(brand.resolve(&canonical).map(|s| s.as_str()), Some("brand"));
    }

    #[test]
    fn test_require_schema_names_missing_columns() {
        let schema = raw_schema(&[
            "Brand",
            "Model",
            "Internal_memory",
            "Battery",
            "Network",
            "Operating_System",
            "Announced",
        ]);
        match require_schema(&schema) {
            Err(CatalogError::SchemaMismatch { missing }) => {
                assert_eq!(missing, vec!["CPU".to_owned(), "Status".to_owned()]);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_check_schema_reports_shadowed_columns() {
        let schema = raw_schema(&["Brand", "rank", "Price", "has5G"]);
        let check = check_schema(&schema);
        assert_eq!(check.shadowed, vec!["rank".to_owned(), "has5G".to_owned()]);
        assert!(!check.is_complete());
    }
}
