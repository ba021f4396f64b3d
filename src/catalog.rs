//! Record-level stages: schema, normalization, completeness and tagging.

pub mod classify;
pub mod filter;
pub mod normalize;
pub mod schema;

pub use classify::{NetworkPatterns, classify, classify_lazy};
pub use filter::{drop_incomplete, drop_incomplete_lazy};
pub use normalize::{normalize, normalize_lazy};
pub use schema::{
    DERIVED_COLUMNS, DeviceStatus, FIELDS, REQUIRED_FIELDS, SCHEMA_VERSION, check_schema,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use polars::prelude::*;

    /// One catalog line as the provider exports it, every cell as text.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct RawRow {
        pub brand: &'static str,
        pub model: &'static str,
        pub memory: &'static str,
        pub battery: &'static str,
        pub cpu: &'static str,
        pub network: &'static str,
        pub os: &'static str,
        pub announced: &'static str,
        pub status: &'static str,
    }

    impl RawRow {
        pub(crate) fn phone(brand: &'static str, model: &'static str) -> Self {
            Self {
                brand,
                model,
                memory: "128",
                battery: "4000",
                cpu: "Snap1",
                network: "4G, LTE",
                os: "Android",
                announced: "2019-03-01",
                status: "Available",
            }
        }
    }

    pub(crate) fn raw_frame(rows: &[RawRow]) -> DataFrame {
        let column = |name: &str, cell: fn(&RawRow) -> &'static str| {
            Column::new(name.into(), rows.iter().map(cell).collect::<Vec<_>>())
        };
        DataFrame::new(vec![
            column("Brand", |r| r.brand),
            column("Model", |r| r.model),
            column("Internal_memory", |r| r.memory),
            column("Battery", |r| r.battery),
            column("CPU", |r| r.cpu),
            column("Network", |r| r.network),
            column("Operating_System", |r| r.os),
            column("Announced", |r| r.announced),
            column("Status", |r| r.status),
        ])
        .expect("fixture columns share a length")
    }
}
