//! # handset - Mobile Device Catalog Reports
//!
//! `handset` turns a raw mobile-device catalog (one CSV row per phone model)
//! into a fixed set of derived report tables: brand market share, 4G/LTE and
//! 5G model lists, the brand leading each network tag, phones discontinued
//! after a cutoff year and the best-ranked phones per operating system.
//!
//! ## Quick Start
//!
//! ```no_run
//! use handset::config::ReportConfig;
//! use handset::pipeline::ReportPipeline;
//!
//! let raw = handset::io::read_catalog("mobile_catalog.csv", ',')?;
//! let mut output = ReportPipeline::new(ReportConfig::default()).run(raw)?;
//!
//! for (name, table) in output.reports.iter() {
//!     println!("{name}: {} rows", table.height());
//! }
//! handset::io::write_reports(&mut output.reports, "reports", true)?;
//! # Ok::<(), handset::error::CatalogError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`catalog`]: Record-level stages
//!   - [`catalog::schema`]: Declared fields, raw column names, device status
//!   - [`catalog::normalize`]: Empty-to-null, integer and year parsing
//!   - [`catalog::filter`]: Completeness filter
//!   - [`catalog::classify`]: 4G/LTE and 5G tagging
//! - [`analytics`]: Table-level stages (ranking, brand counts, report filters)
//! - [`pipeline`]: Fixed-order composition producing the named report set
//! - [`config`]: JSON report configuration
//! - [`io`]: CSV input and report export
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Error types and handling utilities
//!
//! ## Lazy Evaluation
//!
//! Every stage except ranking is expressed over Polars' `LazyFrame`, so
//! normalization, filtering and tagging are fused into one query plan that
//! runs once per pipeline invocation.

#![warn(clippy::all, rust_2018_idioms)]

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod pipeline;
