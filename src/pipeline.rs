//! Fixed-order report pipeline over one device catalog.
//!
//! # Overview
//!
//! A run is strictly forward:
//!
//! ```text
//! raw table -> normalize -> drop incomplete -> classify
//!                                                 ├─> rank ─> best_phones_<os>
//!                                                 ├─> brand counts / brand leaders
//!                                                 └─> network and discontinued reports
//! ```
//!
//! Each stage produces a new frame; nothing is mutated in place.
//!
//! # Example
//!
//! ```no_run
//! use handset::config::ReportConfig;
//! use handset::pipeline::{ReportName, ReportPipeline};
//!
//! let raw = handset::io::read_catalog("mobile_catalog.csv", ',')?;
//! let output = ReportPipeline::new(ReportConfig::default()).run(raw)?;
//!
//! if let Some(leader) = output.reports.leader(&ReportName::BrandWithMostModels5g)? {
//!     println!("{} leads 5G with {} models", leader.brand, leader.model_count);
//! }
//! println!("{}", output.run.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod executor;
pub mod report_set;

pub use executor::{PipelineOutput, ReportPipeline, RunReport};
pub use report_set::{FIVE_G_LEADER_COUNT, LTE_4G_LEADER_COUNT, ReportName, ReportSet};
