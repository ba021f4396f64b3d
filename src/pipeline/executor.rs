//! Pipeline execution: runs every stage in fixed order over one catalog and
//! collects the named report tables together with a run report.

use super::report_set::{FIVE_G_LEADER_COUNT, LTE_4G_LEADER_COUNT, ReportName, ReportSet};
use crate::analytics::{
    brand_model_counts, discontinued_after, rank_by_partition, tag_leader, tagged, top_n,
};
use crate::catalog::schema::{HAS_5G, HAS_LTE_4G, require_schema};
use crate::catalog::{classify_lazy, drop_incomplete_lazy, normalize_lazy};
use crate::config::ReportConfig;
use crate::error::{Result, ResultExt as _};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::time::{Duration, Instant};

/// Report generated after pipeline execution
#[derive(Debug, Clone)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Records in the raw catalog
    pub rows_in: usize,

    /// Records that passed the completeness filter
    pub rows_retained: usize,

    /// Row count of every produced table, in production order
    pub table_rows: Vec<(String, usize)>,

    /// Time taken for execution
    pub duration: Duration,
}

impl RunReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_retained)
    }

    /// Create a summary message
    pub fn summary(&self) -> String {
        format!(
            "Pipeline completed: {} records ({} complete, {} dropped), {} tables, {:.2}s",
            self.rows_in,
            self.rows_retained,
            self.rows_dropped(),
            self.table_rows.len(),
            self.duration.as_secs_f64()
        )
    }
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub reports: ReportSet,
    pub run: RunReport,
}

/// Fixed-order composition of the catalog stages.
#[derive(Debug, Clone, Default)]
pub struct ReportPipeline {
    config: ReportConfig,
}

impl ReportPipeline {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run normalization, filtering, tagging, ranking and every report over
    /// `raw`.
    ///
    /// # Errors
    ///
    /// Fails before computing anything when the config is invalid or a
    /// declared column is missing, so neither yields a partial report set.
    pub fn run(&self, raw: DataFrame) -> Result<PipelineOutput> {
        let start = Instant::now();
        let started_at = Utc::now();
        let rows_in = raw.height();

        self.config.validate()?;
        require_schema(&raw.schema())?;
        tracing::info!(
            rows = rows_in,
            leader_count = ?self.config.leader_count,
            "Starting catalog pipeline"
        );

        let classified = classify_lazy(
            drop_incomplete_lazy(normalize_lazy(raw.lazy())?),
            &self.config.network_patterns,
        )
        .collect()
        .context("Failed to normalize catalog")?;

        let rows_retained = classified.height();
        tracing::info!(
            retained = rows_retained,
            dropped = rows_in - rows_retained,
            "Completeness filter applied"
        );
        if rows_retained == 0 && rows_in > 0 {
            tracing::warn!("No catalog record is complete; every report will be empty");
        }

        let ranked = rank_by_partition(&classified).context("Failed to rank catalog")?;

        let reports = self.build_reports(&classified, &ranked)?;

        let table_rows: Vec<(String, usize)> = reports
            .iter()
            .map(|(name, table)| (name.file_stem(), table.height()))
            .collect();
        for (name, rows) in &table_rows {
            tracing::debug!(table = %name, rows, "Report built");
        }

        let run = RunReport {
            started_at,
            rows_in,
            rows_retained,
            table_rows,
            duration: start.elapsed(),
        };
        tracing::info!("{}", run.summary());

        Ok(PipelineOutput { reports, run })
    }

    fn build_reports(&self, classified: &DataFrame, ranked: &DataFrame) -> Result<ReportSet> {
        let config = &self.config;
        let base = classified.clone().lazy();
        let mut reports = ReportSet::default();

        let lazy_reports = [
            (ReportName::BrandMarketShare, brand_model_counts(base.clone())),
            (ReportName::ModelsWith4gLte, tagged(base.clone(), HAS_LTE_4G)),
            (ReportName::ModelsWith5g, tagged(base.clone(), HAS_5G)),
            (
                ReportName::BrandWithMostModelsLte,
                tag_leader(
                    base.clone(),
                    HAS_LTE_4G,
                    LTE_4G_LEADER_COUNT,
                    config.leader_count,
                ),
            ),
            (
                ReportName::BrandWithMostModels5g,
                tag_leader(
                    base.clone(),
                    HAS_5G,
                    FIVE_G_LEADER_COUNT,
                    config.leader_count,
                ),
            ),
            (
                ReportName::DiscontinuedPhonesAfter(config.discontinued_after_year),
                discontinued_after(base, config.discontinued_after_year),
            ),
        ];

        for (name, lf) in lazy_reports {
            let table = lf
                .collect()
                .with_context(|| format!("Failed to build {name}"))?;
            reports.push(name, table);
        }

        for target in &config.ranking_targets {
            let name = ReportName::BestPhones(target.clone());
            let table = top_n(ranked.clone().lazy(), target, config.top_n)
                .collect()
                .with_context(|| format!("Failed to build {name}"))?;
            reports.push(name, table);
        }

        Ok(reports)
    }
}
