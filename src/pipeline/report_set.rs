//! Named output tables of one pipeline run.

use crate::analytics::BrandLeader;
use crate::error::Result;
use polars::prelude::*;
use std::fmt;

/// Count column of `brand_with_most_models_lte`.
pub const LTE_4G_LEADER_COUNT: &str = "lte4gModelCount";
/// Count column of `brand_with_most_models_5g`.
pub const FIVE_G_LEADER_COUNT: &str = "fiveGModelCount";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReportName {
    BrandMarketShare,
    ModelsWith4gLte,
    ModelsWith5g,
    BrandWithMostModelsLte,
    BrandWithMostModels5g,
    DiscontinuedPhonesAfter(i32),
    BestPhones(String),
}

impl ReportName {
    /// Table name, also used as the export file stem.
    pub fn file_stem(&self) -> String {
        match self {
            Self::BrandMarketShare => "brand_market_share".to_owned(),
            Self::ModelsWith4gLte => "models_with_4g_lte".to_owned(),
            Self::ModelsWith5g => "models_with_5g".to_owned(),
            Self::BrandWithMostModelsLte => "brand_with_most_models_lte".to_owned(),
            Self::BrandWithMostModels5g => "brand_with_most_models_5g".to_owned(),
            Self::DiscontinuedPhonesAfter(year) => format!("discontinued_phones_after_{year}"),
            Self::BestPhones(os) => format!("best_phones_{}", slug(os)),
        }
    }
}

impl fmt::Display for ReportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_stem())
    }
}

/// Lowercase ASCII alphanumerics, everything else folded to `_`.
fn slug(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Report tables in production order.
#[derive(Debug, Clone, Default)]
pub struct ReportSet {
    tables: Vec<(ReportName, DataFrame)>,
}

impl ReportSet {
    pub fn push(&mut self, name: ReportName, table: DataFrame) {
        self.tables.push((name, table));
    }

    pub fn get(&self, name: &ReportName) -> Option<&DataFrame> {
        self.tables
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, table)| table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReportName, &DataFrame)> {
        self.tables.iter().map(|(name, table)| (name, table))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ReportName, &mut DataFrame)> {
        self.tables.iter_mut().map(|(name, table)| (&*name, table))
    }

    /// Typed view of a brand-leader table; `None` when the table is absent or
    /// empty.
    pub fn leader(&self, name: &ReportName) -> Result<Option<BrandLeader>> {
        let count_column = match name {
            ReportName::BrandWithMostModelsLte => LTE_4G_LEADER_COUNT,
            ReportName::BrandWithMostModels5g => FIVE_G_LEADER_COUNT,
            _ => return Ok(None),
        };
        match self.get(name) {
            Some(table) => BrandLeader::from_frame(table, count_column),
            None => Ok(None),
        }
    }
}
