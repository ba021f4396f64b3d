//! Network-generation tags derived from the free-text `network` field.

use super::schema::{HAS_5G, HAS_LTE_4G, NETWORK};
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Regular expressions matched against `network`. Matching is case-sensitive
/// and unanchored, so `"LTE only"` carries the LTE tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPatterns {
    #[serde(default = "default_lte_4g")]
    pub lte_4g: String,
    #[serde(default = "default_five_g")]
    pub five_g: String,
}

impl Default for NetworkPatterns {
    fn default() -> Self {
        Self {
            lte_4g: default_lte_4g(),
            five_g: default_five_g(),
        }
    }
}

impl NetworkPatterns {
    /// Compile both patterns once so a bad pattern surfaces at configuration
    /// time instead of mid-run.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that is not a valid regular expression.
    pub fn validate(&self) -> Result<()> {
        regex::Regex::new(&self.lte_4g)?;
        regex::Regex::new(&self.five_g)?;
        Ok(())
    }
}

fn default_lte_4g() -> String {
    "4G|LTE".to_owned()
}

fn default_five_g() -> String {
    "5G".to_owned()
}

fn tag(pattern: &str) -> Expr {
    col(NETWORK)
        .str()
        .contains(lit(pattern), true)
        .fill_null(lit(false))
}

/// Append `hasLTE4G` and `has5G`. The tags are computed independently and
/// `network` itself is left as is.
pub fn classify_lazy(lf: LazyFrame, patterns: &NetworkPatterns) -> LazyFrame {
    lf.with_columns([
        tag(&patterns.lte_4g).alias(HAS_LTE_4G),
        tag(&patterns.five_g).alias(HAS_5G),
    ])
}

pub fn classify(df: DataFrame, patterns: &NetworkPatterns) -> Result<DataFrame> {
    Ok(classify_lazy(df.lazy(), patterns).collect()?)
}
