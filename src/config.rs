//! Report parameters, loaded from a JSON file or defaulted.

use crate::analytics::LeaderCountMode;
use crate::catalog::NetworkPatterns;
use crate::error::{CatalogError, Result, ResultExt as _};
use crate::pipeline::ReportName;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Number of best phones kept per ranking target
    #[serde(default = "default_top_n")]
    pub top_n: u32,

    /// Operating systems that get a best-phones table, matched exactly
    #[serde(default = "default_ranking_targets")]
    pub ranking_targets: Vec<String>,

    /// Patterns behind the `hasLTE4G` and `has5G` tags
    #[serde(default)]
    pub network_patterns: NetworkPatterns,

    /// Discontinued devices must be announced strictly after this year
    #[serde(default = "default_discontinued_after_year")]
    pub discontinued_after_year: i32,

    /// Records counted when picking the brand leader of each network tag
    #[serde(default)]
    pub leader_count: LeaderCountMode,

    /// Field delimiter of the input catalog
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            ranking_targets: default_ranking_targets(),
            network_patterns: NetworkPatterns::default(),
            discontinued_after_year: default_discontinued_after_year(),
            leader_count: LeaderCountMode::default(),
            delimiter: default_delimiter(),
        }
    }
}

impl ReportConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid JSON, or does not
    /// pass [`ReportConfig::validate`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    /// Use `path` if given, then the per-user config file if present, then
    /// defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Using config at {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] for a zero `top_n`, an empty or blank
    /// target list, two targets sharing a table name (`iOS` and `IOS`), or a
    /// pattern that does not compile.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(CatalogError::Config("top_n must be at least 1".to_owned()));
        }
        if self.ranking_targets.is_empty() {
            return Err(CatalogError::Config(
                "ranking_targets must name at least one operating system".to_owned(),
            ));
        }
        if self.ranking_targets.iter().any(|t| t.trim().is_empty()) {
            return Err(CatalogError::Config(
                "ranking_targets must not contain blank names".to_owned(),
            ));
        }
        let mut tables = HashSet::new();
        for target in &self.ranking_targets {
            let table = ReportName::BestPhones(target.clone()).file_stem();
            if !tables.insert(table.clone()) {
                return Err(CatalogError::Config(format!(
                    "ranking target {target:?} collides with another target on table {table}"
                )));
            }
        }
        self.network_patterns.validate()
    }
}

/// `<config dir>/handset/config.json`, e.g. `~/.config/handset/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("handset").join("config.json"))
}

fn default_top_n() -> u32 {
    5
}

fn default_ranking_targets() -> Vec<String> {
    vec!["iOS".to_owned(), "Android".to_owned()]
}

fn default_discontinued_after_year() -> i32 {
    2015
}

fn default_delimiter() -> char {
    ','
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() -> Result<()> {
        let config = ReportConfig::from_json("{}")?;
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.top_n, 5);
        assert_eq!(config.ranking_targets, vec!["iOS", "Android"]);
        assert_eq!(config.discontinued_after_year, 2015);
        assert_eq!(config.leader_count, LeaderCountMode::TaggedOnly);
        Ok(())
    }

    #[test]
    fn test_partial_override() -> Result<()> {
        let config = ReportConfig::from_json(
            r#"{ "top_n": 3, "leader_count": "all_models", "network_patterns": { "five_g": "5G|NR" } }"#,
        )?;
        assert_eq!(config.top_n, 3);
        assert_eq!(config.leader_count, LeaderCountMode::AllModels);
        assert_eq!(config.network_patterns.five_g, "5G|NR");
        assert_eq!(config.network_patterns.lte_4g, "4G|LTE");
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ReportConfig::from_json(r#"{ "top_n": 0 }"#),
            Err(CatalogError::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_json(r#"{ "ranking_targets": [] }"#),
            Err(CatalogError::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_json(r#"{ "network_patterns": { "lte_4g": "(" } }"#),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn test_targets_sharing_a_table_name_rejected() {
        let config = ReportConfig {
            ranking_targets: vec!["iOS".to_owned(), "IOS".to_owned()],
            ..ReportConfig::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::Config(_))));

        let exact_repeat = ReportConfig {
            ranking_targets: vec!["Android".to_owned(), "Android".to_owned()],
            ..ReportConfig::default()
        };
        assert!(exact_repeat.validate().is_err());

        let distinct = ReportConfig {
            ranking_targets: vec!["Windows Phone".to_owned(), "Windows".to_owned()],
            ..ReportConfig::default()
        };
        assert!(distinct.validate().is_ok());
    }

    #[test]
    fn test_file_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("config.json");
        let config = ReportConfig {
            top_n: 10,
            ..ReportConfig::default()
        };

        config.to_file(&path)?;

        assert_eq!(ReportConfig::from_file(&path)?, config);
        Ok(())
    }
}
