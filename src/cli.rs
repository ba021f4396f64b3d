use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use handset::catalog::{SCHEMA_VERSION, check_schema};
use handset::config::{ReportConfig, default_config_path};
use handset::io::{read_catalog, write_reports};
use handset::pipeline::{ReportName, ReportPipeline};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "handset", version, about = "Mobile device catalog reports")]
pub struct Cli {
    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info", env = "HANDSET_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every report table from a catalog CSV
    Run {
        /// Catalog CSV with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Directory receiving one CSV per report
        #[arg(short, long)]
        output: PathBuf,

        /// Path to a JSON report configuration. Defaults to the per-user config if present.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Replace report files that already exist
        #[arg(long)]
        overwrite: bool,

        /// Override the number of rows kept per best-phones table
        #[arg(long)]
        top_n: Option<u32>,
    },
    /// Show which declared catalog columns an input provides
    InspectSchema {
        /// Catalog CSV with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Path to a JSON report configuration (for the delimiter)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the default report configuration as JSON
    InitConfig {
        /// Target file. Defaults to the per-user config location.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            input,
            output,
            config,
            overwrite,
            top_n,
        } => handle_run(&input, &output, config.as_deref(), overwrite, top_n),
        Commands::InspectSchema { input, config } => handle_inspect(&input, config.as_deref()),
        Commands::InitConfig { output, force } => handle_init_config(output, force),
    }
}

fn handle_run(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
    overwrite: bool,
    top_n: Option<u32>,
) -> Result<()> {
    let mut config =
        ReportConfig::load_or_default(config_path).context("Failed to load report config")?;
    if let Some(n) = top_n {
        config.top_n = n;
        config.validate()?;
    }

    println!("Reading {}...", input.display());
    let raw = read_catalog(input, config.delimiter)?;

    let pipeline = ReportPipeline::new(config);
    let mut output_set = pipeline.run(raw)?;

    let written = write_reports(&mut output_set.reports, output, overwrite)?;
    for ((name, table), path) in output_set.reports.iter().zip(&written) {
        println!("  {name:<36} {:>6} rows  {}", table.height(), path.display());
    }

    for name in [
        ReportName::BrandWithMostModelsLte,
        ReportName::BrandWithMostModels5g,
    ] {
        match output_set.reports.leader(&name)? {
            Some(leader) => println!("{name}: {} ({})", leader.brand, leader.model_count),
            None => println!("{name}: no tagged models"),
        }
    }

    println!("{}", output_set.run.summary());
    if let Ok(log_path) = handset::logging::get_current_log_path() {
        println!("Log: {}", log_path.display());
    }
    Ok(())
}

fn handle_inspect(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config =
        ReportConfig::load_or_default(config_path).context("Failed to load report config")?;
    let raw = read_catalog(input, config.delimiter)?;
    let check = check_schema(&raw.schema());

    println!(
        "{}: {} rows, {} columns (catalog schema v{SCHEMA_VERSION})",
        input.display(),
        raw.height(),
        raw.width()
    );
    for (field, column) in &check.present {
        println!("  ok       {field:<16} <- {column}");
    }
    for column in &check.missing {
        println!("  missing  {column}");
    }
    for column in &check.shadowed {
        println!("  ignored  {column:<16} (recomputed by the pipeline)");
    }

    if !check.is_complete() {
        anyhow::bail!(
            "{} declared column(s) missing; `run` would fail",
            check.missing.len()
        );
    }
    Ok(())
}

fn handle_init_config(output: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match output {
        Some(path) => path,
        None => default_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine the config directory"))?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to replace it",
            path.display()
        );
    }

    ReportConfig::default().to_file(&path)?;
    println!("Default config written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_arguments_parse() {
        let cli = Cli::try_parse_from([
            "handset", "run", "-i", "phones.csv", "-o", "out", "--top-n", "3", "--overwrite",
        ])
        .expect("arguments are valid");

        match cli.command {
            Commands::Run {
                input,
                top_n,
                overwrite,
                config,
                ..
            } => {
                assert_eq!(input, PathBuf::from("phones.csv"));
                assert_eq!(top_n, Some(3));
                assert!(overwrite);
                assert!(config.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_init_config_refuses_existing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");

        handle_init_config(Some(path.clone()), false)?;
        assert!(ReportConfig::from_file(&path).is_ok());
        assert!(handle_init_config(Some(path.clone()), false).is_err());
        assert!(handle_init_config(Some(path), true).is_ok());
        Ok(())
    }
}
