//! CSV boundary: loading the raw catalog and writing report tables.
//!
//! The engine itself only sees in-memory frames; these helpers are what the
//! command-line front end uses around it.

use crate::error::{CatalogError, Result, ResultExt as _};
use crate::pipeline::ReportSet;
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Read a catalog CSV with a header row, every column as text.
///
/// No type inference takes place: typing is the normalizer's job.
///
/// # Errors
///
/// Fails for a non-ASCII delimiter, an unreadable file or malformed CSV.
pub fn read_catalog(path: impl AsRef<Path>, delimiter: char) -> Result<DataFrame> {
    let path = path.as_ref();
    let separator = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| CatalogError::Config(format!("delimiter {delimiter:?} is not ASCII")))?;

    if !path.exists() {
        return Err(CatalogError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("catalog not found: {}", path.display()),
        )));
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_separator(separator)
        .finish()
        .and_then(LazyFrame::collect)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;

    tracing::info!(
        rows = df.height(),
        columns = df.width(),
        "Loaded catalog from {}",
        path.display()
    );
    Ok(df)
}

/// Write every table to `<dir>/<name>.csv`.
///
/// Target paths are checked before anything is written, so a refused run
/// leaves the directory untouched.
///
/// # Errors
///
/// Fails when two tables share a file name, when a target exists and
/// `overwrite` is false, or on any I/O error.
pub fn write_reports(
    reports: &mut ReportSet,
    dir: impl AsRef<Path>,
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let targets: Vec<PathBuf> = reports
        .iter()
        .map(|(name, _)| dir.join(format!("{}.csv", name.file_stem())))
        .collect();

    let mut unique = HashSet::with_capacity(targets.len());
    if let Some(duplicate) = targets.iter().find(|p| !unique.insert(*p)) {
        return Err(CatalogError::Config(format!(
            "Two reports map to the same file: {}",
            duplicate.display()
        )));
    }

    if !overwrite
        && let Some(existing) = targets.iter().find(|p| p.exists())
    {
        return Err(CatalogError::Other(format!(
            "Output file already exists and overwrite is false: {}",
            existing.display()
        )));
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    for ((name, table), path) in reports.iter_mut().zip(&targets) {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(table)
            .with_context(|| format!("Failed to write {name}"))?;
        tracing::debug!(rows = table.height(), "Wrote {}", path.display());
    }

    tracing::info!(tables = targets.len(), "Reports written to {}", dir.display());
    Ok(targets)
}
