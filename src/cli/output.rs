//! Output routing for CLI commands
//!
//! A command renders either a terminal table or a JSON envelope to stdout,
//! or writes an export file when `--output` is given.

use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{FundviewError, FundviewResult};

/// Stdout rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Versioned JSON envelope
    Json,
}

/// Export file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Pick the export encoding from the file extension, falling back to
    /// `default` when the extension is missing or unknown
    pub fn from_path(path: &Path, default: ExportFormat) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => ExportFormat::Csv,
            Some("json") => ExportFormat::Json,
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => default,
        }
    }
}

/// Global output options shared by every report command
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl OutputOptions {
    pub fn new(format: OutputFormat, output: Option<PathBuf>) -> Self {
        Self { format, output }
    }
}

/// Create an export file, wrapped for buffered writing
pub fn create_export_file(path: &Path) -> FundviewResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        FundviewError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
