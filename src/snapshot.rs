//! Snapshot loading
//!
//! Reads record snapshots (category totals, transactions, a budget plan)
//! from disk. Files ending in `.yaml` or `.yml` are parsed as YAML, anything
//! else as JSON. Numeric fields are coerced by the models themselves, so a
//! snapshot only fails to load when its structure is wrong.

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{FundviewError, FundviewResult};

/// Snapshot encodings understood by [`load_snapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

/// Load a snapshot of type `T` from `path`
pub fn load_snapshot<T: DeserializeOwned>(path: &Path) -> FundviewResult<T> {
    let file = File::open(path).map_err(|e| {
        FundviewError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let format = SnapshotFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "loading snapshot");

    let value = match format {
        SnapshotFormat::Json => serde_json::from_reader(reader)?,
        SnapshotFormat::Yaml => serde_yaml::from_reader(reader)?,
    };
    Ok(value)
}

/// Parse a snapshot from an in-memory string
pub fn parse_snapshot<T: DeserializeOwned>(contents: &str, format: SnapshotFormat) -> FundviewResult<T> {
    let value = match format {
        SnapshotFormat::Json => serde_json::from_str(contents)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(value)
}
