//! JSON Export functionality
//!
//! Wraps any derived view model in a small versioned envelope so consumers
//! can tell what they are reading and which build produced it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{FundviewError, FundviewResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Versioned wrapper around an exported view model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewExport<T> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Which view this is (`shares`, `donut`, `query`, ...)
    pub view: String,

    pub data: T,
}

impl<T: Serialize> ViewExport<T> {
    pub fn new(view: impl Into<String>, data: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            view: view.into(),
            data,
        }
    }
}

/// Write a view model as pretty-printed JSON
pub fn export_view_json<T: Serialize, W: Write>(
    view: &str,
    data: T,
    writer: &mut W,
) -> FundviewResult<()> {
    let export = ViewExport::new(view, data);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| FundviewError::Export(format!("Failed to write JSON: {}", e)))?;
    writeln!(writer).map_err(|e| FundviewError::Export(e.to_string()))?;
    Ok(())
}
