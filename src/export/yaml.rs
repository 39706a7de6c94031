//! YAML Export functionality
//!
//! Same envelope as the JSON export, in a human-readable form.

use serde::Serialize;
use std::io::Write;

use super::json::ViewExport;
use crate::error::{FundviewError, FundviewResult};

/// Write a view model as YAML
pub fn export_view_yaml<T: Serialize, W: Write>(
    view: &str,
    data: T,
    writer: &mut W,
) -> FundviewResult<()> {
    let export = ViewExport::new(view, data);
    serde_yaml::to_writer(&mut *writer, &export)
        .map_err(|e| FundviewError::Export(format!("Failed to write YAML: {}", e)))?;
    Ok(())
}
