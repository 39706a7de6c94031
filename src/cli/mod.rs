//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the view-model derivations.

pub mod output;
pub mod report;

pub use output::{ExportFormat, OutputFormat, OutputOptions};
pub use report::{build_query_spec, handle_report_command, ReportCommands, ReportContext};
