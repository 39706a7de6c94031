//! Export module for fundview
//!
//! Writes derived view models in several formats:
//! - CSV: transaction pages, category shares, distribution buckets
//! - JSON: any view model, wrapped in a versioned envelope
//! - YAML: the same envelope, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_distribution_csv, export_page_csv, export_shares_csv};
pub use json::{export_view_json, ViewExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_view_yaml;
