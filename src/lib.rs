//! fundview - view models for budgeting dashboards
//!
//! This library turns loosely-typed financial records into ready-to-render
//! view models: category percentage shares, donut chart geometry, budget
//! progress status, randomized bucket distributions, and filtered, sorted,
//! paginated transaction tables. The derivations are pure functions; only
//! loading snapshots, reading settings, and writing exports can fail.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Input records, query parameters, numeric coercion
//! - `reports`: The derivations (aggregation, distribution, progress, tabular query, radial geometry)
//! - `display`: Terminal formatting of view models
//! - `export`: CSV, JSON and YAML export
//! - `snapshot`: Loading record snapshots from JSON or YAML files
//! - `cli`: Command handlers for the `fundview` binary
//!
//! # Example
//!
//! ```rust
//! use fundview::models::CategoryRecord;
//! use fundview::reports::aggregate;
//!
//! let shares = aggregate(&[
//!     CategoryRecord::new("rent", 750.0),
//!     CategoryRecord::new("food", 250.0),
//! ]);
//! assert_eq!(shares[0].percentage, 75.0);
//! assert_eq!(shares[1].percentage, 25.0);
//! ```

use std::sync::Once;

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod snapshot;

pub use error::{FundviewError, FundviewResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber once
///
/// Honors `RUST_LOG`; defaults to `fundview=warn`. Logs go to stderr so
/// JSON written to stdout stays parseable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fundview=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
