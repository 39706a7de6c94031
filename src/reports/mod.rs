//! Reports module for fundview
//!
//! The derivation core: pure functions turning snapshot records into view
//! models. Category shares, bucket distributions, progress status, paged
//! transaction tables and donut geometry.

pub mod aggregation;
pub mod distribution;
pub mod progress;
pub mod radial;
pub mod tabular;

pub use aggregation::{aggregate, category_totals, percentage_drift, CategoryShare};
pub use distribution::{
    distribute, monthly_labels, DistributionAllocator, DistributionResult, SeededVariance,
    SystemVariance, VarianceSource,
};
pub use progress::{classify, ProgressState, ProgressStatus, ProgressSummary, Tone};
pub use radial::{
    build_pie, cumulative_angles, map_segments, DonutGeometry, PieSegment, Point, WedgePath,
};
pub use tabular::{account_options, filter_and_sort, query, QueryResult, Tabular};
