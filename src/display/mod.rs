//! Display formatting for terminal output
//!
//! Provides numeric formatting contracts and table views for the derived
//! view models.

pub mod report;
pub mod views;

pub use report::{format_amount, format_percentage, format_progress};
pub use views::{
    format_distribution, format_page, format_progress_summary, format_segments, format_shares,
};
