//! Category totals
//!
//! One row per spending or income category for a period, as delivered by the
//! data layer. Labels are expected to be unique already.

use serde::{Deserialize, Serialize};

use super::numeric;

/// Label used when a transaction carries no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Total amount recorded against a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    /// Category label
    #[serde(default, deserialize_with = "numeric::lenient_string")]
    pub category: String,

    /// Sum of amounts for the category
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub total_amount: f64,
}

impl CategoryRecord {
    /// Create a new category record
    pub fn new(category: impl Into<String>, total_amount: f64) -> Self {
        Self {
            category: category.into(),
            total_amount: numeric::finite_or_zero(total_amount),
        }
    }
}
