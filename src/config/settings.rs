//! User settings for fundview
//!
//! Presentation defaults the derivation core reads: the color palette for
//! donut wedges, the colors behind each progress tone, how many buckets a
//! distribution uses, page size, and the donut geometry.
//!
//! Every field has a serde default, so a partial `config.json` only
//! overrides what it names.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::paths::FundviewPaths;
use crate::error::FundviewError;

/// Colors behind each progress tone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneColors {
    /// No activity
    #[serde(default = "default_neutral")]
    pub neutral: String,
    /// Net balance below zero
    #[serde(default = "default_alert")]
    pub alert: String,
    /// Positive balance
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_neutral() -> String {
    "#9CA3AF".to_string()
}

fn default_alert() -> String {
    "#1F2937".to_string()
}

fn default_accent() -> String {
    "#10B981".to_string()
}

impl Default for ToneColors {
    fn default() -> Self {
        Self {
            neutral: default_neutral(),
            alert: default_alert(),
            accent: default_accent(),
        }
    }
}

/// Bucket distribution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSettings {
    /// Number of buckets (12 = one per month)
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
    /// Maximum relative deviation of a bucket from the even share
    #[serde(default = "default_variance_ratio")]
    pub variance_ratio: f64,
}

fn default_bucket_count() -> usize {
    12
}

fn default_variance_ratio() -> f64 {
    0.2
}

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            bucket_count: default_bucket_count(),
            variance_ratio: default_variance_ratio(),
        }
    }
}

/// Donut chart geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSettings {
    #[serde(default = "default_outer_radius")]
    pub outer_radius: f64,
    #[serde(default = "default_inner_radius")]
    pub inner_radius: f64,
    /// Angular spacing between wedges, in degrees
    #[serde(default = "default_gap_degrees")]
    pub gap_degrees: f64,
    #[serde(default = "default_center")]
    pub center_x: f64,
    #[serde(default = "default_center")]
    pub center_y: f64,
}

fn default_outer_radius() -> f64 {
    100.0
}

fn default_inner_radius() -> f64 {
    60.0
}

fn default_gap_degrees() -> f64 {
    2.0
}

fn default_center() -> f64 {
    110.0
}

impl Default for DonutSettings {
    fn default() -> Self {
        Self {
            outer_radius: default_outer_radius(),
            inner_radius: default_inner_radius(),
            gap_degrees: default_gap_degrees(),
            center_x: default_center(),
            center_y: default_center(),
        }
    }
}

/// User settings for fundview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Wedge colors, assigned in order and cycled
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    #[serde(default)]
    pub tones: ToneColors,

    #[serde(default)]
    pub distribution: DistributionSettings,

    /// Rows per page for transaction tables
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub donut: DonutSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_palette() -> Vec<String> {
    [
        "#6366F1", "#F59E0B", "#10B981", "#EF4444", "#3B82F6", "#EC4899", "#8B5CF6", "#14B8A6",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn default_page_size() -> usize {
    crate::models::DEFAULT_PAGE_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            palette: default_palette(),
            tones: ToneColors::default(),
            distribution: DistributionSettings::default(),
            page_size: default_page_size(),
            donut: DonutSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the resolved config directory, or defaults if absent
    ///
    /// Nothing is written; `save` persists settings explicitly.
    pub fn load(paths: &FundviewPaths) -> Result<Self, FundviewError> {
        Self::load_from(&paths.settings_file())
    }

    /// Load settings from an explicit file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, FundviewError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| FundviewError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            FundviewError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        if settings.palette.is_empty() {
            return Err(FundviewError::Config(
                "Settings palette must list at least one color".into(),
            ));
        }

        Ok(settings)
    }

    /// Save settings into the resolved config directory
    pub fn save(&self, paths: &FundviewPaths) -> Result<(), FundviewError> {
        paths.ensure_directories()?;
        self.save_to(&paths.settings_file())
    }

    /// Save settings to an explicit file, creating its parent directory
    pub fn save_to(&self, path: &Path) -> Result<(), FundviewError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                FundviewError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FundviewError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(path, contents)
            .map_err(|e| FundviewError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
