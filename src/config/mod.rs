//! Configuration module for fundview
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence
//! - Chart, table and distribution defaults

pub mod paths;
pub mod settings;

pub use paths::FundviewPaths;
pub use settings::{DistributionSettings, DonutSettings, Settings, ToneColors};
