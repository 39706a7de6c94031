//! Budget progress classification
//!
//! Derives the status shown next to a plan's progress bar from its target,
//! net balance, income and expenses. Rules are checked in order:
//!
//! 1. no income and no expenses: "No Data", neutral tone
//! 2. net balance below zero: "Budget", alert tone
//! 3. net balance above the target (and above zero): "Gain", accent tone
//! 4. anything else: "Gain", accent tone
//!
//! Rules 3 and 4 share a label. The summary keeps `is_negative` and
//! `is_over_target` as separate flags so a view can still tell them apart.

use serde::Serialize;
use std::fmt;

use crate::config::ToneColors;
use crate::models::numeric::{finite_or_zero, safe_ratio};
use crate::models::BudgetPlanSnapshot;

/// Which classification rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressState {
    NoData,
    Negative,
    OverTarget,
    OnTrack,
}

/// Label shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgressStatus {
    #[serde(rename = "No Data")]
    NoData,
    Budget,
    Gain,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoData => "No Data",
            Self::Budget => "Budget",
            Self::Gain => "Gain",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Color role of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Alert,
    Accent,
}

impl Tone {
    /// Resolve the configured color for this tone
    pub fn color<'a>(&self, colors: &'a ToneColors) -> &'a str {
        match self {
            Self::Neutral => &colors.neutral,
            Self::Alert => &colors.alert,
            Self::Accent => &colors.accent,
        }
    }
}

/// Result of classifying one plan snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub state: ProgressState,
    pub status: ProgressStatus,
    pub tone: Tone,
    /// `|net / target| * 100`, or 0 without a positive target; not clamped
    pub progress_percent: f64,
    pub is_negative: bool,
    pub is_over_target: bool,
    /// Amount still needed to reach the target, never below zero
    pub remaining: f64,
}

impl ProgressSummary {
    /// Progress percentage capped at `ceiling` for progress bars
    pub fn display_percent(&self, ceiling: f64) -> f64 {
        self.progress_percent.min(ceiling).max(0.0)
    }
}

/// Classify a plan snapshot
pub fn classify(snapshot: &BudgetPlanSnapshot) -> ProgressSummary {
    let target = finite_or_zero(snapshot.target);
    let net = finite_or_zero(snapshot.net_amount());

    let is_negative = net < 0.0;
    let is_over_target = net > target && net > 0.0;

    let state = if !snapshot.has_activity() {
        ProgressState::NoData
    } else if is_negative {
        ProgressState::Negative
    } else if is_over_target {
        ProgressState::OverTarget
    } else {
        ProgressState::OnTrack
    };

    let (status, tone) = match state {
        ProgressState::NoData => (ProgressStatus::NoData, Tone::Neutral),
        ProgressState::Negative => (ProgressStatus::Budget, Tone::Alert),
        ProgressState::OverTarget | ProgressState::OnTrack => (ProgressStatus::Gain, Tone::Accent),
    };

    let progress_percent = if target > 0.0 {
        safe_ratio(net, target).abs() * 100.0
    } else {
        0.0
    };

    let remaining = if target > 0.0 {
        (target - net).max(0.0)
    } else {
        0.0
    };

    tracing::debug!(?state, progress_percent, "classified budget progress");

    ProgressSummary {
        state,
        status,
        tone,
        progress_percent,
        is_negative,
        is_over_target,
        remaining,
    }
}
