//! Budget plan snapshot
//!
//! The figures a progress indicator needs for one plan: the savings or
//! spending target, the current net balance, and the period's gross income
//! and expenses.

use serde::{Deserialize, Serialize};

use super::numeric;

/// Point-in-time view of a budget plan
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlanSnapshot {
    /// Target amount for the plan
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub target: f64,

    /// Net amount (income minus expenses)
    #[serde(default, alias = "netAmount", deserialize_with = "numeric::lenient")]
    pub balance: f64,

    /// Gross income in the period
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub income: f64,

    /// Gross expenses in the period
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub expenses: f64,
}

impl BudgetPlanSnapshot {
    /// Create a snapshot, replacing non-finite figures with zero
    pub fn new(target: f64, balance: f64, income: f64, expenses: f64) -> Self {
        Self {
            target: numeric::finite_or_zero(target),
            balance: numeric::finite_or_zero(balance),
            income: numeric::finite_or_zero(income),
            expenses: numeric::finite_or_zero(expenses),
        }
    }

    /// Net amount of the plan
    pub fn net_amount(&self) -> f64 {
        self.balance
    }

    /// Whether any money moved in the period
    ///
    /// Non-finite figures count as no movement.
    pub fn has_activity(&self) -> bool {
        numeric::finite_or_zero(self.income) != 0.0
            || numeric::finite_or_zero(self.expenses) != 0.0
    }
}
