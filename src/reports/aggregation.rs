//! Category share aggregation
//!
//! Turns per-category totals into whole-number percentages of the grand
//! total, preserving input order.
//!
//! Each percentage is rounded on its own. There is no renormalization, so the
//! percentages of N categories can sum to anything within `100 ± N/2`;
//! `percentage_drift` reports how far off a given result is.

use serde::Serialize;

use crate::models::numeric::{finite_or_zero, round_half_up, safe_ratio};
use crate::models::{CategoryRecord, TransactionRecord, TransactionType, UNCATEGORIZED};

/// A category total with its share of the grand total
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub total_amount: f64,
    /// Whole-number percentage of the grand total
    pub percentage: f64,
}

/// Compute each category's share of the total
///
/// A zero total gives every category 0%.
pub fn aggregate(records: &[CategoryRecord]) -> Vec<CategoryShare> {
    let total: f64 = records
        .iter()
        .map(|r| finite_or_zero(r.total_amount))
        .sum();

    let shares: Vec<CategoryShare> = records
        .iter()
        .map(|record| {
            let amount = finite_or_zero(record.total_amount);
            CategoryShare {
                category: record.category.clone(),
                total_amount: amount,
                percentage: round_half_up(safe_ratio(amount, total) * 100.0),
            }
        })
        .collect();

    tracing::debug!(
        categories = shares.len(),
        total,
        drift = percentage_drift(&shares),
        "aggregated category shares"
    );

    shares
}

/// Sum of percentages minus 100; zero for an empty result
pub fn percentage_drift(shares: &[CategoryShare]) -> f64 {
    if shares.is_empty() {
        return 0.0;
    }
    shares.iter().map(|s| s.percentage).sum::<f64>() - 100.0
}

/// Group transactions of one type into category totals
///
/// Categories appear in the order they are first seen. Amounts are summed by
/// absolute value, so expense rows stored as negatives still produce positive
/// totals. Transactions without a category are grouped under
/// "Uncategorized".
pub fn category_totals(
    transactions: &[TransactionRecord],
    kind: TransactionType,
) -> Vec<CategoryRecord> {
    let mut totals: Vec<CategoryRecord> = Vec::new();

    for txn in transactions.iter().filter(|t| t.kind() == kind) {
        let label = txn
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);
        let amount = finite_or_zero(txn.amount).abs();

        match totals.iter_mut().find(|r| r.category == label) {
            Some(existing) => existing.total_amount += amount,
            None => totals.push(CategoryRecord::new(label, amount)),
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, amount: f64) -> CategoryRecord {
        CategoryRecord::new(category, amount)
    }

    #[test]
    fn test_simple_split() {
        let shares = aggregate(&[record("rent", 750.0), record("food", 250.0)]);

        let percentages: Vec<f64> = shares.iter().map(|s| s.percentage).collect();
        assert_eq!(percentages, vec![75.0, 25.0]);
        assert_eq!(shares[0].category, "rent");
        assert_eq!(shares[1].total_amount, 250.0);
    }

    #[test]
    fn test_empty_input() {
        let shares = aggregate(&[]);
        assert!(shares.is_empty());
        assert_eq!(percentage_drift(&shares), 0.0);
    }

    #[test]
    fn test_zero_total() {
        let shares = aggregate(&[record("a", 0.0), record("b", 0.0)]);
        assert!(shares.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn test_rounding_is_not_renormalized() {
        // 33.33..% each rounds down to 33, leaving the total at 99
        let shares = aggregate(&[record("a", 1.0), record("b", 1.0), record("c", 1.0)]);
        assert!(shares.iter().all(|s| s.percentage == 33.0));
        assert_eq!(percentage_drift(&shares), -1.0);

        // 16.66..% each rounds up to 17, leaving the total at 102
        let six: Vec<_> = (0..6).map(|i| record(&i.to_string(), 1.0)).collect();
        let shares = aggregate(&six);
        assert_eq!(percentage_drift(&shares), 2.0);
    }

    #[test]
    fn test_drift_is_bounded() {
        let records: Vec<_> = (1..=7).map(|i| record(&i.to_string(), i as f64 * 1.37)).collect();
        let shares = aggregate(&records);
        let bound = records.len() as f64 * 0.5;
        assert!(percentage_drift(&shares).abs() <= bound);
    }

    #[test]
    fn test_half_rounds_up() {
        // 12.5% and 87.5%
        let shares = aggregate(&[record("a", 1.0), record("b", 7.0)]);
        assert_eq!(shares[0].percentage, 13.0);
        assert_eq!(shares[1].percentage, 88.0);
    }

    #[test]
    fn test_non_finite_amount_treated_as_zero() {
        let mut broken = record("broken", 0.0);
        broken.total_amount = f64::INFINITY;
        let shares = aggregate(&[broken, record("ok", 10.0)]);
        assert_eq!(shares[0].percentage, 0.0);
        assert_eq!(shares[1].percentage, 100.0);
    }

    #[test]
    fn test_category_totals_groups_in_first_seen_order() {
        let txns = vec![
            TransactionRecord::new("1", "Grocer", "2025-01-01", -40.0).with_category("food"),
            TransactionRecord::new("2", "Landlord", "2025-01-01", -700.0).with_category("rent"),
            TransactionRecord::new("3", "Cafe", "2025-01-02", -10.0).with_category("food"),
            TransactionRecord::new("4", "Employer", "2025-01-03", 2000.0).with_category("salary"),
            TransactionRecord::new("5", "Kiosk", "2025-01-04", -5.0),
        ];

        let totals = category_totals(&txns, TransactionType::Expense);
        assert_eq!(
            totals,
            vec![
                record("food", 50.0),
                record("rent", 700.0),
                record(UNCATEGORIZED, 5.0),
            ]
        );

        let income = category_totals(&txns, TransactionType::Income);
        assert_eq!(income, vec![record("salary", 2000.0)]);
    }
}
