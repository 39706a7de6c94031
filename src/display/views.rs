//! Terminal rendering of view models
//!
//! Each function turns one derived view model into a table or short block of
//! text for the CLI.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{
    format_amount, format_bar, format_degrees, format_percentage, format_progress, separator,
    truncate,
};
use crate::config::Settings;
use crate::models::TransactionRecord;
use crate::reports::{
    percentage_drift, CategoryShare, DistributionResult, PieSegment, ProgressSummary, QueryResult,
    WedgePath,
};

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Category shares with a drift footer
pub fn format_shares(shares: &[CategoryShare], settings: &Settings) -> String {
    if shares.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = shares.iter().map(|s| ShareRow {
        category: truncate(&s.category, 30),
        amount: format_amount(s.total_amount, &settings.currency_symbol),
        percentage: format_percentage(s.percentage),
        bar: format_bar(s.percentage, 100.0, 20),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');

    let drift = percentage_drift(shares);
    if drift != 0.0 {
        output.push_str(&format!("Rounding drift: {:+.0} points\n", drift));
    }
    output
}

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "Segment")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Path")]
    path: String,
}

/// Pie segments alongside their wedge outlines
pub fn format_segments(segments: &[PieSegment], wedges: &[WedgePath]) -> String {
    if segments.is_empty() {
        return "No segments to draw.\n".to_string();
    }

    let rows = segments.iter().zip(wedges).map(|(s, w)| SegmentRow {
        name: truncate(&s.name, 24),
        color: s.color.clone(),
        percentage: format_percentage(s.percentage),
        start: format_degrees(s.start_angle),
        end: format_degrees(s.end_angle),
        path: w.to_svg_path(),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Bucket")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Distribution buckets with optional labels and a total line
pub fn format_distribution(
    result: &DistributionResult,
    labels: &[String],
    settings: &Settings,
) -> String {
    if result.is_empty() {
        return "No buckets.\n".to_string();
    }

    let rows = result.buckets.iter().enumerate().map(|(i, amount)| BucketRow {
        label: labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| (i + 1).to_string()),
        amount: format_amount(*amount, &settings.currency_symbol),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format!(
        "Total: {}\n",
        format_amount(result.sum(), &settings.currency_symbol)
    ));
    output
}

/// Progress status block
pub fn format_progress_summary(summary: &ProgressSummary, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Status:    {} ({})\n",
        summary.status,
        summary.tone.color(&settings.tones)
    ));
    output.push_str(&format!(
        "Progress:  {} {}\n",
        format_progress(summary.progress_percent),
        format_bar(summary.display_percent(100.0), 100.0, 20)
    ));
    output.push_str(&format!(
        "Remaining: {}\n",
        format_amount(summary.remaining, &settings.currency_symbol)
    ));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("Negative:    {}\n", summary.is_negative));
    output.push_str(&format!("Over target: {}\n", summary.is_over_target));
    output
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// One page of transactions with a page footer
pub fn format_page(result: &QueryResult<'_, TransactionRecord>, settings: &Settings) -> String {
    if result.total_count == 0 {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    if result.is_empty() {
        output.push_str("(page is empty)\n");
    } else {
        let rows = result.page_items.iter().map(|t| TransactionRow {
            id: truncate(&t.id, 12),
            date: match &t.time {
                Some(time) => format!("{} {}", t.date, time),
                None => t.date.clone(),
            },
            name: truncate(&t.name, 24),
            account: t.account.clone().unwrap_or_default(),
            status: t
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            amount: format_amount(t.amount, &settings.currency_symbol),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    output.push_str(&format!(
        "Page {} of {} ({} matching)\n",
        result.page_index, result.total_pages, result.total_count
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPlanSnapshot, CategoryRecord, QuerySpec, TransactionStatus};
    use crate::reports::{aggregate, build_pie, classify, distribute, query, DonutGeometry, SeededVariance};

    #[test]
    fn test_format_shares_shows_drift() {
        let shares = aggregate(&[
            CategoryRecord::new("a", 1.0),
            CategoryRecord::new("b", 1.0),
            CategoryRecord::new("c", 1.0),
        ]);
        let output = format_shares(&shares, &Settings::default());

        assert!(output.contains("Category"));
        assert!(output.contains("33%"));
        assert!(output.contains("Rounding drift: -1 points"));
    }

    #[test]
    fn test_format_shares_empty() {
        assert_eq!(format_shares(&[], &Settings::default()), "No categories found.\n");
    }

    #[test]
    fn test_format_segments() {
        let segments = build_pie(
            &[CategoryRecord::new("rent", 50.0), CategoryRecord::new("food", 50.0)],
            &Settings::default().palette,
        );
        let wedges = DonutGeometry::default().wedges(&segments);
        let output = format_segments(&segments, &wedges);

        assert!(output.contains("rent"));
        assert!(output.contains("180.0°"));
        assert!(output.contains("M "));
    }

    #[test]
    fn test_format_distribution_total() {
        let result = distribute(1200.0, 3, &mut SeededVariance::new(1));
        let labels = vec!["Jan".to_string(), "Feb".to_string()];
        let output = format_distribution(&result, &labels, &Settings::default());

        assert!(output.contains("Jan"));
        assert!(output.contains("Total: $1,200.00"));
    }

    #[test]
    fn test_format_progress_summary() {
        let summary = classify(&BudgetPlanSnapshot::new(1000.0, -50.0, 500.0, 550.0));
        let output = format_progress_summary(&summary, &Settings::default());

        assert!(output.contains("Status:    Budget"));
        assert!(output.contains("5.0%"));
        assert!(output.contains("Negative:    true"));
    }

    #[test]
    fn test_format_page() {
        let records = vec![
            TransactionRecord::new("t1", "Landlord", "2025-03-01", -750.0)
                .with_status(TransactionStatus::Completed)
                .with_account("Checking"),
        ];
        let result = query(&records, &QuerySpec::default());
        let output = format_page(&result, &Settings::default());

        assert!(output.contains("Landlord"));
        assert!(output.contains("-$750.00"));
        assert!(output.contains("Page 1 of 1 (1 matching)"));

        let beyond = query(&records, &QuerySpec::default().at_page(5));
        assert!(format_page(&beyond, &Settings::default()).contains("(page is empty)"));
    }
}
