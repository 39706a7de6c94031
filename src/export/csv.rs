//! CSV Export functionality
//!
//! Exports tabular view models (transaction pages, category shares,
//! distribution buckets) in a spreadsheet-compatible form.

use std::io::Write;

use crate::error::FundviewResult;
use crate::models::TransactionRecord;
use crate::reports::{CategoryShare, DistributionResult, QueryResult};

/// Export one page of transactions
pub fn export_page_csv<W: Write>(
    result: &QueryResult<'_, TransactionRecord>,
    writer: W,
) -> FundviewResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "ID", "Date", "Time", "Name", "Description", "Account", "Category", "Type", "Status",
        "Amount",
    ])?;

    for txn in &result.page_items {
        let amount = format!("{:.2}", txn.amount);
        csv.write_record([
            txn.id.as_str(),
            txn.date.as_str(),
            txn.time.as_deref().unwrap_or(""),
            txn.name.as_str(),
            txn.description.as_deref().unwrap_or(""),
            txn.account.as_deref().unwrap_or(""),
            txn.category.as_deref().unwrap_or(""),
            txn.kind().as_str(),
            txn.status.map(|s| s.as_str()).unwrap_or(""),
            amount.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Export category shares
pub fn export_shares_csv<W: Write>(shares: &[CategoryShare], writer: W) -> FundviewResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Category", "Amount", "Percentage"])?;

    for share in shares {
        let amount = format!("{:.2}", share.total_amount);
        let percentage = format!("{:.0}", share.percentage);
        csv.write_record([share.category.as_str(), amount.as_str(), percentage.as_str()])?;
    }

    csv.flush()?;
    Ok(())
}

/// Export distribution buckets with their labels
pub fn export_distribution_csv<W: Write>(
    result: &DistributionResult,
    labels: &[String],
    writer: W,
) -> FundviewResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Bucket", "Amount"])?;

    for (i, amount) in result.buckets.iter().enumerate() {
        let label = labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| (i + 1).to_string());
        let amount = format!("{:.2}", amount);
        csv.write_record([label.as_str(), amount.as_str()])?;
    }

    csv.flush()?;
    Ok(())
}
