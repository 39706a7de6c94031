//! Transaction record model
//!
//! Transactions as they arrive from the data layer: loosely typed, with
//! optional time, category and account. Records are read-only inputs; every
//! derivation borrows them and never mutates in place.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::numeric;

/// Settlement status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Settled
    Completed,
    /// Not yet settled
    #[default]
    Pending,
    /// Rejected or reversed
    Failed,
}

impl TransactionStatus {
    /// Lowercase key used in filters and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    /// Parse a status; unrecognized text yields `None`
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Pending => write!(f, "Pending"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" | "complete" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown transaction status: {}", other)),
        }
    }
}

/// Direction of money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "inflow" => Ok(Self::Income),
            "expense" | "outflow" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

/// A single transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Identifier as supplied by the data layer
    #[serde(default, deserialize_with = "numeric::lenient_string")]
    pub id: String,

    /// Display name (payee or title)
    #[serde(default, deserialize_with = "numeric::lenient_string")]
    pub name: String,

    /// Free-text description
    #[serde(
        default,
        deserialize_with = "numeric::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Calendar date, `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(default, deserialize_with = "numeric::lenient_string")]
    pub date: String,

    /// Time of day, `HH:MM` or `HH:MM:SS`
    #[serde(
        default,
        deserialize_with = "numeric::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,

    /// Amount; sign is not interpreted, see `kind`
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub amount: f64,

    /// Settlement status; `None` when the source used a status this crate
    /// does not know, so only an "all" filter admits the record
    #[serde(
        default = "default_status",
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<TransactionStatus>,

    /// Category label
    #[serde(
        default,
        deserialize_with = "numeric::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    /// Account label
    #[serde(
        default,
        deserialize_with = "numeric::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub account: Option<String>,

    /// Income or expense; inferred from the amount sign when absent
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<TransactionType>,
}

impl TransactionRecord {
    /// Create a new transaction with the required fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            date: date.into(),
            time: None,
            amount: numeric::finite_or_zero(amount),
            status: default_status(),
            category: None,
            account: None,
            transaction_type: None,
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    /// Effective type: the explicit one, else negative amounts are expenses
    pub fn kind(&self) -> TransactionType {
        match self.transaction_type {
            Some(kind) => kind,
            None if self.amount < 0.0 => TransactionType::Expense,
            None => TransactionType::Income,
        }
    }

    /// Combined date and time; a missing or unreadable time means midnight
    ///
    /// Returns `None` when the date itself cannot be read.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = self.date.trim();

        if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            let time = self
                .time
                .as_deref()
                .and_then(parse_time)
                .unwrap_or(NaiveTime::MIN);
            return Some(day.and_time(time));
        }

        // Full timestamps already carry their own time of day
        if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
            return Some(dt.naive_utc());
        }
        NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S"))
            .ok()
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// A record without a status field is still pending
fn default_status() -> Option<TransactionStatus> {
    Some(TransactionStatus::default())
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<TransactionStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = numeric::lenient_string(deserializer)?;
    Ok(TransactionStatus::parse_lenient(&raw))
}

fn lenient_type<'de, D>(deserializer: D) -> Result<Option<TransactionType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = numeric::lenient_string(deserializer)?;
    Ok(raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let txn: TransactionRecord = serde_json::from_str(
            r#"{
                "id": "tx-1",
                "name": "Landlord",
                "description": "March rent",
                "date": "2025-03-01",
                "time": "09:30",
                "amount": "-750",
                "status": "completed",
                "category": "rent",
                "account": "Checking",
                "type": "expense"
            }"#,
        )
        .unwrap();

        assert_eq!(txn.amount, -750.0);
        assert_eq!(txn.status, Some(TransactionStatus::Completed));
        assert_eq!(txn.kind(), TransactionType::Expense);
        assert_eq!(txn.account.as_deref(), Some("Checking"));
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let txn: TransactionRecord =
            serde_json::from_str(r#"{"id": 7, "status": "bogus", "type": null}"#).unwrap();

        assert_eq!(txn.id, "7");
        assert_eq!(txn.amount, 0.0);
        assert_eq!(txn.status, None);
        assert_eq!(txn.transaction_type, None);
        assert_eq!(txn.kind(), TransactionType::Income);
    }

    #[test]
    fn test_kind_inferred_from_sign() {
        let txn = TransactionRecord::new("1", "Coffee", "2025-01-02", -4.5);
        assert_eq!(txn.kind(), TransactionType::Expense);

        let txn = txn.with_type(TransactionType::Income);
        assert_eq!(txn.kind(), TransactionType::Income);
    }

    #[test]
    fn test_timestamp_defaults_to_midnight() {
        let txn = TransactionRecord::new("1", "A", "2025-01-02", 1.0);
        let ts = txn.timestamp().unwrap();
        assert_eq!(ts.to_string(), "2025-01-02 00:00:00");

        let txn = txn.with_time("14:05");
        assert_eq!(txn.timestamp().unwrap().to_string(), "2025-01-02 14:05:00");

        let txn = TransactionRecord::new("2", "B", "2025-01-02", 1.0).with_time("later");
        assert_eq!(txn.timestamp().unwrap().to_string(), "2025-01-02 00:00:00");
    }

    #[test]
    fn test_timestamp_rfc3339_and_garbage() {
        let txn = TransactionRecord::new("1", "A", "2025-01-02T08:15:00Z", 1.0);
        assert_eq!(txn.timestamp().unwrap().to_string(), "2025-01-02 08:15:00");

        let txn = TransactionRecord::new("2", "B", "yesterday", 1.0);
        assert!(txn.timestamp().is_none());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Completed".parse::<TransactionStatus>(), Ok(TransactionStatus::Completed));
        assert!("all".parse::<TransactionStatus>().is_err());
        assert_eq!(TransactionStatus::parse_lenient("nope"), None);
        assert_eq!(
            TransactionStatus::parse_lenient(" pending "),
            Some(TransactionStatus::Pending)
        );
    }

    #[test]
    fn test_missing_status_is_pending() {
        let txn: TransactionRecord = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
        assert_eq!(txn.status, Some(TransactionStatus::Pending));

        let txn: TransactionRecord =
            serde_json::from_str(r#"{"id": "b", "status": "cancelled"}"#).unwrap();
        assert_eq!(txn.status, None);
    }

    #[test]
    fn test_serialization_skips_empty_optionals() {
        let txn = TransactionRecord::new("1", "A", "2025-01-02", 10.0);
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("account"));
        assert!(json.contains(r#""status":"pending""#));
    }
}
