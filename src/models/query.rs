//! Query parameters for tabular views
//!
//! A `QuerySpec` is the complete, immutable description of one table query:
//! what to keep, how to order it, and which page to show. The same spec run
//! against the same records always yields the same page.
//!
//! The `with_*` builders return a new spec with the page index reset to 1,
//! which is what a caller wants whenever the filter or sort changes.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::transaction::TransactionStatus;

/// Sentinel meaning "do not filter on this column"
pub const ALL: &str = "all";

/// Either every value or one specific value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether a record value passes this selection
    ///
    /// A record without a value only passes `All`.
    pub fn admits(&self, value: Option<&T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value == Some(wanted),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            trimmed.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL),
            Self::Only(value) => write!(f, "{}", value),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL),
            Self::Only(value) => serializer.collect_str(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(Self::All),
            Some(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// Column a table can be ordered by
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortKey {
    Amount,
    Name,
    Account,
    #[default]
    Date,
    /// A key this engine has no comparator for; rows keep their order
    Other(String),
}

impl SortKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Amount => "amount",
            Self::Name => "name",
            Self::Account => "account",
            Self::Date => "date",
            Self::Other(key) => key,
        }
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "amount" => Self::Amount,
            "name" => Self::Name,
            "account" => Self::Account,
            "date" => Self::Date,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Row filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-insensitive substring; empty matches everything
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub status_filter: Selection<TransactionStatus>,
    #[serde(default)]
    pub account_filter: Selection<String>,
}

/// Ordering
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default)]
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page window; `index` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default = "default_page_index")]
    pub index: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
}

fn default_page_index() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            index: default_page_index(),
            size: default_page_size(),
        }
    }
}

impl PageSpec {
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }
}

/// Complete description of one table query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub sort: SortSpec,
    #[serde(default)]
    pub page: PageSpec,
}

impl QuerySpec {
    /// Create a spec with no filter, default sort and the given page size
    pub fn with_page_size(size: usize) -> Self {
        Self {
            page: PageSpec::new(1, size),
            ..Self::default()
        }
    }

    /// Replace the search term and go back to the first page
    pub fn with_search(&self, term: impl Into<String>) -> Self {
        let mut next = self.first_page();
        next.filter.search_term = term.into();
        next
    }

    /// Replace the status filter and go back to the first page
    pub fn with_status(&self, status: Selection<TransactionStatus>) -> Self {
        let mut next = self.first_page();
        next.filter.status_filter = status;
        next
    }

    /// Replace the account filter and go back to the first page
    pub fn with_account(&self, account: Selection<String>) -> Self {
        let mut next = self.first_page();
        next.filter.account_filter = account;
        next
    }

    /// Replace the ordering and go back to the first page
    pub fn with_sort(&self, key: SortKey, direction: SortDirection) -> Self {
        let mut next = self.first_page();
        next.sort = SortSpec::new(key, direction);
        next
    }

    /// Column-header click: same key flips direction, a new key sorts ascending
    pub fn toggle_sort(&self, key: SortKey) -> Self {
        let direction = if self.sort.key == key {
            self.sort.direction.flipped()
        } else {
            SortDirection::Asc
        };
        self.with_sort(key, direction)
    }

    /// Move to another page, keeping filter and sort
    pub fn at_page(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.page.index = index;
        next
    }

    fn first_page(&self) -> Self {
        self.at_page(1)
    }
}
