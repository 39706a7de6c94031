//! Tabular query engine
//!
//! Runs a `QuerySpec` over a borrowed record collection in three strict
//! steps: filter, then a stable sort, then a page slice. Records are never
//! copied or mutated; the page holds references into the caller's slice.
//!
//! A page index past the last page is not corrected: it simply produces an
//! empty page. Callers that change the filter or sort go back to page 1 via
//! the `QuerySpec::with_*` builders.

use serde::Serialize;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{
    PageSpec, QuerySpec, Selection, SortDirection, SortKey, TransactionRecord, TransactionStatus,
};

/// A record the query engine can filter and order
pub trait Tabular {
    /// Text fields matched by the search term
    fn search_fields(&self) -> Vec<&str>;

    fn status(&self) -> Option<TransactionStatus>;

    fn account(&self) -> Option<&str>;

    /// Whether `compare_by` has a comparator for `key`
    fn sortable(key: &SortKey) -> bool;

    /// Ascending comparison on `key`; only called when `sortable(key)` holds
    fn compare_by(&self, other: &Self, key: &SortKey) -> Ordering;
}

impl Tabular for TransactionRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.id.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.account.as_deref());
        fields
    }

    fn status(&self) -> Option<TransactionStatus> {
        self.status
    }

    fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    fn sortable(key: &SortKey) -> bool {
        !matches!(key, SortKey::Other(_))
    }

    fn compare_by(&self, other: &Self, key: &SortKey) -> Ordering {
        match key {
            SortKey::Amount => self.amount.total_cmp(&other.amount),
            SortKey::Name => locale_cmp(&self.name, &other.name),
            SortKey::Account => locale_cmp(
                self.account.as_deref().unwrap_or(""),
                other.account.as_deref().unwrap_or(""),
            ),
            SortKey::Date => self.timestamp().cmp(&other.timestamp()),
            SortKey::Other(_) => Ordering::Equal,
        }
    }
}

/// Accent- and case-insensitive comparison used for text columns
///
/// Both sides are decomposed (NFD), stripped of combining marks and
/// lowercased, so "Émile" sorts between "Dave" and "Zoe". Strings that differ
/// only by accent or case compare equal, leaving their relative order to the
/// stable sort.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(collation_key(b))
}

fn collation_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<'a, T> {
    pub page_items: Vec<&'a T>,
    /// Number of records that passed the filter
    pub total_count: usize,
    pub total_pages: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl<T> QueryResult<'_, T> {
    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1 && self.total_pages > 0
    }

    pub fn is_empty(&self) -> bool {
        self.page_items.is_empty()
    }
}

/// Whether a record passes the filter part of a spec
pub fn matches<T: Tabular>(record: &T, spec: &QuerySpec) -> bool {
    let filter = &spec.filter;

    let needle = filter.search_term.trim().to_lowercase();
    let search_ok = needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));

    let status_ok = filter.status_filter.admits(record.status().as_ref());

    let account_ok = match &filter.account_filter {
        Selection::All => true,
        Selection::Only(wanted) => record.account() == Some(wanted.as_str()),
    };

    search_ok && status_ok && account_ok
}

/// Filter and sort without paging
pub fn filter_and_sort<'a, T: Tabular>(records: &'a [T], spec: &QuerySpec) -> Vec<&'a T> {
    let mut rows: Vec<&T> = records.iter().filter(|r| matches(*r, spec)).collect();

    let key = &spec.sort.key;
    if T::sortable(key) {
        // sort_by is stable, so ties keep their input order in both directions
        match spec.sort.direction {
            SortDirection::Asc => rows.sort_by(|a, b| a.compare_by(b, key)),
            SortDirection::Desc => rows.sort_by(|a, b| b.compare_by(a, key)),
        }
    } else {
        tracing::debug!(key = %key, "no comparator for sort key, keeping input order");
    }

    rows
}

/// Run a full query: filter, sort, paginate
pub fn query<'a, T: Tabular>(records: &'a [T], spec: &QuerySpec) -> QueryResult<'a, T> {
    let rows = filter_and_sort(records, spec);
    let total_count = rows.len();
    let PageSpec { index, size } = spec.page;

    let total_pages = if size == 0 {
        0
    } else {
        total_count.div_ceil(size)
    };

    let page_items = page_slice(&rows, index, size);

    tracing::debug!(
        total = records.len(),
        matched = total_count,
        page = index,
        returned = page_items.len(),
        "ran tabular query"
    );

    QueryResult {
        page_items,
        total_count,
        total_pages,
        page_index: index,
        page_size: size,
    }
}

/// Distinct account labels in first-seen order
pub fn account_options<T: Tabular>(records: &[T]) -> Vec<String> {
    let mut accounts: Vec<String> = Vec::new();
    for account in records.iter().filter_map(|r| r.account()) {
        if !accounts.iter().any(|a| a == account) {
            accounts.push(account.to_string());
        }
    }
    accounts
}

fn page_slice<'a, T>(rows: &[&'a T], index: usize, size: usize) -> Vec<&'a T> {
    if index == 0 || size == 0 {
        return Vec::new();
    }
    let start = match (index - 1).checked_mul(size) {
        Some(start) if start < rows.len() => start,
        _ => return Vec::new(),
    };
    let end = start.saturating_add(size).min(rows.len());
    rows[start..end].to_vec()
}
