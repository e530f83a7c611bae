use std::fmt;

use chrono::NaiveDate;

/// Filter set of a list endpoint, rendered as query parameters.
///
/// Only non-empty filters are sent; interpretation is the server's job.
pub trait Filters: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Free-text search, used by wallets and categories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub search: String,
}

impl Filters for SearchFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        non_empty([("search", self.search.as_str())])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilters {
    pub search: String,
    /// Wallet name.
    pub wallet: String,
    /// Category name.
    pub category: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub note: String,
}

impl TransactionFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Filters for TransactionFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = non_empty([
            ("search", self.search.as_str()),
            ("wallet", self.wallet.as_str()),
            ("category", self.category.as_str()),
        ]);
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        pairs.extend(non_empty([("note", self.note.as_str())]));
        pairs
    }
}

fn non_empty<const N: usize>(pairs: [(&'static str, &str); N]) -> Vec<(&'static str, String)> {
    pairs
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (key, value.to_string()))
        })
        .collect()
}

/// Parameters of one list request. `page` is zero-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub page: u32,
    pub page_size: u32,
    pub filters: F,
}

impl<F: Filters> ListQuery<F> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size,
            filters: F::default(),
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        pairs.extend(self.filters.query_pairs());
        pairs
    }
}
