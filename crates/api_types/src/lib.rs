use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Deserializes a string that the backend may send as `null` or omit.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde helpers for backend timestamps.
///
/// The backend emits RFC3339 most of the time, but some endpoints return a
/// naive ISO timestamp without offset. Naive values are interpreted as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        let raw = raw.trim();
        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Ok(value.with_timezone(&Utc));
        }
        if let Ok(value) = raw.parse::<NaiveDateTime>() {
            return Ok(value.and_utc());
        }
        // `datetime-local` form inputs have no seconds.
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").map(|value| value.and_utc())
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod auth {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RegisterRequest {
        pub email: String,
        pub password: String,
        pub name: String,
        /// `YYYY-MM-DD`.
        pub birth_date: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AuthResponse {
        pub access_token: String,
        pub refresh_token: String,
        #[serde(default)]
        pub access_token_expires_at: Option<String>,
    }
}

pub mod page {
    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    /// Pagination cursor, recomputed from every list response.
    ///
    /// `current_page` is zero-based.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Pagination {
        pub current_page: u32,
        pub page_size: u32,
        pub total_items: u64,
        pub total_pages: u32,
    }

    impl Pagination {
        pub fn empty(page_size: u32) -> Self {
            Self {
                current_page: 0,
                page_size,
                total_items: 0,
                total_pages: 0,
            }
        }

        pub fn has_next(&self) -> bool {
            self.current_page + 1 < self.total_pages
        }

        pub fn has_prev(&self) -> bool {
            self.current_page > 0
        }
    }

    /// Paged list body as emitted by the backend.
    ///
    /// Only `items` is required; every other field falls back to the request
    /// parameters (see [`PageResponse::into_page`]).
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PagedBody<T> {
        pub items: Vec<T>,
        #[serde(default)]
        pub current_page: Option<u32>,
        #[serde(default)]
        pub page_size: Option<u32>,
        #[serde(default)]
        pub total_items: Option<u64>,
        #[serde(default)]
        pub total_pages: Option<u32>,
    }

    /// Any list response. One legacy endpoint answers with a bare array.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum PageResponse<T> {
        Paged(PagedBody<T>),
        Bare(Vec<T>),
    }

    /// A validated page.
    #[derive(Clone, Debug, PartialEq)]
    pub struct Page<T> {
        pub items: Vec<T>,
        pub pagination: Pagination,
    }

    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum PageError {
        #[error("requested page {requested}, server answered page {answered}")]
        PageMismatch { requested: u32, answered: u32 },
        #[error("server returned {count} items for a page of {page_size}")]
        Oversized { count: usize, page_size: u32 },
    }

    impl<T> PageResponse<T> {
        pub fn items(&self) -> &[T] {
            match self {
                Self::Paged(body) => &body.items,
                Self::Bare(items) => items,
            }
        }

        pub fn into_items(self) -> Vec<T> {
            match self {
                Self::Paged(body) => body.items,
                Self::Bare(items) => items,
            }
        }

        /// Validates the response against the request that produced it.
        pub fn into_page(self, requested_page: u32, requested_size: u32) -> Result<Page<T>, PageError> {
            let requested_size = requested_size.max(1);
            let body = match self {
                Self::Paged(body) => body,
                Self::Bare(items) => PagedBody {
                    items,
                    current_page: None,
                    page_size: None,
                    total_items: None,
                    total_pages: None,
                },
            };

            if let Some(answered) = body.current_page
                && answered != requested_page
            {
                return Err(PageError::PageMismatch {
                    requested: requested_page,
                    answered,
                });
            }
            if body.items.len() > requested_size as usize {
                return Err(PageError::Oversized {
                    count: body.items.len(),
                    page_size: requested_size,
                });
            }

            let page_size = body.page_size.filter(|size| *size > 0).unwrap_or(requested_size);
            let total_items = body.total_items.unwrap_or(body.items.len() as u64);
            let total_pages = body
                .total_pages
                .unwrap_or_else(|| total_items.div_ceil(u64::from(page_size)).max(1) as u32);

            Ok(Page {
                items: body.items,
                pagination: Pagination {
                    current_page: requested_page,
                    page_size,
                    total_items,
                    total_pages,
                },
            })
        }
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: Uuid,
        #[serde(default, deserialize_with = "nullable_string")]
        pub wallet_name: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub category_name: String,
        /// Signed amount: negative values are expenses.
        pub amount: Decimal,
        #[serde(with = "crate::timestamp")]
        pub occurred_at: DateTime<Utc>,
        #[serde(default, deserialize_with = "nullable_string")]
        pub note: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub currency: String,
    }

    impl Transaction {
        pub fn is_expense(&self) -> bool {
            self.amount < Decimal::ZERO
        }

        pub fn is_income(&self) -> bool {
            !self.is_expense()
        }
    }

    /// Body for `POST /transactions` and `PUT /transactions/{id}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionDraft {
        pub wallet_id: Uuid,
        pub category_id: Uuid,
        pub amount: Decimal,
        pub note: String,
        #[serde(with = "crate::timestamp")]
        pub occurred_at: DateTime<Utc>,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlyBalance {
        #[serde(default)]
        pub total_income: Decimal,
        /// May come back signed; display uses the absolute value.
        #[serde(default)]
        pub total_expense: Decimal,
        #[serde(default)]
        pub net: Decimal,
    }
}

pub mod wallet {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Wallet {
        pub id: Uuid,
        pub name: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub icon: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub currency: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct WalletDraft {
        pub name: String,
        pub icon: String,
        pub currency: String,
    }
}

pub mod category {
    use super::*;

    /// Category direction. On the wire `0` is expense and `1` is income.
    ///
    /// Older endpoints send `"expense"` / `"income"`; both forms are accepted,
    /// the numeric form is always emitted.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(try_from = "RawKind", into = "u8")]
    pub enum CategoryKind {
        #[default]
        Expense,
        Income,
    }

    impl CategoryKind {
        pub fn code(self) -> u8 {
            match self {
                Self::Expense => 0,
                Self::Income => 1,
            }
        }

        pub fn toggle(self) -> Self {
            match self {
                Self::Expense => Self::Income,
                Self::Income => Self::Expense,
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKind {
        Code(u8),
        Name(String),
    }

    impl TryFrom<RawKind> for CategoryKind {
        type Error = String;

        fn try_from(value: RawKind) -> Result<Self, Self::Error> {
            match value {
                RawKind::Code(0) => Ok(Self::Expense),
                RawKind::Code(1) => Ok(Self::Income),
                RawKind::Code(other) => Err(format!("unknown category type {other}")),
                RawKind::Name(name) => match name.trim().to_ascii_lowercase().as_str() {
                    "expense" | "0" => Ok(Self::Expense),
                    "income" | "1" => Ok(Self::Income),
                    other => Err(format!("unknown category type \"{other}\"")),
                },
            }
        }
    }

    impl From<CategoryKind> for u8 {
        fn from(value: CategoryKind) -> Self {
            value.code()
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Category {
        pub id: Uuid,
        pub name: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub icon: String,
        #[serde(rename = "type", default)]
        pub kind: CategoryKind,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryDraft {
        pub name: String,
        pub icon: String,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
    }
}
