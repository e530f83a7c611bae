use api_types::transaction::{MonthlyBalance, Transaction};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::{
    aggregate::{ExpenseCharts, MonthlyStats},
    http::ApiClient,
    list::{ListQuery, TransactionFilters},
    resource::{Backend, Transactions},
};

pub const RECENT_PAGE_SIZE: u32 = 7;
/// Charts aggregate client-side over one large page.
pub const CHART_PAGE_SIZE: u32 = 1000;

pub const SUMMARY_ERROR: &str = "Không thể tải dữ liệu tháng này";
pub const RECENT_ERROR: &str = "Không thể tải giao dịch gần đây";
pub const RECENT_EMPTY: &str = "Chưa có giao dịch nào";
pub const CHARTS_ERROR: &str = "Không thể tải dữ liệu biểu đồ";
pub const CHARTS_EMPTY: &str = "Chưa có dữ liệu chi tiêu trong tháng này";

/// State of one dashboard panel.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel<T> {
    Loading,
    Ready(T),
    Empty(&'static str),
    Failed(&'static str),
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

pub async fn load_monthly_summary(
    client: &ApiClient,
    now: DateTime<Utc>,
    tz: Tz,
) -> Panel<MonthlyBalance> {
    let local = now.with_timezone(&tz);
    match client.monthly_balance(local.year(), local.month()).await {
        Ok(balance) => Panel::Ready(balance),
        Err(err) => {
            tracing::warn!("monthly balance failed: {err}");
            Panel::Failed(SUMMARY_ERROR)
        }
    }
}

pub async fn load_recent<B: Backend<Transactions>>(backend: &B) -> Panel<Vec<Transaction>> {
    let query = ListQuery::<TransactionFilters>::new(RECENT_PAGE_SIZE);
    let page = match backend.list(&query).await {
        Ok(response) => response.into_page(query.page, query.page_size),
        Err(err) => {
            tracing::warn!("recent transactions failed: {err}");
            return Panel::Failed(RECENT_ERROR);
        }
    };
    match page {
        Ok(page) if page.items.is_empty() => Panel::Empty(RECENT_EMPTY),
        Ok(page) => Panel::Ready(page.items),
        Err(err) => {
            tracing::warn!("recent transactions rejected: {err}");
            Panel::Failed(RECENT_ERROR)
        }
    }
}

/// Current-month expense charts plus the header figures derived from the
/// same page.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    pub charts: ExpenseCharts,
    pub stats: MonthlyStats,
}

pub async fn load_expense_charts<B: Backend<Transactions>>(
    backend: &B,
    now: DateTime<Utc>,
    tz: Tz,
) -> Panel<ChartData> {
    let query = ListQuery::<TransactionFilters>::new(CHART_PAGE_SIZE);
    let items = match backend.list(&query).await {
        Ok(response) => response.into_items(),
        Err(err) => {
            tracing::warn!("chart data failed: {err}");
            return Panel::Failed(CHARTS_ERROR);
        }
    };
    match ExpenseCharts::build(&items, now, tz) {
        Some(charts) => Panel::Ready(ChartData {
            charts,
            stats: MonthlyStats::compute(&items, now, tz),
        }),
        None => Panel::Empty(CHARTS_EMPTY),
    }
}

#[cfg(test)]
mod tests {
    use api_types::page::{PageResponse, PagedBody};
    use chrono_tz::Asia::Ho_Chi_Minh;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;
    use crate::error::ClientError;

    struct Fixed {
        items: Vec<Transaction>,
        fail: bool,
    }

    impl Backend<Transactions> for Fixed {
        async fn list(
            &self,
            query: &ListQuery<TransactionFilters>,
        ) -> Result<PageResponse<Transaction>, ClientError> {
            if self.fail {
                return Err(ClientError::Server("down".to_string()));
            }
            Ok(PageResponse::Paged(PagedBody {
                items: self
                    .items
                    .iter()
                    .take(query.page_size as usize)
                    .cloned()
                    .collect(),
                current_page: Some(query.page),
                page_size: Some(query.page_size),
                total_items: Some(self.items.len() as u64),
                total_pages: None,
            }))
        }

        async fn create(&self, _draft: &api_types::transaction::TransactionDraft) -> Result<(), ClientError> {
            Ok(())
        }

        async fn update(
            &self,
            _id: Uuid,
            _draft: &api_types::transaction::TransactionDraft,
        ) -> Result<(), ClientError> {
            Ok(())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn tx(amount: i64, at: &str) -> Transaction {
        Transaction {
            id: Uuid::nil(),
            wallet_name: "Cash".to_string(),
            category_name: "Food".to_string(),
            amount: Decimal::from(amount),
            occurred_at: api_types::timestamp::parse(at).unwrap(),
            note: String::new(),
            currency: "VND".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        api_types::timestamp::parse("2025-03-15T00:00:00Z").unwrap()
    }

    #[tokio::test]
    async fn recent_takes_seven() {
        let backend = Fixed {
            items: (0..10).map(|_| tx(-1, "2025-03-01T00:00:00Z")).collect(),
            fail: false,
        };
        match load_recent(&backend).await {
            Panel::Ready(items) => assert_eq!(items.len(), 7),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn recent_empty_and_failed() {
        let empty = Fixed {
            items: Vec::new(),
            fail: false,
        };
        assert_eq!(load_recent(&empty).await, Panel::Empty(RECENT_EMPTY));

        let down = Fixed {
            items: Vec::new(),
            fail: true,
        };
        assert_eq!(load_recent(&down).await, Panel::Failed(RECENT_ERROR));
    }

    #[tokio::test]
    async fn charts_without_expenses_show_placeholder() {
        let backend = Fixed {
            items: vec![tx(500, "2025-03-02T00:00:00Z")],
            fail: false,
        };
        assert_eq!(
            load_expense_charts(&backend, now(), Ho_Chi_Minh).await,
            Panel::Empty(CHARTS_EMPTY)
        );
    }

    #[tokio::test]
    async fn charts_aggregate_current_month() {
        let backend = Fixed {
            items: vec![
                tx(-100, "2025-03-02T00:00:00Z"),
                tx(-50, "2025-02-02T00:00:00Z"),
            ],
            fail: false,
        };
        let panel = load_expense_charts(&backend, now(), Ho_Chi_Minh).await;
        let data = panel.ready().unwrap();
        assert_eq!(data.charts.by_category[0].value, Decimal::from(100));
        assert_eq!(data.charts.by_day.len(), 1);
        assert_eq!(data.stats.top_category.as_deref(), Some("Food"));
    }
}
