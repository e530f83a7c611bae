mod support;

use std::sync::Arc;

use api_types::transaction::MonthlyBalance;
use chrono::{DateTime, Utc};
use chrono_tz::Asia::Ho_Chi_Minh;
use finance_client::{
    ApiClient, ClientError, ListController, MemoryTokenStore, SessionStore, TokenStore,
    dashboard::{self, Panel},
    forms::{DeleteConfirmation, DeleteError, Modal, Submitted, WalletForm},
    list::{ListView, SearchFilter, TransactionFilters},
    resource::{Categories, Transactions, Wallets},
    routes::{Guard, Route, guard},
    session::SessionError,
};
use rust_decimal::Decimal;
use support::{EMAIL, FakeBackend, PASSWORD};

struct Harness {
    server: FakeBackend,
    tokens: Arc<MemoryTokenStore>,
    client: ApiClient,
    session: SessionStore,
}

async fn harness() -> Harness {
    let server = FakeBackend::spawn().await;
    let tokens = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(&server.base_url(), tokens.clone()).unwrap();
    let session = SessionStore::new(tokens.clone());
    session.init();
    Harness {
        server,
        tokens,
        client,
        session,
    }
}

async fn logged_in() -> Harness {
    let h = harness().await;
    h.session.login(&h.client, EMAIL, PASSWORD).await.unwrap();
    h
}

fn now() -> DateTime<Utc> {
    api_types::timestamp::parse("2025-03-15T03:00:00Z").unwrap()
}

#[tokio::test]
async fn login_with_valid_credentials_opens_dashboard() {
    let h = harness().await;
    assert_eq!(
        guard(Route::Dashboard, h.session.state()),
        Guard::Redirect(Route::Login)
    );

    h.session.login(&h.client, EMAIL, PASSWORD).await.unwrap();

    assert!(h.session.state().authenticated);
    assert_eq!(h.tokens.access_token().as_deref(), Some(support::ACCESS_TOKEN));
    assert_eq!(
        guard(Route::Dashboard, h.session.state()),
        Guard::Allow(Route::Dashboard)
    );
}

#[tokio::test]
async fn login_with_bad_credentials_stays_anonymous() {
    let h = harness().await;

    let err = h
        .session
        .login(&h.client, EMAIL, "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::LoginFailed));
    assert_eq!(err.to_string(), "Email hoặc mật khẩu không đúng");
    assert!(!h.session.state().authenticated);
    assert_eq!(h.tokens.load().unwrap(), None);
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let h = harness().await;
    let result = h.client.monthly_balance(2025, 3).await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
}

#[tokio::test]
async fn logout_clears_tokens_and_later_requests_fail() {
    let h = logged_in().await;
    h.session.logout();

    assert!(!h.session.state().authenticated);
    assert_eq!(h.tokens.load().unwrap(), None);
    assert!(matches!(
        h.client.monthly_balance(2025, 3).await,
        Err(ClientError::Unauthorized)
    ));
}

#[tokio::test]
async fn list_pages_never_exceed_page_size() {
    let h = logged_in().await;
    {
        let mut db = h.server.db();
        for i in 0..25 {
            db.transactions.push(support::transaction(
                "Ăn uống",
                -1000 - i,
                "2025-03-02T03:00:00Z",
                &format!("bữa {i}"),
            ));
        }
    }

    let mut list = ListController::<Transactions>::new();
    list.fetch(&h.client).await;
    assert_eq!(list.items().len(), 20);
    assert_eq!(list.pagination().current_page, 0);
    assert_eq!(list.pagination().total_pages, 2);

    let ticket = list.next_page().unwrap();
    let result = <ApiClient as finance_client::Backend<Transactions>>::list(&h.client, ticket.query()).await;
    list.apply(ticket, result);
    assert_eq!(list.items().len(), 5);
    assert_eq!(list.pagination().current_page, 1);
    assert!(!list.pagination().has_next());
}

#[tokio::test]
async fn changing_filters_requests_first_page() {
    let h = logged_in().await;
    {
        let mut db = h.server.db();
        for i in 0..30 {
            db.transactions.push(support::transaction(
                "Ăn uống",
                -1000,
                "2025-03-02T03:00:00Z",
                if i % 2 == 0 { "cà phê" } else { "phở" },
            ));
        }
    }

    let mut list = ListController::<Transactions>::with_page_size(5);
    list.set_page(2);
    list.fetch(&h.client).await;
    assert_eq!(h.server.last_query().get("page").map(String::as_str), Some("2"));

    list.set_filters(TransactionFilters {
        search: "phở".to_string(),
        ..TransactionFilters::default()
    })
    .unwrap();
    list.fetch(&h.client).await;

    let query = h.server.last_query();
    assert_eq!(query.get("page").map(String::as_str), Some("0"));
    assert_eq!(query.get("search").map(String::as_str), Some("phở"));
    assert_eq!(list.pagination().total_items, 15);
}

#[tokio::test]
async fn created_wallet_appears_exactly_once_after_reload() {
    let h = logged_in().await;
    let mut wallets = ListController::<Wallets>::new();
    wallets.fetch(&h.client).await;
    assert_eq!(wallets.view(), ListView::Empty);

    let mut modal = Modal::add(WalletForm {
        name: "Ví tiết kiệm".to_string(),
        ..WalletForm::default()
    });
    assert_eq!(modal.submit(&h.client).await, Submitted::Saved);
    assert!(!modal.is_open());

    wallets.reload();
    wallets.fetch(&h.client).await;
    let matches = wallets
        .items()
        .iter()
        .filter(|w| w.name == "Ví tiết kiệm")
        .count();
    assert_eq!(matches, 1);
    assert_eq!(wallets.items()[0].currency, "VND");

    wallets
        .set_filters(SearchFilter {
            search: "tiết".to_string(),
        })
        .unwrap();
    wallets.fetch(&h.client).await;
    assert_eq!(wallets.items().len(), 1);
}

#[tokio::test]
async fn edit_wallet_updates_in_place() {
    let h = logged_in().await;
    let mut modal = Modal::add(WalletForm {
        name: "Tiền mặt".to_string(),
        ..WalletForm::default()
    });
    modal.submit(&h.client).await;

    let mut wallets = ListController::<Wallets>::new();
    wallets.fetch(&h.client).await;
    let wallet = wallets.items()[0].clone();

    let mut edit = Modal::edit(wallet.id, WalletForm::from_wallet(&wallet));
    edit.form_mut().name = "Ví chính".to_string();
    assert_eq!(edit.submit(&h.client).await, Submitted::Saved);

    wallets.fetch(&h.client).await;
    assert_eq!(wallets.items().len(), 1);
    assert_eq!(wallets.items()[0].name, "Ví chính");
}

#[tokio::test]
async fn delete_without_confirmation_sends_nothing() {
    let h = logged_in().await;
    let target = support::category("Giải trí");
    h.server.db().categories.push(target.clone());

    let mut confirm = DeleteConfirmation::<Categories>::new(&target);
    assert_eq!(
        confirm.submit(&h.client).await,
        Err(DeleteError::NotConfirmed)
    );
    assert_eq!(h.server.db().deletes, 0);

    confirm.toggle();
    assert_eq!(confirm.submit(&h.client).await, Ok(()));
    assert_eq!(h.server.db().deletes, 1);

    let mut categories = ListController::<Categories>::new();
    categories.fetch(&h.client).await;
    assert_eq!(categories.view(), ListView::Empty);
}

#[tokio::test]
async fn month_without_expenses_shows_placeholder() {
    let h = logged_in().await;
    h.server.db().transactions.push(support::transaction(
        "Lương",
        15_000_000,
        "2025-03-05T02:00:00Z",
        "",
    ));

    let charts = dashboard::load_expense_charts(&h.client, now(), Ho_Chi_Minh).await;
    assert_eq!(charts, Panel::Empty(dashboard::CHARTS_EMPTY));
    assert_eq!(h.server.last_query().get("pageSize").map(String::as_str), Some("1000"));

    let mut list = ListController::<Transactions>::new();
    list.set_filters(TransactionFilters {
        search: "không tồn tại".to_string(),
        ..TransactionFilters::default()
    });
    list.fetch(&h.client).await;
    assert_eq!(list.view(), ListView::Empty);
    assert_eq!(list.error(), None);
}

#[tokio::test]
async fn dashboard_panels_load() {
    let h = logged_in().await;
    {
        let mut db = h.server.db();
        db.balance = MonthlyBalance {
            total_income: Decimal::from(2_000_000),
            total_expense: Decimal::from(-500_000),
            net: Decimal::from(1_500_000),
        };
        db.transactions.push(support::transaction(
            "Ăn uống",
            -45_000,
            "2025-03-14T05:00:00Z",
            "phở",
        ));
    }

    let summary = dashboard::load_monthly_summary(&h.client, now(), Ho_Chi_Minh).await;
    assert_eq!(summary.ready().unwrap().net, Decimal::from(1_500_000));
    let query = h.server.last_query();
    assert_eq!(query.get("year").map(String::as_str), Some("2025"));
    assert_eq!(query.get("month").map(String::as_str), Some("3"));

    match dashboard::load_recent(&h.client).await {
        Panel::Ready(items) => assert_eq!(items[0].note, "phở"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(h.server.last_query().get("pageSize").map(String::as_str), Some("7"));

    let charts = dashboard::load_expense_charts(&h.client, now(), Ho_Chi_Minh).await;
    let data = charts.ready().unwrap();
    assert_eq!(data.charts.by_category[0].label, "Ăn uống");
    assert_eq!(data.charts.by_category[0].value, Decimal::from(45_000));
}
