#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use api_types::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    category::{Category, CategoryDraft, CategoryKind},
    transaction::{MonthlyBalance, Transaction, TransactionDraft},
    wallet::{Wallet, WalletDraft},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

pub const EMAIL: &str = "an@example.com";
pub const PASSWORD: &str = "secret";
pub const ACCESS_TOKEN: &str = "access-token";

#[derive(Default)]
pub struct Db {
    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub balance: MonthlyBalance,
    pub deletes: usize,
    pub queries: Vec<HashMap<String, String>>,
}

type Shared = Arc<Mutex<Db>>;

pub struct FakeBackend {
    addr: SocketAddr,
    db: Shared,
}

impl FakeBackend {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let db: Shared = Arc::default();
        let app = router(db.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, db }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn db(&self) -> MutexGuard<'_, Db> {
        self.db.lock().unwrap()
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.db().queries.last().cloned().unwrap_or_default()
    }
}

pub fn transaction(category: &str, amount: i64, occurred_at: &str, note: &str) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        wallet_name: "Tiền mặt".to_string(),
        category_name: category.to_string(),
        amount: Decimal::from(amount),
        occurred_at: api_types::timestamp::parse(occurred_at).unwrap(),
        note: note.to_string(),
        currency: "VND".to_string(),
    }
}

pub fn category(name: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        icon: "📂".to_string(),
        kind: CategoryKind::Expense,
    }
}

fn router(db: Shared) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/wallets", get(list_wallets).post(create_wallet))
        .route("/wallets/{id}", put(update_wallet).delete(delete_any))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", put(update_category).delete(delete_any))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{id}", put(update_transaction).delete(delete_any))
        .route("/transactions/my-transactions", get(list_transactions))
        .route("/transactions/monthly-balance", get(monthly_balance))
        .with_state(db)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {ACCESS_TOKEN}");
    headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) == Some(expected.as_str())
}

fn tokens() -> AuthResponse {
    AuthResponse {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: "refresh-token".to_string(),
        access_token_expires_at: Some("2030-01-01T00:00:00Z".to_string()),
    }
}

/// Pages `items` the way the real backend does: zero-based page, totals
/// included.
fn paged<T: Serialize + Clone>(items: &[T], params: &HashMap<String, String>) -> Response {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = params
        .get("pageSize")
        .and_then(|p| p.parse().ok())
        .unwrap_or(10)
        .max(1);
    let slice: Vec<T> = items.iter().skip(page * size).take(size).cloned().collect();
    Json(json!({
        "items": slice,
        "currentPage": page,
        "pageSize": size,
        "totalItems": items.len(),
        "totalPages": items.len().div_ceil(size).max(1),
    }))
    .into_response()
}

fn search<'a, T>(items: &'a [T], params: &HashMap<String, String>, text: impl Fn(&T) -> &str) -> Vec<&'a T> {
    let needle = params
        .get("search")
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    items
        .iter()
        .filter(|item| text(item).to_lowercase().contains(&needle))
        .collect()
}

async fn login(Json(body): Json<LoginRequest>) -> Response {
    if body.email == EMAIL && body.password == PASSWORD {
        Json(tokens()).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "invalid credentials")
    }
}

async fn register(Json(body): Json<RegisterRequest>) -> Response {
    if body.email == EMAIL {
        error(StatusCode::CONFLICT, "email already registered")
    } else {
        Json(tokens()).into_response()
    }
}

async fn list_wallets(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let mut db = db.lock().unwrap();
    db.queries.push(params.clone());
    let matching: Vec<Wallet> = search(&db.wallets, &params, |w| w.name.as_str())
        .into_iter()
        .cloned()
        .collect();
    paged(&matching, &params)
}

async fn create_wallet(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(draft): Json<WalletDraft>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    if draft.name.is_empty() {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "name is required");
    }
    let wallet = Wallet {
        id: Uuid::new_v4(),
        name: draft.name,
        icon: draft.icon,
        currency: draft.currency,
    };
    db.lock().unwrap().wallets.push(wallet.clone());
    (StatusCode::CREATED, Json(wallet)).into_response()
}

async fn update_wallet(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(draft): Json<WalletDraft>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let mut db = db.lock().unwrap();
    let Some(wallet) = db.wallets.iter_mut().find(|w| w.id == id) else {
        return error(StatusCode::NOT_FOUND, "wallet not found");
    };
    wallet.name = draft.name;
    wallet.icon = draft.icon;
    wallet.currency = draft.currency;
    StatusCode::NO_CONTENT.into_response()
}

async fn list_categories(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let mut db = db.lock().unwrap();
    db.queries.push(params.clone());
    let matching: Vec<Category> = search(&db.categories, &params, |c| c.name.as_str())
        .into_iter()
        .cloned()
        .collect();
    paged(&matching, &params)
}

async fn create_category(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(draft): Json<CategoryDraft>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let category = Category {
        id: Uuid::new_v4(),
        name: draft.name,
        icon: draft.icon,
        kind: draft.kind,
    };
    db.lock().unwrap().categories.push(category.clone());
    (StatusCode::CREATED, Json(category)).into_response()
}

async fn update_category(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(draft): Json<CategoryDraft>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let mut db = db.lock().unwrap();
    let Some(category) = db.categories.iter_mut().find(|c| c.id == id) else {
        return error(StatusCode::NOT_FOUND, "category not found");
    };
    category.name = draft.name;
    category.icon = draft.icon;
    category.kind = draft.kind;
    StatusCode::NO_CONTENT.into_response()
}

async fn list_transactions(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let mut db = db.lock().unwrap();
    db.queries.push(params.clone());
    let matching: Vec<Transaction> = search(&db.transactions, &params, |t| t.note.as_str())
        .into_iter()
        .cloned()
        .collect();
    paged(&matching, &params)
}

async fn create_transaction(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(draft): Json<TransactionDraft>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let mut db = db.lock().unwrap();
    let wallet = db.wallets.iter().find(|w| w.id == draft.wallet_id).cloned();
    let category = db.categories.iter().find(|c| c.id == draft.category_id).cloned();
    let (Some(wallet), Some(category)) = (wallet, category) else {
        return error(StatusCode::BAD_REQUEST, "unknown wallet or category");
    };
    db.transactions.push(Transaction {
        id: Uuid::new_v4(),
        wallet_name: wallet.name,
        category_name: category.name,
        amount: draft.amount,
        occurred_at: draft.occurred_at,
        note: draft.note,
        currency: wallet.currency,
    });
    StatusCode::CREATED.into_response()
}

async fn update_transaction(
    headers: HeaderMap,
    Path(_id): Path<Uuid>,
    Json(_draft): Json<TransactionDraft>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn monthly_balance(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let mut db = db.lock().unwrap();
    db.queries.push(params);
    Json(db.balance).into_response()
}

async fn delete_any(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<Uuid>) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "missing token");
    }
    let mut db = db.lock().unwrap();
    db.deletes += 1;
    db.wallets.retain(|w| w.id != id);
    db.categories.retain(|c| c.id != id);
    db.transactions.retain(|t| t.id != id);
    StatusCode::NO_CONTENT.into_response()
}
