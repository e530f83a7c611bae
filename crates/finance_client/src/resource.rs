use std::{fmt, future::Future};

use api_types::{
    category::{Category, CategoryDraft},
    page::PageResponse,
    transaction::{Transaction, TransactionDraft},
    wallet::{Wallet, WalletDraft},
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    error::ClientError,
    http::ApiClient,
    list::{Filters, ListQuery, SearchFilter, TransactionFilters},
};

/// A REST collection the client lists and mutates.
pub trait Resource: fmt::Debug + Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;
    type Draft: Serialize + Clone + fmt::Debug + Send + Sync + 'static;
    type Filters: Filters;

    /// Collection path used for create, update and delete.
    const PATH: &'static str;
    /// Path of the paged listing.
    const LIST_PATH: &'static str = Self::PATH;
    const LOAD_ERROR: &'static str;
    const DEFAULT_PAGE_SIZE: u32;

    fn id(item: &Self::Item) -> Uuid;
    /// Short human label, used by delete confirmations.
    fn label(item: &Self::Item) -> String;
}

#[derive(Debug)]
pub struct Transactions;

#[derive(Debug)]
pub struct Wallets;

#[derive(Debug)]
pub struct Categories;

impl Resource for Transactions {
    type Item = Transaction;
    type Draft = TransactionDraft;
    type Filters = TransactionFilters;

    const PATH: &'static str = "transactions";
    const LIST_PATH: &'static str = "transactions/my-transactions";
    const LOAD_ERROR: &'static str = "Không thể tải giao dịch";
    const DEFAULT_PAGE_SIZE: u32 = 20;

    fn id(item: &Transaction) -> Uuid {
        item.id
    }

    fn label(item: &Transaction) -> String {
        if item.note.is_empty() {
            item.category_name.clone()
        } else {
            item.note.clone()
        }
    }
}

impl Resource for Wallets {
    type Item = Wallet;
    type Draft = WalletDraft;
    type Filters = SearchFilter;

    const PATH: &'static str = "wallets";
    const LOAD_ERROR: &'static str = "Không thể tải danh sách ví. Vui lòng thử lại.";
    const DEFAULT_PAGE_SIZE: u32 = 10;

    fn id(item: &Wallet) -> Uuid {
        item.id
    }

    fn label(item: &Wallet) -> String {
        item.name.clone()
    }
}

impl Resource for Categories {
    type Item = Category;
    type Draft = CategoryDraft;
    type Filters = SearchFilter;

    const PATH: &'static str = "categories";
    const LOAD_ERROR: &'static str = "Không thể tải danh mục. Vui lòng thử lại.";
    const DEFAULT_PAGE_SIZE: u32 = 10;

    fn id(item: &Category) -> Uuid {
        item.id
    }

    fn label(item: &Category) -> String {
        item.name.clone()
    }
}

/// Remote operations on one resource.
///
/// [`ApiClient`] is the production implementation; tests substitute
/// in-memory fakes.
pub trait Backend<R: Resource>: Send + Sync {
    fn list(
        &self,
        query: &ListQuery<R::Filters>,
    ) -> impl Future<Output = Result<PageResponse<R::Item>, ClientError>> + Send;

    fn create(&self, draft: &R::Draft) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn update(
        &self,
        id: Uuid,
        draft: &R::Draft,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn delete(&self, id: Uuid) -> impl Future<Output = Result<(), ClientError>> + Send;
}

impl<R: Resource> Backend<R> for ApiClient {
    async fn list(
        &self,
        query: &ListQuery<R::Filters>,
    ) -> Result<PageResponse<R::Item>, ClientError> {
        self.get_page::<R>(query).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<(), ClientError> {
        self.post_item::<R>(draft).await
    }

    async fn update(&self, id: Uuid, draft: &R::Draft) -> Result<(), ClientError> {
        self.put_item::<R>(id, draft).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete_item::<R>(id).await
    }
}
