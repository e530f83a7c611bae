//! Paged, filterable lists shared by the transactions, wallets and
//! categories screens.
//!
//! A [`ListController`] owns what is on screen. Every request is tagged with
//! a [`FetchTicket`]; only the response to the most recent ticket is
//! applied, so a slow response can never overwrite a newer one.
mod query;

pub use query::{Filters, ListQuery, SearchFilter, TransactionFilters};

use api_types::page::{PageResponse, Pagination};

use crate::{
    error::ClientError,
    resource::{Backend, Resource},
};

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Identifies one issued request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket<F> {
    seq: u64,
    query: ListQuery<F>,
}

impl<F> FetchTicket<F> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery<F> {
        &self.query
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Current,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
}

/// What a list screen should draw.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    Loading,
    Error(&'static str),
    /// Loaded, nothing matched.
    Empty,
    Items(&'a [T]),
}

#[derive(Debug)]
pub struct ListController<R: Resource> {
    items: Vec<R::Item>,
    pagination: Pagination,
    query: ListQuery<R::Filters>,
    status: LoadStatus,
    error: Option<&'static str>,
    seq: u64,
    selected: usize,
}

impl<R: Resource> Default for ListController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ListController<R> {
    pub fn new() -> Self {
        Self::with_page_size(R::DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            items: Vec::new(),
            pagination: Pagination::empty(page_size),
            query: ListQuery::new(page_size),
            status: LoadStatus::Idle,
            error: None,
            seq: 0,
            selected: 0,
        }
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn query(&self) -> &ListQuery<R::Filters> {
        &self.query
    }

    pub fn filters(&self) -> &R::Filters {
        &self.query.filters
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&R::Item> {
        self.items.get(self.selected)
    }

    /// Issues a request for the current query.
    pub fn begin(&mut self) -> FetchTicket<R::Filters> {
        self.seq += 1;
        self.status = LoadStatus::Loading;
        tracing::debug!(
            path = R::LIST_PATH,
            seq = self.seq,
            page = self.query.page,
            "list request"
        );
        FetchTicket {
            seq: self.seq,
            query: self.query.clone(),
        }
    }

    pub fn request(
        &mut self,
        page: u32,
        page_size: u32,
        filters: R::Filters,
    ) -> FetchTicket<R::Filters> {
        self.query = ListQuery {
            page,
            page_size: page_size.max(1),
            filters,
        };
        self.begin()
    }

    /// Applies a response. On failure the previous items and cursor stay.
    pub fn apply(
        &mut self,
        ticket: FetchTicket<R::Filters>,
        result: Result<PageResponse<R::Item>, ClientError>,
    ) -> Applied {
        if ticket.seq != self.seq {
            tracing::debug!(
                path = R::LIST_PATH,
                seq = ticket.seq,
                latest = self.seq,
                "dropping stale response"
            );
            return Applied::Stale;
        }

        let page = result.and_then(|response| {
            response
                .into_page(ticket.query.page, ticket.query.page_size)
                .map_err(ClientError::from)
        });
        match page {
            Ok(page) => {
                self.items = page.items;
                self.pagination = page.pagination;
                self.status = LoadStatus::Success;
                self.error = None;
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
            }
            Err(err) => {
                tracing::warn!(path = R::LIST_PATH, "list request failed: {err}");
                self.status = LoadStatus::Error;
                self.error = Some(R::LOAD_ERROR);
            }
        }
        Applied::Current
    }

    /// Requests the current query and applies the answer.
    pub async fn fetch<B: Backend<R>>(&mut self, backend: &B) -> Applied {
        let ticket = self.begin();
        let result = backend.list(ticket.query()).await;
        self.apply(ticket, result)
    }

    /// Forgets items, filters and cursor, keeping the page size. The
    /// sequence keeps counting, so every ticket issued before the reset
    /// is stale from here on.
    pub fn reset(&mut self) {
        let seq = self.seq + 1;
        *self = Self::with_page_size(self.query.page_size);
        self.seq = seq;
    }

    /// Same query again, e.g. after a successful mutation.
    pub fn reload(&mut self) -> FetchTicket<R::Filters> {
        self.begin()
    }

    /// Changing filters restarts from the first page. Returns `None` when
    /// nothing changed.
    pub fn set_filters(&mut self, filters: R::Filters) -> Option<FetchTicket<R::Filters>> {
        if filters == self.query.filters {
            return None;
        }
        self.query.filters = filters;
        self.query.page = 0;
        self.selected = 0;
        Some(self.begin())
    }

    pub fn set_page_size(&mut self, page_size: u32) -> FetchTicket<R::Filters> {
        self.query.page_size = page_size.max(1);
        self.query.page = 0;
        self.selected = 0;
        self.begin()
    }

    /// Cycles through [`PAGE_SIZE_OPTIONS`].
    pub fn cycle_page_size(&mut self) -> FetchTicket<R::Filters> {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|size| *size > self.query.page_size)
            .unwrap_or(PAGE_SIZE_OPTIONS[0]);
        self.set_page_size(next)
    }

    pub fn set_page(&mut self, page: u32) -> FetchTicket<R::Filters> {
        self.query.page = page;
        self.selected = 0;
        self.begin()
    }

    pub fn next_page(&mut self) -> Option<FetchTicket<R::Filters>> {
        self.pagination
            .has_next()
            .then(|| self.set_page(self.pagination.current_page + 1))
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket<R::Filters>> {
        self.pagination
            .has_prev()
            .then(|| self.set_page(self.pagination.current_page - 1))
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn view(&self) -> ListView<'_, R::Item> {
        if !self.items.is_empty() {
            return ListView::Items(&self.items);
        }
        match self.status {
            LoadStatus::Idle | LoadStatus::Loading => ListView::Loading,
            LoadStatus::Error => ListView::Error(self.error.unwrap_or(R::LOAD_ERROR)),
            LoadStatus::Success => ListView::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use api_types::{
        page::PagedBody,
        wallet::{Wallet, WalletDraft},
    };
    use uuid::Uuid;

    use super::*;
    use crate::resource::Wallets;

    fn wallet(name: &str) -> Wallet {
        Wallet {
            id: Uuid::from_u128(name.len() as u128),
            name: name.to_string(),
            icon: String::new(),
            currency: "VND".to_string(),
        }
    }

    #[derive(Default)]
    struct FakeWallets {
        all: Vec<Wallet>,
        fail: bool,
        queries: Mutex<Vec<ListQuery<SearchFilter>>>,
        calls: AtomicUsize,
    }

    impl Backend<Wallets> for FakeWallets {
        async fn list(
            &self,
            query: &ListQuery<SearchFilter>,
        ) -> Result<PageResponse<Wallet>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(ClientError::Server("boom".to_string()));
            }
            let matching: Vec<Wallet> = self
                .all
                .iter()
                .filter(|w| w.name.contains(&query.filters.search))
                .cloned()
                .collect();
            let size = query.page_size as usize;
            let items = matching
                .iter()
                .skip(query.page as usize * size)
                .take(size)
                .cloned()
                .collect();
            Ok(PageResponse::Paged(PagedBody {
                items,
                current_page: Some(query.page),
                page_size: Some(query.page_size),
                total_items: Some(matching.len() as u64),
                total_pages: None,
            }))
        }

        async fn create(&self, _draft: &WalletDraft) -> Result<(), ClientError> {
            Ok(())
        }

        async fn update(&self, _id: Uuid, _draft: &WalletDraft) -> Result<(), ClientError> {
            Ok(())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn backend(names: &[&str]) -> FakeWallets {
        FakeWallets {
            all: names.iter().map(|n| wallet(n)).collect(),
            ..FakeWallets::default()
        }
    }

    #[tokio::test]
    async fn fetch_respects_page_size_and_page() {
        let backend = backend(&["a", "bb", "ccc", "dddd", "eeeee"]);
        let mut list = ListController::<Wallets>::with_page_size(2);

        assert_eq!(list.view(), ListView::Loading);
        list.fetch(&backend).await;
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.pagination().total_pages, 3);

        let ticket = list.next_page().unwrap();
        assert_eq!(ticket.query().page, 1);
        let result = backend.list(ticket.query()).await;
        list.apply(ticket, result);
        assert_eq!(list.pagination().current_page, 1);
        assert!(list.items().len() <= 2);
    }

    #[tokio::test]
    async fn stale_response_is_dropped() {
        let backend = backend(&["cash", "bank"]);
        let mut list = ListController::<Wallets>::new();

        let old = list.begin();
        let old_result = backend.list(old.query()).await;
        let new = list
            .set_filters(SearchFilter {
                search: "bank".to_string(),
            })
            .unwrap();
        let new_result = backend.list(new.query()).await;

        assert_eq!(list.apply(new, new_result), Applied::Current);
        assert_eq!(list.apply(old, old_result), Applied::Stale);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].name, "bank");
    }

    #[tokio::test]
    async fn reset_outlives_tickets_issued_before_it() {
        let backend = backend(&["private", "shared"]);
        let mut list = ListController::<Wallets>::with_page_size(20);

        let before = list.reload();
        list.reset();
        assert_eq!(list.view(), ListView::Loading);
        assert_eq!(list.query().page_size, 20);
        let result = backend.list(before.query()).await;
        assert_eq!(list.apply(before.clone(), result), Applied::Stale);

        let after = list.reload();
        assert!(after.seq() > before.seq());
        let result = backend.list(before.query()).await;
        assert_eq!(list.apply(before, result), Applied::Stale);
        assert!(list.items().is_empty());
    }

    #[tokio::test]
    async fn filter_change_resets_to_first_page() {
        let backend = backend(&["a", "bb", "ccc"]);
        let mut list = ListController::<Wallets>::with_page_size(1);
        list.fetch(&backend).await;
        let ticket = list.set_page(2);
        let result = backend.list(ticket.query()).await;
        list.apply(ticket, result);
        assert_eq!(list.pagination().current_page, 2);

        let ticket = list
            .set_filters(SearchFilter {
                search: "b".to_string(),
            })
            .unwrap();
        assert_eq!(ticket.query().page, 0);
        assert!(
            list.set_filters(SearchFilter {
                search: "b".to_string(),
            })
            .is_none()
        );
    }

    #[tokio::test]
    async fn error_keeps_last_good_items() {
        let mut backend = backend(&["cash"]);
        let mut list = ListController::<Wallets>::new();
        list.fetch(&backend).await;
        assert_eq!(list.items().len(), 1);

        backend.fail = true;
        list.fetch(&backend).await;
        assert_eq!(list.status(), LoadStatus::Error);
        assert_eq!(list.error(), Some(Wallets::LOAD_ERROR));
        assert_eq!(list.items().len(), 1);
    }

    #[tokio::test]
    async fn error_without_items_shows_message() {
        let backend = FakeWallets {
            fail: true,
            ..FakeWallets::default()
        };
        let mut list = ListController::<Wallets>::new();
        list.fetch(&backend).await;
        assert_eq!(
            list.view(),
            ListView::Error("Không thể tải danh sách ví. Vui lòng thử lại.")
        );
    }

    #[tokio::test]
    async fn empty_result_is_not_an_error() {
        let backend = backend(&[]);
        let mut list = ListController::<Wallets>::new();
        list.fetch(&backend).await;
        assert_eq!(list.view(), ListView::Empty);
        assert_eq!(list.error(), None);
    }

    #[tokio::test]
    async fn mismatched_page_is_rejected() {
        let mut list = ListController::<Wallets>::new();
        let ticket = list.set_page(1);
        let response = PageResponse::Paged(PagedBody {
            items: vec![wallet("cash")],
            current_page: Some(0),
            page_size: None,
            total_items: None,
            total_pages: None,
        });
        list.apply(ticket, Ok(response));
        assert_eq!(list.status(), LoadStatus::Error);
        assert!(list.items().is_empty());
    }

    #[test]
    fn page_size_cycles_and_resets_page() {
        let mut list = ListController::<Wallets>::new();
        list.set_page(3);
        let ticket = list.cycle_page_size();
        assert_eq!(ticket.query().page_size, 20);
        assert_eq!(ticket.query().page, 0);
        list.set_page_size(50);
        assert_eq!(list.cycle_page_size().query().page_size, 5);
    }

    #[tokio::test]
    async fn selection_stays_in_bounds() {
        let backend = backend(&["a", "bb"]);
        let mut list = ListController::<Wallets>::new();
        list.fetch(&backend).await;
        list.select_next();
        list.select_next();
        assert_eq!(list.selected(), 1);
        list.select_prev();
        list.select_prev();
        assert_eq!(list.selected(), 0);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.queries.lock().unwrap()[0].page_size, 10);
    }
}
