//! Background requests. Each one runs on its own tokio task and reports
//! back to the event loop through the channel; nothing here touches
//! [`AppState`](crate::app::state::AppState) directly.
//!
//! Every message is stamped with the session generation it was issued
//! under, so results that outlive a logout can be told apart.
use api_types::{
    category::Category,
    page::PageResponse,
    transaction::{MonthlyBalance, Transaction},
    wallet::Wallet,
};
use chrono::Utc;
use chrono_tz::Tz;
use finance_client::{
    ApiClient, Backend, ClientError, Resource,
    dashboard::{self, ChartData, Panel},
    forms::Mutation,
    list::{FetchTicket, ListQuery, SearchFilter, TransactionFilters},
    resource::{Categories, Transactions, Wallets},
};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Options offered by the wallet and category pickers.
const OPTIONS_PAGE_SIZE: u32 = 100;

pub type Sender = mpsc::UnboundedSender<(u64, Message)>;
pub type Receiver = mpsc::UnboundedReceiver<(u64, Message)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Transactions,
    Wallets,
    Categories,
}

#[derive(Debug)]
pub enum Message {
    TransactionsListed(
        FetchTicket<TransactionFilters>,
        Result<PageResponse<Transaction>, ClientError>,
    ),
    WalletsListed(FetchTicket<SearchFilter>, Result<PageResponse<Wallet>, ClientError>),
    CategoriesListed(FetchTicket<SearchFilter>, Result<PageResponse<Category>, ClientError>),
    /// Dashboard panels carry the load they belong to.
    Summary(u64, Panel<MonthlyBalance>),
    Recent(u64, Panel<Vec<Transaction>>),
    Charts(u64, Panel<ChartData>),
    Options(Result<(Vec<Wallet>, Vec<Category>), ClientError>),
    Saved(Target, Result<(), ClientError>),
    Deleted(Target, Result<(), ClientError>),
}

/// Ties a resource to the messages that carry its results.
pub trait Routed: Resource {
    const TARGET: Target;

    fn listed(
        ticket: FetchTicket<Self::Filters>,
        result: Result<PageResponse<Self::Item>, ClientError>,
    ) -> Message;
}

impl Routed for Transactions {
    const TARGET: Target = Target::Transactions;

    fn listed(
        ticket: FetchTicket<TransactionFilters>,
        result: Result<PageResponse<Transaction>, ClientError>,
    ) -> Message {
        Message::TransactionsListed(ticket, result)
    }
}

impl Routed for Wallets {
    const TARGET: Target = Target::Wallets;

    fn listed(
        ticket: FetchTicket<SearchFilter>,
        result: Result<PageResponse<Wallet>, ClientError>,
    ) -> Message {
        Message::WalletsListed(ticket, result)
    }
}

impl Routed for Categories {
    const TARGET: Target = Target::Categories;

    fn listed(
        ticket: FetchTicket<SearchFilter>,
        result: Result<PageResponse<Category>, ClientError>,
    ) -> Message {
        Message::CategoriesListed(ticket, result)
    }
}

/// Sending half of the channel, bound to one session generation.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: Sender,
    generation: u64,
}

impl Outbox {
    pub fn new(tx: Sender, generation: u64) -> Self {
        Self { tx, generation }
    }

    fn deliver(&self, message: Message) {
        if self.tx.send((self.generation, message)).is_err() {
            tracing::debug!("event loop gone, dropping result");
        }
    }
}

pub fn spawn_list<R: Routed>(client: &ApiClient, outbox: &Outbox, ticket: FetchTicket<R::Filters>) {
    let client = client.clone();
    let outbox = outbox.clone();
    tokio::spawn(async move {
        let result = <ApiClient as Backend<R>>::list(&client, ticket.query()).await;
        outbox.deliver(R::listed(ticket, result));
    });
}

pub fn spawn_dashboard(client: &ApiClient, outbox: &Outbox, tz: Tz, seq: u64) {
    let now = Utc::now();

    let (summary_client, summary_outbox) = (client.clone(), outbox.clone());
    tokio::spawn(async move {
        let panel = dashboard::load_monthly_summary(&summary_client, now, tz).await;
        summary_outbox.deliver(Message::Summary(seq, panel));
    });

    let (recent_client, recent_outbox) = (client.clone(), outbox.clone());
    tokio::spawn(async move {
        let panel = dashboard::load_recent(&recent_client).await;
        recent_outbox.deliver(Message::Recent(seq, panel));
    });

    let (charts_client, charts_outbox) = (client.clone(), outbox.clone());
    tokio::spawn(async move {
        let panel = dashboard::load_expense_charts(&charts_client, now, tz).await;
        charts_outbox.deliver(Message::Charts(seq, panel));
    });
}

pub fn spawn_options(client: &ApiClient, outbox: &Outbox) {
    let client = client.clone();
    let outbox = outbox.clone();
    tokio::spawn(async move {
        let query = ListQuery::<SearchFilter>::new(OPTIONS_PAGE_SIZE);
        let (wallets, categories) = tokio::join!(
            <ApiClient as Backend<Wallets>>::list(&client, &query),
            <ApiClient as Backend<Categories>>::list(&client, &query),
        );
        let result = wallets.and_then(|wallets| {
            categories.map(|categories| (wallets.into_items(), categories.into_items()))
        });
        outbox.deliver(Message::Options(result));
    });
}

pub fn spawn_save<R: Routed>(client: &ApiClient, outbox: &Outbox, mutation: Mutation<R>) {
    let client = client.clone();
    let outbox = outbox.clone();
    tokio::spawn(async move {
        let result = mutation.send(&client).await;
        outbox.deliver(Message::Saved(R::TARGET, result));
    });
}

pub fn spawn_delete<R: Routed>(client: &ApiClient, outbox: &Outbox, id: Uuid) {
    let client = client.clone();
    let outbox = outbox.clone();
    tokio::spawn(async move {
        let result = <ApiClient as Backend<R>>::delete(&client, id).await;
        outbox.deliver(Message::Deleted(R::TARGET, result));
    });
}
