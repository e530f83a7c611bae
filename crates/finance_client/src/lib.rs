//! Client-side state and data access for the personal finance backend.
//!
//! [`http::ApiClient`] is the only thing that speaks HTTP. Everything above
//! it goes through the [`resource::Backend`] and [`session::AuthBackend`]
//! traits, which keeps controllers and forms testable without a server.
pub mod aggregate;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod forms;
pub mod http;
pub mod list;
pub mod money;
pub mod resource;
pub mod routes;
pub mod session;
pub mod storage;

pub use error::ClientError;
pub use http::ApiClient;
pub use list::ListController;
pub use resource::{Backend, Categories, Resource, Transactions, Wallets};
pub use session::{SessionState, SessionStore};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
