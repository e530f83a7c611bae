pub mod categories;
pub mod dashboard;
pub mod list;
pub mod login;
pub mod transactions;
pub mod wallets;
