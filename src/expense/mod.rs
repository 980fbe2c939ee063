//! The expense record, its file-backed store, and the page and endpoints
//! that operate on it.

mod clear_endpoint;
mod core;
mod create_endpoint;
mod csv;
mod delete_endpoint;
mod expenses_page;
mod export_endpoint;
mod form;
mod models;
mod store;
mod view;

pub use core::{Expense, ExpenseId};
pub use store::ExpenseStore;

pub(crate) use clear_endpoint::clear_expenses_endpoint;
pub(crate) use create_endpoint::create_expense_endpoint;
pub(crate) use delete_endpoint::delete_expense_endpoint;
pub(crate) use expenses_page::get_expenses_page;
pub(crate) use export_endpoint::export_csv_endpoint;
