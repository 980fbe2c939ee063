//! Implements a struct that holds the state shared by the route handlers.

use std::sync::{Arc, Mutex};

use crate::expense::ExpenseStore;

/// The state of the web server.
///
/// The store mutex serializes the read-modify-write cycle of the mutating
/// handlers, so there is exactly one logical writer at a time.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The repository that owns the persisted expense list.
    pub store: Arc<Mutex<ExpenseStore>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] around an expense store.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". It is validated when a request needs it, not here.
    pub fn new(store: ExpenseStore, local_timezone: &str) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
