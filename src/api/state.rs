//! Application state for the K-Tax API.

use std::sync::Arc;

use crate::config::AdminCredentials;
use crate::repository::DeductionStore;

/// Shared application state.
///
/// Holds the deduction store every handler reads from and the credentials
/// the admin routes check against.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DeductionStore>,
    credentials: Arc<AdminCredentials>,
}

impl AppState {
    /// Creates application state over `store`.
    pub fn new<S>(store: S, credentials: AdminCredentials) -> Self
    where
        S: DeductionStore + 'static,
    {
        Self::with_shared_store(Arc::new(store), credentials)
    }

    /// Creates application state over a store that is also held elsewhere.
    pub fn with_shared_store(store: Arc<dyn DeductionStore>, credentials: AdminCredentials) -> Self {
        Self {
            store,
            credentials: Arc::new(credentials),
        }
    }

    /// Returns the deduction store.
    pub fn store(&self) -> &dyn DeductionStore {
        self.store.as_ref()
    }

    /// Returns the admin credentials.
    pub fn credentials(&self) -> &AdminCredentials {
        &self.credentials
    }
}
