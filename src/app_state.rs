use crate::cli::CommandLineArgs;
use crate::error::ClimateApiError;
use crate::store::Store;

use std::sync::Arc;

/// Shared application state passed to each query request handler.
pub struct AppState {
    /// Measurement store.
    pub store: Store,
}

impl AppState {
    /// Create and return an [AppState], opening the measurement store named in `args`.
    pub async fn new(args: &CommandLineArgs) -> Result<Self, ClimateApiError> {
        let store = Store::connect(args).await?;
        Ok(Self::with_store(store))
    }

    /// Create and return an [AppState] around an already open store.
    pub fn with_store(store: Store) -> Self {
        Self { store }
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
