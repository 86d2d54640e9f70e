use crate::error::ClimateApiError;
use crate::metrics;
use crate::store::Store;

use async_trait::async_trait;
use serde::Serialize;

/// Trait for climate data queries.
///
/// This forms the contract between the API layer and the store. Each query is a single read
/// against the store and never modifies it.
#[async_trait]
pub trait Query: Send + Sync {
    /// Result of the query, serialised as the response body.
    type Output: Serialize + Send;

    /// Name of the query, used to label spans and metrics.
    const NAME: &'static str;

    /// Execute the query.
    ///
    /// # Arguments
    ///
    /// * `store`: Store to read from
    async fn execute(&self, store: &Store) -> Result<Self::Output, ClimateApiError>;
}

/// Execute a query, recording metrics for it.
///
/// # Arguments
///
/// * `query`: The query to execute
/// * `store`: Store to read from
#[tracing::instrument(level = "DEBUG", skip_all, fields(query = Q::NAME))]
pub async fn run<Q: Query>(query: &Q, store: &Store) -> Result<Q::Output, ClimateApiError> {
    let start = std::time::Instant::now();
    let result = query.execute(store).await;
    metrics::record_query_metrics(Q::NAME, start.elapsed());
    result
}
