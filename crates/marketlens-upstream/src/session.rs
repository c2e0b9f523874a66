//! Per-consumer search session.
//!
//! A session owns at most one in-flight upstream query. Submitting a new
//! query cancels the previous one, so a slow answer for an old query can
//! never overwrite the results of a newer one. Dropping the session cancels
//! whatever is still running.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

use crate::client::{SearchClient, SearchResults, SearchWindow};
use crate::error::UpstreamError;
use crate::normalize::normalize_value;

/// What became of a submitted query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Completed(SearchResults),
    /// A newer query was submitted, or the session was cancelled, before
    /// this one finished. Its results were discarded.
    Superseded,
}

pub struct SearchSession {
    client: Arc<SearchClient>,
    window: SearchWindow,
    current: Mutex<Option<CancellationToken>>,
    generation: AtomicU64,
}

impl SearchSession {
    #[must_use]
    pub fn new(client: Arc<SearchClient>, window: SearchWindow) -> Self {
        Self {
            client,
            window,
            current: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Runs `query`, cancelling any query this session still has in flight.
    ///
    /// # Errors
    ///
    /// Returns the upstream failure for this query. Cancellation is not an
    /// error; it is reported as [`SearchOutcome::Superseded`].
    pub async fn submit(&self, query: &str) -> Result<SearchOutcome, UpstreamError> {
        let token = CancellationToken::new();
        let generation = {
            let mut current = self.lock_current();
            if let Some(previous) = current.replace(token.clone()) {
                previous.cancel();
            }
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        tracing::debug!(query = %query, generation, "search submitted");

        let body = match self
            .client
            .search_with_cancel(query, self.window, &token)
            .await
        {
            Ok(body) => body,
            Err(UpstreamError::Cancelled) => return Ok(SearchOutcome::Superseded),
            Err(e) => return Err(e),
        };

        // The request may have completed in the same instant a newer query
        // was submitted; only the latest generation may publish.
        if token.is_cancelled() || self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(query = %query, generation, "discarding superseded search results");
            return Ok(SearchOutcome::Superseded);
        }

        let products = normalize_value(&body);
        tracing::info!(query = %query, count = products.len(), "search completed");
        Ok(SearchOutcome::Completed(SearchResults {
            query: query.to_owned(),
            products,
        }))
    }

    /// Cancels the in-flight query, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.lock_current().take() {
            token.cancel();
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
