//! The user service: coordinates cache, network, and the transform worker.
//!
//! This is the caller-facing API of the crate. A single instance is
//! constructed at startup and shared by reference; the cache behind it is
//! only ever mutated here.
//!
//! `load_page` answers from the cache when the page is still fresh and
//! fetches otherwise. `process_users` picks the working set (latest page, or
//! every valid cached record when a filter is active) and hands it to the
//! background worker.

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::api::{ApiError, FetchUsers};
use crate::cache::PageCache;
use crate::models::{GroupBy, Processed};
use crate::worker::WorkerHandle;

struct State {
    cache: PageCache,
    /// Most recently loaded page; the default working set for unfiltered
    /// grouping requests.
    last_page: Option<u32>,
}

/// Orchestrator over one paginated user data source.
pub struct UserService<F> {
    fetcher: F,
    worker: WorkerHandle,
    state: Mutex<State>,
}

impl<F: FetchUsers> UserService<F> {
    pub fn new(fetcher: F, cache: PageCache, worker: WorkerHandle) -> Self {
        Self {
            fetcher,
            worker,
            state: Mutex::new(State {
                cache,
                last_page: None,
            }),
        }
    }

    /// Load one page, from cache when fresh, from the network otherwise.
    ///
    /// Returns the number of records on the page. A failed fetch leaves the
    /// cache untouched; previously cached pages stay usable.
    pub async fn load_page(&self, page: u32) -> Result<usize, ApiError> {
        if page == 0 {
            return Err(ApiError::InvalidPage(page));
        }

        {
            let mut state = self.state.lock().await;
            if state.cache.is_valid(page) {
                debug!(page, "cache hit, skipping fetch");
                state.last_page = Some(page);
                let count = state.cache.get(page).map_or(0, |e| e.users.len());
                return Ok(count);
            }
        }

        // Miss: fetch outside the lock so a slow response doesn't block
        // other callers.
        let result = self.fetcher.fetch_page(page).await?;
        let count = result.results.len();
        info!(page, records = count, "page fetched and cached");

        let mut state = self.state.lock().await;
        state.cache.put(page, result.results);
        state.last_page = Some(page);
        Ok(count)
    }

    /// Group (and optionally filter) the working set on the worker thread.
    ///
    /// With a non-empty filter term the working set is every valid cached
    /// record across pages; otherwise it is the most recently loaded page.
    /// An empty working set resolves with an empty result rather than
    /// hanging or erroring.
    pub async fn process_users(&self, group_by: GroupBy, filter_term: &str) -> Processed {
        let working_set = {
            let state = self.state.lock().await;
            if filter_term.trim().is_empty() {
                state
                    .last_page
                    .and_then(|page| state.cache.get(page))
                    .map(|entry| entry.users.clone())
                    .unwrap_or_default()
            } else {
                state.cache.all_valid_users()
            }
        };

        if working_set.is_empty() {
            debug!(%group_by, "empty working set");
            return Processed::default();
        }

        debug!(%group_by, filter = filter_term, records = working_set.len(), "dispatching transform");
        self.worker.process(&working_set, group_by, filter_term).await
    }

    /// Drop everything cached, in memory and on disk.
    pub async fn clear_cache(&self) {
        let mut state = self.state.lock().await;
        state.cache.clear();
        state.last_page = None;
        info!("cache cleared");
    }

    /// Count of valid records across all cached pages.
    pub async fn total_loaded_users(&self) -> usize {
        self.state.lock().await.cache.total_valid_users()
    }

    /// Ascending page numbers currently valid in the cache.
    pub async fn loaded_pages(&self) -> Vec<u32> {
        self.state.lock().await.cache.valid_pages()
    }
}
