//! Stateful search coordinator.
//!
//! The coordinator owns one [`SearchState`] and is its single writer. It is
//! constructed with its [`CatalogService`] collaborator (explicit dependency
//! injection, no ambient lookup) and drives every fetch:
//!
//! * any filter or sort setter resets the page to 1 and issues a new search
//!   whose results REPLACE the current ones;
//! * [`load_more`](SearchCoordinator::load_more) increments the page and
//!   APPENDS the next page without re-fetching earlier ones;
//! * free-text query changes are debounced behind a cancellable scheduled
//!   task, so rapid keystrokes collapse into one fetch of the final value;
//!   all other setters fetch immediately;
//! * every issued fetch carries a monotonic sequence token. A resolution
//!   whose token is no longer current is dropped without touching state
//!   ("last request wins"), so out-of-order transport resolutions can never
//!   apply stale results;
//! * a failed fetch moves the machine to [`Phase::Error`] with the message
//!   preserved and the previous results still visible.
//!
//! All transitions happen through `watch::Sender::send_modify`, so each one
//! is published to subscribers before the next is accepted. Teardown
//! ([`shutdown`](SearchCoordinator::shutdown) or drop) cancels the pending
//! debounce and marks in-flight fetches ignorable; nothing is aborted at
//! the transport level.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::catalog::CatalogService;
use crate::config::SearchConfig;
use crate::models::{Category, FilterSet, Product, SortSpec};

/// The coordinator's state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No fetch in flight.
    #[default]
    Idle,
    /// A replacing search is in flight.
    Searching,
    /// An appending load-more fetch is in flight.
    LoadingMore,
    /// The last fetch failed; `error` holds the message and the previous
    /// results remain visible.
    Error,
}

/// Snapshot of the coordinator's state, published on every transition.
///
/// Mutated only by the coordinator's own handlers; consumers read it via
/// [`SearchCoordinator::snapshot`] or [`SearchCoordinator::subscribe`].
#[derive(Debug, Clone)]
pub struct SearchState {
    pub filters: FilterSet,
    pub sort: SortSpec,
    /// Current page, 1-based.
    pub page: usize,
    /// The materialized result sequence: replaced by searches, extended by
    /// load-more.
    pub products: Vec<Product>,
    /// Total match count of the last resolved fetch, pre-pagination.
    pub total: usize,
    pub has_more: bool,
    pub phase: Phase,
    /// Message of the last failed fetch; cleared when the next search is
    /// issued.
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            filters: FilterSet::default(),
            sort: SortSpec::default(),
            page: 1,
            products: Vec::new(),
            total: 0,
            has_more: false,
            phase: Phase::Idle,
            error: None,
        }
    }
}

impl SearchState {
    /// True while any fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Searching | Phase::LoadingMore)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Replace,
    Append,
}

struct Inner {
    catalog: Arc<dyn CatalogService>,
    state: watch::Sender<SearchState>,
    page_size: usize,
    debounce: Duration,
    /// Monotonic sequence of issued fetches; a resolution is applied only
    /// if its token is still the latest.
    seq: AtomicU64,
    debounce_task: Mutex<Option<JoinHandle<()>>>,
    categories: RwLock<Vec<Category>>,
    shutdown: CancellationToken,
}

/// Single-writer controller over one [`SearchState`].
pub struct SearchCoordinator {
    inner: Arc<Inner>,
}

impl SearchCoordinator {
    /// Build a coordinator around its fetch collaborator. No fetch is
    /// issued until [`init`](Self::init) or a setter is called.
    pub fn new(catalog: Arc<dyn CatalogService>, config: SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            inner: Arc::new(Inner {
                catalog,
                state,
                page_size: config.page_size,
                debounce: Duration::from_millis(config.debounce_ms),
                seq: AtomicU64::new(0),
                debounce_task: Mutex::new(None),
                categories: RwLock::new(Vec::new()),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Load the category facets and issue the initial page-1 search.
    ///
    /// A facet fetch failure is non-fatal: it is logged and the facet list
    /// stays empty.
    pub async fn init(&self) {
        match self.inner.catalog.fetch_categories().await {
            Ok(categories) => *self.inner.categories.write().unwrap() = categories,
            Err(e) => warn!(error = %e, "category facet fetch failed; facet list left empty"),
        }
        Inner::issue_fetch(&self.inner, FetchKind::Replace);
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    /// Observe every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    /// Category facets loaded at [`init`](Self::init).
    pub fn categories(&self) -> Vec<Category> {
        self.inner.categories.read().unwrap().clone()
    }

    /// Update the free-text query. The visible filter state changes
    /// immediately; the fetch fires after the debounce interval has elapsed
    /// with no further keystrokes. An empty string clears the query.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.state.send_modify(|s| {
            s.filters.query = if text.is_empty() { None } else { Some(text) };
            s.page = 1;
        });
        Inner::restart_debounce(&self.inner);
    }

    /// Set or clear the category facet. Fetches immediately.
    pub fn set_category(&self, category: Option<String>) {
        self.apply_filter_change(|f| f.category = category);
    }

    /// Set both price bounds together. The engine accepts either bound
    /// independently; this convenience setter imposes the coupling the
    /// storefront UI uses.
    pub fn set_price_range(&self, min: f64, max: f64) {
        self.apply_filter_change(|f| {
            f.min_price = Some(min);
            f.max_price = Some(max);
        });
    }

    /// Set the minimum rating; 0 behaves as pass-through.
    pub fn set_min_rating(&self, min_rating: f32) {
        self.apply_filter_change(|f| f.min_rating = Some(min_rating));
    }

    /// Constrain availability, or `None` for either.
    pub fn set_in_stock(&self, in_stock: Option<bool>) {
        self.apply_filter_change(|f| f.in_stock = in_stock);
    }

    pub fn set_is_new(&self, is_new: Option<bool>) {
        self.apply_filter_change(|f| f.is_new = is_new);
    }

    pub fn set_is_featured(&self, is_featured: Option<bool>) {
        self.apply_filter_change(|f| f.is_featured = is_featured);
    }

    pub fn set_is_on_sale(&self, is_on_sale: Option<bool>) {
        self.apply_filter_change(|f| f.is_on_sale = is_on_sale);
    }

    /// Change the sort order. Fetches immediately and resets to page 1.
    pub fn set_sort(&self, sort: SortSpec) {
        self.inner.cancel_debounce();
        self.inner.state.send_modify(|s| {
            s.sort = sort;
            s.page = 1;
        });
        Inner::issue_fetch(&self.inner, FetchKind::Replace);
    }

    /// Clear the whole [`FilterSet`], preserving the sort order.
    pub fn reset_filters(&self) {
        self.apply_filter_change(|f| *f = FilterSet::default());
    }

    /// Clear only the text query. Unlike keystrokes this is a single
    /// deliberate action, so it fetches immediately.
    pub fn clear_search(&self) {
        self.apply_filter_change(|f| f.query = None);
    }

    /// Fetch the next page and append it. No-op while a fetch is in flight,
    /// while a query debounce is pending (that search will restart from
    /// page 1), or when nothing more matches.
    pub fn load_more(&self) {
        let can_load = {
            let s = self.inner.state.borrow();
            s.has_more && !s.is_loading()
        };
        if !can_load || self.inner.debounce_pending() {
            return;
        }
        self.inner.state.send_modify(|s| s.page += 1);
        Inner::issue_fetch(&self.inner, FetchKind::Append);
    }

    /// Tear the coordinator down: cancel any pending debounce and mark
    /// in-flight fetches ignorable on resolution. Also runs on drop.
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
        self.inner.cancel_debounce();
    }

    fn apply_filter_change(&self, change: impl FnOnce(&mut FilterSet)) {
        self.inner.cancel_debounce();
        self.inner.state.send_modify(|s| {
            change(&mut s.filters);
            s.page = 1;
        });
        Inner::issue_fetch(&self.inner, FetchKind::Replace);
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Inner {
    /// Issue a fetch for the latest filter/sort/page snapshot.
    ///
    /// The sequence token is taken and the phase transition published
    /// synchronously, before the fetch task is spawned, so a later setter
    /// always supersedes an earlier one regardless of task scheduling.
    fn issue_fetch(this: &Arc<Inner>, kind: FetchKind) {
        let token = this.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let (filters, sort, page) = {
            let s = this.state.borrow();
            (s.filters.clone(), s.sort, s.page)
        };
        this.state.send_modify(|s| {
            s.phase = match kind {
                FetchKind::Replace => Phase::Searching,
                FetchKind::Append => Phase::LoadingMore,
            };
            s.error = None;
        });

        let inner = Arc::clone(this);
        tokio::spawn(async move {
            inner.run_fetch(kind, token, filters, sort, page).await;
        });
    }

    async fn run_fetch(
        &self,
        kind: FetchKind,
        token: u64,
        filters: FilterSet,
        sort: SortSpec,
        page: usize,
    ) {
        let result = tokio::select! {
            _ = self.shutdown.cancelled() => return,
            r = self.catalog.fetch_products(&filters, sort, page, self.page_size) => r,
        };

        if self.shutdown.is_cancelled() {
            return;
        }
        if self.seq.load(Ordering::SeqCst) != token {
            // Superseded by a newer request; never surfaced.
            debug!(token, "discarding stale fetch resolution");
            return;
        }

        match result {
            Ok(fetched) => self.state.send_modify(|s| {
                match kind {
                    FetchKind::Replace => s.products = fetched.items,
                    FetchKind::Append => s.products.extend(fetched.items),
                }
                s.total = fetched.total;
                s.has_more = fetched.has_more;
                s.phase = Phase::Idle;
                s.error = None;
            }),
            Err(e) => self.state.send_modify(|s| {
                // A failed append materialized nothing; roll the page back
                // so a retry re-fetches it instead of skipping ahead.
                if kind == FetchKind::Append {
                    s.page -= 1;
                }
                s.phase = Phase::Error;
                s.error = Some(e.to_string());
            }),
        }
    }

    /// Abort and restart the debounce timer for the current query text.
    /// The fetch fires only if the interval elapses without another
    /// keystroke, an immediate setter, or teardown.
    fn restart_debounce(this: &Arc<Inner>) {
        let mut guard = this.debounce_task.lock().unwrap();
        if let Some(handle) = guard.take() {
            handle.abort();
        }
        let inner = Arc::clone(this);
        // The interval is measured from the keystroke, not from when the
        // spawned task is first polled.
        let deadline = tokio::time::Instant::now() + this.debounce;
        *guard = Some(tokio::spawn(async move {
            tokio::select! {
                _ = inner.shutdown.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => Inner::issue_fetch(&inner, FetchKind::Replace),
            }
        }));
    }

    /// True while a scheduled query fetch has not yet fired.
    fn debounce_pending(&self) -> bool {
        self.debounce_task
            .lock()
            .map(|guard| guard.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    fn cancel_debounce(&self) {
        if let Ok(mut guard) = self.debounce_task.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SearchState::default();
        assert_eq!(state.page, 1);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.filters.is_empty());
        assert!(state.products.is_empty());
        assert!(!state.has_more);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_loading_phases() {
        let mut state = SearchState::default();
        assert!(!state.is_loading());
        state.phase = Phase::Searching;
        assert!(state.is_loading());
        state.phase = Phase::LoadingMore;
        assert!(state.is_loading());
        state.phase = Phase::Error;
        assert!(!state.is_loading());
    }
}
