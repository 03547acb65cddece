//! Incremental job-feed controller.
//!
//! Retrieves listings page by page, merges them without re-fetching
//! already-seen pages, and applies client-side search over the materialized
//! items. Failures never escape the public operations; they are recorded
//! into [`FeedState::error`] for the owning view to display.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use setu_types::JobListing;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use super::employer::employer_display_name;
use crate::error::ClientError;

/// Transport seam for listing retrieval.
#[async_trait]
pub trait JobsGateway: Send + Sync {
    /// Fetches one page of listings starting at `skip`.
    async fn list_jobs(&self, skip: usize, limit: usize) -> Result<Vec<JobListing>, ClientError>;
}

/// Observable state of the feed.
///
/// `items` is deduplicated by listing id with insertion order preserved.
/// A page shorter than the requested limit is the sole signal that no
/// further pages exist.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub items: Vec<JobListing>,
    pub query: String,
    pub loading: bool,
    pub loading_more: bool,
    pub has_more: bool,
    pub error: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            loading: false,
            loading_more: false,
            has_more: true,
            error: None,
        }
    }
}

/// Orchestrates paginated retrieval of job listings.
///
/// At most one fetch is outstanding at a time: any operation entering while
/// `loading` or `loading_more` is set is a no-op that issues no network
/// call, which rules out duplicate-page fetches and out-of-order merges.
pub struct JobFeedController {
    gateway: Arc<dyn JobsGateway>,
    page_size: usize,
    state: RwLock<FeedState>,
    cancel: CancellationToken,
}

impl JobFeedController {
    /// Creates a controller fetching `page_size` listings per page.
    pub fn new(gateway: Arc<dyn JobsGateway>, page_size: usize) -> Self {
        Self {
            gateway,
            page_size,
            state: RwLock::new(FeedState::default()),
            cancel: CancellationToken::new(),
        }
    }

    /// Token tied to the owning view's lifetime.
    ///
    /// Cancelling it does not abort an in-flight request - there is no true
    /// transport cancellation - but guarantees that a request completing
    /// afterwards is never applied to the feed state.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Loads the first page, replacing any previously loaded items.
    ///
    /// Always permitted once no fetch is in flight, regardless of
    /// `has_more`; this is also the retry path after an error. An initial
    /// load failure discards previously loaded items.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.write().await;
            if state.loading || state.loading_more {
                return;
            }
            state.loading = true;
            state.error = None;
        }

        let fetched = self.gateway.list_jobs(0, self.page_size).await;
        if self.cancel.is_cancelled() {
            tracing::debug!("feed refresh completed after cancellation; result dropped");
            return;
        }

        let mut state = self.state.write().await;
        state.loading = false;
        match fetched {
            Ok(page) => {
                state.has_more = page.len() == self.page_size;
                state.items.clear();
                merge(&mut state.items, page);
            }
            Err(err) => {
                state.error = Some(err.user_message());
                state.items.clear();
            }
        }
    }

    /// Loads the next page and appends it.
    ///
    /// A no-op while a fetch is in flight or when the feed is exhausted.
    /// A load-more failure records the error but keeps the items already
    /// loaded.
    pub async fn load_more(&self) {
        let skip = {
            let mut state = self.state.write().await;
            if state.loading || state.loading_more || !state.has_more {
                return;
            }
            state.loading_more = true;
            state.error = None;
            state.items.len()
        };

        let fetched = self.gateway.list_jobs(skip, self.page_size).await;
        if self.cancel.is_cancelled() {
            tracing::debug!("feed load-more completed after cancellation; result dropped");
            return;
        }

        let mut state = self.state.write().await;
        state.loading_more = false;
        match fetched {
            Ok(page) => {
                state.has_more = page.len() == self.page_size;
                merge(&mut state.items, page);
            }
            Err(err) => {
                state.error = Some(err.user_message());
            }
        }
    }

    /// Sets the free-text search filter. Does not touch `items` or cursors.
    pub async fn set_query(&self, query: impl Into<String>) {
        self.state.write().await.query = query.into();
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> FeedState {
        self.state.read().await.clone()
    }

    /// The listings matching the current query, a derived view over
    /// `items`. An empty query matches everything.
    pub async fn visible(&self) -> Vec<JobListing> {
        let state = self.state.read().await;
        state
            .items
            .iter()
            .filter(|job| matches_query(job, &state.query))
            .cloned()
            .collect()
    }
}

/// Appends `page` to `items`, skipping ids already present. Protects the
/// merge when a page is re-requested with an overlapping skip.
fn merge(items: &mut Vec<JobListing>, page: Vec<JobListing>) {
    let mut seen: HashSet<i64> = items.iter().map(|job| job.id).collect();
    for job in page {
        if seen.insert(job.id) {
            items.push(job);
        }
    }
}

/// Case-insensitive substring match over title, employer display name and
/// location.
fn matches_query(job: &JobListing, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    job.display_title().to_lowercase().contains(&needle)
        || employer_display_name(job).to_lowercase().contains(&needle)
        || job.display_location().to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockGateway {
        pages: Mutex<VecDeque<Result<Vec<JobListing>, ClientError>>>,
        calls: AtomicUsize,
        yield_before_reply: bool,
    }

    impl MockGateway {
        fn new(pages: Vec<Result<Vec<JobListing>, ClientError>>) -> Arc<Self> {
            Arc::new(Self {
                pages: Mutex::new(pages.into()),
                calls: AtomicUsize::new(0),
                yield_before_reply: false,
            })
        }

        fn slow(pages: Vec<Result<Vec<JobListing>, ClientError>>) -> Arc<Self> {
            Arc::new(Self {
                pages: Mutex::new(pages.into()),
                calls: AtomicUsize::new(0),
                yield_before_reply: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobsGateway for MockGateway {
        async fn list_jobs(
            &self,
            _skip: usize,
            _limit: usize,
        ) -> Result<Vec<JobListing>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.yield_before_reply {
                tokio::task::yield_now().await;
            }
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn job(id: i64, title: &str, employer: &str, location: &str) -> JobListing {
        JobListing {
            id,
            title: Some(title.to_string()),
            employer_name: Some(employer.to_string()),
            location: Some(location.to_string()),
            ..Default::default()
        }
    }

    fn page(ids: std::ops::Range<i64>) -> Vec<JobListing> {
        ids.map(|id| job(id, &format!("Job {id}"), "Acme", "Pune"))
            .collect()
    }

    const LIMIT: usize = 4;

    #[tokio::test]
    async fn full_first_page_leaves_more_to_load() {
        let gateway = MockGateway::new(vec![Ok(page(0..LIMIT as i64))]);
        let controller = JobFeedController::new(gateway.clone(), LIMIT);

        controller.refresh().await;
        let state = controller.state().await;
        assert_eq!(state.items.len(), LIMIT);
        assert!(state.has_more);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn pages_merge_in_order_and_short_page_terminates() {
        let first = page(0..LIMIT as i64);
        let second = page(LIMIT as i64..LIMIT as i64 + 2);
        let gateway = MockGateway::new(vec![Ok(first.clone()), Ok(second.clone())]);
        let controller = JobFeedController::new(gateway.clone(), LIMIT);

        controller.refresh().await;
        controller.load_more().await;

        let state = controller.state().await;
        let mut expected = first;
        expected.extend(second);
        assert_eq!(state.items, expected);
        assert!(!state.has_more);
        assert_eq!(gateway.calls(), 2);
    }

    #[tokio::test]
    async fn overlapping_pages_never_duplicate_ids() {
        // Second page re-serves id 3 alongside new listings.
        let gateway = MockGateway::new(vec![
            Ok(page(0..4)),
            Ok(vec![
                job(3, "Job 3", "Acme", "Pune"),
                job(4, "Job 4", "Acme", "Pune"),
            ]),
        ]);
        let controller = JobFeedController::new(gateway, LIMIT);

        controller.refresh().await;
        controller.load_more().await;

        let state = controller.state().await;
        let ids: Vec<i64> = state.items.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn concurrent_load_more_issues_one_call() {
        let gateway = MockGateway::slow(vec![Ok(page(0..LIMIT as i64)), Ok(page(4..6))]);
        let controller = JobFeedController::new(gateway.clone(), LIMIT);
        controller.refresh().await;
        assert_eq!(gateway.calls(), 1);

        tokio::join!(controller.load_more(), controller.load_more());
        assert_eq!(gateway.calls(), 2);

        let state = controller.state().await;
        assert_eq!(state.items.len(), 6);
        assert!(!state.loading_more);
    }

    #[tokio::test]
    async fn load_more_is_noop_once_exhausted() {
        let gateway = MockGateway::new(vec![Ok(page(0..2))]);
        let controller = JobFeedController::new(gateway.clone(), LIMIT);

        controller.refresh().await;
        assert!(!controller.state().await.has_more);

        controller.load_more().await;
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn refresh_is_always_permitted_after_exhaustion() {
        let gateway = MockGateway::new(vec![Ok(page(0..2)), Ok(page(10..12))]);
        let controller = JobFeedController::new(gateway.clone(), LIMIT);

        controller.refresh().await;
        assert!(!controller.state().await.has_more);

        controller.refresh().await;
        assert_eq!(gateway.calls(), 2);
        let ids: Vec<i64> = controller.state().await.items.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn initial_load_failure_clears_items_and_retry_recovers() {
        let gateway = MockGateway::new(vec![
            Ok(page(0..LIMIT as i64)),
            Err(ClientError::network("connection refused")),
            Ok(page(0..2)),
        ]);
        let controller = JobFeedController::new(gateway, LIMIT);

        controller.refresh().await;
        assert_eq!(controller.state().await.items.len(), LIMIT);

        controller.refresh().await;
        let state = controller.state().await;
        assert!(state.items.is_empty());
        assert_eq!(state.error.as_deref(), Some("Network error - please try again."));

        controller.refresh().await;
        let state = controller.state().await;
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn load_more_failure_keeps_loaded_items() {
        let gateway = MockGateway::new(vec![
            Ok(page(0..LIMIT as i64)),
            Err(ClientError::Api {
                status: 500,
                detail: "boom".to_string(),
            }),
        ]);
        let controller = JobFeedController::new(gateway, LIMIT);

        controller.refresh().await;
        controller.load_more().await;

        let state = controller.state().await;
        assert_eq!(state.items.len(), LIMIT);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading_more);
    }

    #[tokio::test]
    async fn cancelled_fetch_is_never_applied() {
        let gateway = MockGateway::slow(vec![Ok(page(0..LIMIT as i64))]);
        let controller = JobFeedController::new(gateway.clone(), LIMIT);
        let token = controller.cancellation_token();

        tokio::join!(controller.refresh(), async {
            token.cancel();
        });

        assert_eq!(gateway.calls(), 1);
        assert!(controller.state().await.items.is_empty());
    }

    #[tokio::test]
    async fn search_filters_without_mutating_items() {
        let listing = job(1, "Frontend Developer", "TechCorp", "Remote");
        let other = job(2, "Backend Developer", "DataWorks", "Pune");
        let gateway = MockGateway::new(vec![Ok(vec![listing.clone(), other.clone()])]);
        let controller = JobFeedController::new(gateway, LIMIT);
        controller.refresh().await;

        for query in ["front", "TECHCORP", "Remote"] {
            controller.set_query(query).await;
            let visible = controller.visible().await;
            assert_eq!(visible, vec![listing.clone()], "query {query:?}");
        }

        controller.set_query("backend").await;
        assert_eq!(controller.visible().await, vec![other.clone()]);

        controller.set_query("").await;
        assert_eq!(controller.visible().await.len(), 2);

        // Filtering is a derived view; the materialized items are intact.
        assert_eq!(controller.state().await.items.len(), 2);
    }
}
