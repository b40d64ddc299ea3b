//! Article feed controller.
//!
//! A feed session moves Idle -> Loading -> Loaded | Errored and back to
//! Loading on every retrieval. Each retrieval carries a sequence number and
//! only the most recently issued one may write the session state, so a slow
//! response can never overwrite a newer one.

use super::catalog::sample_posts;
use super::client::{ArticleSource, FeedError, Page};
use super::debounce::Debouncer;
use super::filter::visible_posts;
use crate::types::BlogPost;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RetrievalError {
    #[error("failed to load blog posts: {0}")]
    FetchFailed(FeedError),

    #[error("failed to search blog posts: {0}")]
    SearchFailed(FeedError),
}

impl RetrievalError {
    /// Banner text shown to visitors.
    pub fn user_message(&self) -> &'static str {
        match self {
            RetrievalError::FetchFailed(_) => "Failed to load blog posts. Please try again later.",
            RetrievalError::SearchFailed(_) => {
                "Failed to search blog posts. Please try again later."
            }
        }
    }
}

/// Outcome of one retrieval. `posts` is always the set to display, including
/// the fallback set when `error` is present.
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub posts: Vec<BlogPost>,
    pub error: Option<RetrievalError>,
}

/// Lists articles, optionally for one tag. Falls back to the sample posts.
pub async fn fetch_by_tag<S>(source: &S, tag: Option<&str>, page: Page) -> Retrieved
where
    S: ArticleSource + ?Sized,
{
    match source.list(tag, page).await {
        Ok(posts) => Retrieved { posts, error: None },
        Err(err) => {
            tracing::error!(tag, error = %err, "error fetching articles");
            Retrieved {
                posts: sample_posts(),
                error: Some(RetrievalError::FetchFailed(err)),
            }
        }
    }
}

/// Server-side search. A failed search yields nothing rather than unrelated
/// sample content.
pub async fn search<S>(source: &S, query: &str, page: Page) -> Retrieved
where
    S: ArticleSource + ?Sized,
{
    match source.search(query, page).await {
        Ok(posts) => Retrieved { posts, error: None },
        Err(err) => {
            tracing::error!(query, error = %err, "error searching articles");
            Retrieved {
                posts: Vec::new(),
                error: Some(RetrievalError::SearchFailed(err)),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval {
    Listing { tag: Option<String> },
    Search { query: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub phase: FeedPhase,
    pub posts: Vec<BlogPost>,
    pub error: Option<RetrievalError>,
    pub search_term: String,
    pub selected_tag: Option<String>,
    /// Sequence number of the retrieval that produced `posts`.
    pub sequence: u64,
}

impl FeedSnapshot {
    pub fn is_loading(&self) -> bool {
        self.phase == FeedPhase::Loading
    }

    pub fn visible_posts(&self) -> Vec<&BlogPost> {
        visible_posts(&self.posts, &self.search_term, self.selected_tag.as_deref())
    }
}

/// Proof that a retrieval was started; hand it back to [`FeedController::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub sequence: u64,
    pub request: Retrieval,
}

struct Inner<S> {
    source: S,
    page: Page,
    latest: AtomicU64,
    state: watch::Sender<FeedSnapshot>,
    debouncer: Mutex<Debouncer>,
    last_request: Mutex<Option<Retrieval>>,
}

pub struct FeedController<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for FeedController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ArticleSource + 'static> FeedController<S> {
    pub fn new(source: S) -> Self {
        Self::with_debouncer(source, Debouncer::default())
    }

    pub fn with_debouncer(source: S, debouncer: Debouncer) -> Self {
        let (state, _) = watch::channel(FeedSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                source,
                page: Page::default(),
                latest: AtomicU64::new(0),
                state,
                debouncer: Mutex::new(debouncer),
                last_request: Mutex::new(None),
            }),
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn visible_posts(&self) -> Vec<BlogPost> {
        self.inner
            .state
            .borrow()
            .visible_posts()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Issues a new sequence number and moves the session to Loading. Both
    /// happen under the state write lock, so a later ticket's completion can
    /// never be followed by an earlier ticket's Loading transition.
    pub fn begin(&self, request: Retrieval) -> Ticket {
        let mut sequence = 0;
        self.inner.state.send_modify(|state| {
            sequence = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *lock(&self.inner.last_request) = Some(request.clone());
            state.phase = FeedPhase::Loading;
            state.error = None;
        });
        tracing::debug!(sequence, ?request, "retrieval started");
        Ticket { sequence, request }
    }

    /// Applies a finished retrieval unless a newer one has been issued since.
    pub fn complete(&self, ticket: &Ticket, outcome: Retrieved) -> bool {
        let latest = &self.inner.latest;
        let applied = self.inner.state.send_if_modified(|state| {
            if ticket.sequence != latest.load(Ordering::SeqCst) {
                return false;
            }
            state.phase = if outcome.error.is_some() {
                FeedPhase::Errored
            } else {
                FeedPhase::Loaded
            };
            state.posts = outcome.posts;
            state.error = outcome.error;
            state.sequence = ticket.sequence;
            true
        });
        if applied {
            tracing::debug!(sequence = ticket.sequence, "retrieval applied");
        } else {
            tracing::debug!(sequence = ticket.sequence, "discarding superseded retrieval");
        }
        applied
    }

    pub async fn fetch_by_tag(&self, tag: Option<String>) -> FeedSnapshot {
        let ticket = self.begin(Retrieval::Listing { tag: tag.clone() });
        let outcome = fetch_by_tag(&self.inner.source, tag.as_deref(), self.inner.page).await;
        self.complete(&ticket, outcome);
        self.snapshot()
    }

    pub async fn search(&self, query: &str) -> FeedSnapshot {
        if query.trim().is_empty() {
            return self.load().await;
        }
        let ticket = self.begin(Retrieval::Search {
            query: query.to_string(),
        });
        let outcome = search(&self.inner.source, query, self.inner.page).await;
        self.complete(&ticket, outcome);
        self.snapshot()
    }

    /// Lists articles for the currently selected tag.
    pub async fn load(&self) -> FeedSnapshot {
        let tag = self.inner.state.borrow().selected_tag.clone();
        self.fetch_by_tag(tag).await
    }

    /// Records search input. Non-empty input searches once it has been stable
    /// for the debounce delay; empty input cancels that and lists immediately.
    pub async fn set_search_term(&self, text: &str) {
        self.inner.state.send_modify(|state| {
            state.search_term = text.to_string();
        });

        if text.trim().is_empty() {
            self.debouncer().cancel();
            self.load().await;
            return;
        }

        let this = self.clone();
        let query = text.to_string();
        self.debouncer().schedule(async move {
            this.search(&query).await;
        });
    }

    pub async fn select_tag(&self, tag: Option<String>) -> FeedSnapshot {
        self.debouncer().cancel();
        self.inner.state.send_modify(|state| {
            state.selected_tag = tag.clone();
        });
        self.fetch_by_tag(tag).await
    }

    /// Selects `tag`, or clears the selection when it is already active.
    pub async fn toggle_tag(&self, tag: &str) -> FeedSnapshot {
        let already = self.inner.state.borrow().selected_tag.as_deref() == Some(tag);
        let next = if already { None } else { Some(tag.to_string()) };
        self.select_tag(next).await
    }

    /// Re-issues the last retrieval, or the default listing if none ran yet.
    pub async fn retry(&self) -> FeedSnapshot {
        let last = lock(&self.inner.last_request).clone();
        match last {
            Some(Retrieval::Search { query }) => self.search(&query).await,
            Some(Retrieval::Listing { tag }) => self.fetch_by_tag(tag).await,
            None => self.load().await,
        }
    }

    pub fn dismiss_error(&self) {
        self.inner.state.send_if_modified(|state| {
            if state.error.take().is_none() {
                return false;
            }
            if state.phase == FeedPhase::Errored {
                state.phase = FeedPhase::Loaded;
            }
            true
        });
    }

    pub fn has_pending_search(&self) -> bool {
        self.debouncer().is_pending()
    }

    fn debouncer(&self) -> MutexGuard<'_, Debouncer> {
        lock(&self.inner.debouncer)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl ArticleSource for Offline {
        async fn list(&self, _tag: Option<&str>, _page: Page) -> Result<Vec<BlogPost>, FeedError> {
            Err(FeedError::Transport("connection refused".into()))
        }

        async fn search(&self, _query: &str, _page: Page) -> Result<Vec<BlogPost>, FeedError> {
            Err(FeedError::Status {
                status: 503,
                body: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn failed_listing_falls_back_to_samples() {
        let outcome = fetch_by_tag(&Offline, None, Page::default()).await;
        assert_eq!(outcome.posts.len(), 3);
        assert!(matches!(outcome.error, Some(RetrievalError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn failed_search_is_empty() {
        let outcome = search(&Offline, "x", Page::default()).await;
        assert!(outcome.posts.is_empty());
        assert!(matches!(outcome.error, Some(RetrievalError::SearchFailed(_))));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let feed = FeedController::new(Offline);
        let older = feed.begin(Retrieval::Listing { tag: None });
        let newer = feed.begin(Retrieval::Search {
            query: "rust".into(),
        });

        let newest_posts = sample_posts().split_off(2);
        assert!(feed.complete(
            &newer,
            Retrieved {
                posts: newest_posts.clone(),
                error: None,
            }
        ));
        assert!(!feed.complete(
            &older,
            Retrieved {
                posts: sample_posts(),
                error: None,
            }
        ));

        let snapshot = feed.snapshot();
        assert_eq!(snapshot.sequence, newer.sequence);
        assert_eq!(snapshot.posts, newest_posts);
        assert_eq!(snapshot.phase, FeedPhase::Loaded);
    }

    #[test]
    fn begin_clears_error_and_marks_loading() {
        let feed = FeedController::new(Offline);
        let ticket = feed.begin(Retrieval::Listing { tag: None });
        feed.complete(
            &ticket,
            Retrieved {
                posts: Vec::new(),
                error: Some(RetrievalError::FetchFailed(FeedError::Decode("bad".into()))),
            },
        );
        assert_eq!(feed.snapshot().phase, FeedPhase::Errored);

        feed.begin(Retrieval::Listing { tag: None });
        let snapshot = feed.snapshot();
        assert!(snapshot.is_loading());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn racing_retrievals_settle_on_latest() {
        let feed = FeedController::new(Offline);

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let feed = &feed;
                scope.spawn(move || {
                    for round in 0..50 {
                        let ticket = feed.begin(Retrieval::Listing {
                            tag: Some(format!("{worker}-{round}")),
                        });
                        feed.complete(
                            &ticket,
                            Retrieved {
                                posts: Vec::new(),
                                error: None,
                            },
                        );
                    }
                });
            }
        });

        let snapshot = feed.snapshot();
        assert_eq!(snapshot.sequence, 400);
        assert_eq!(snapshot.phase, FeedPhase::Loaded);
    }

    #[tokio::test]
    async fn dismiss_keeps_fallback_posts() {
        let feed = FeedController::new(Offline);
        let snapshot = feed.load().await;
        assert_eq!(snapshot.phase, FeedPhase::Errored);
        assert_eq!(
            snapshot.error.as_ref().map(RetrievalError::user_message),
            Some("Failed to load blog posts. Please try again later.")
        );

        feed.dismiss_error();
        let snapshot = feed.snapshot();
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.phase, FeedPhase::Loaded);
        assert_eq!(snapshot.posts.len(), 3);
    }
}
