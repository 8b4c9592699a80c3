//! Client-side hydration bootstrap.
//!
//! On the first view the snapshot embedded by the prerender pass is used
//! without touching the repository. Any other view loads lazily through the
//! same route table, dispatcher and index policy the server uses. Every call
//! is tagged with a generation; a load that resolves after a newer call was
//! issued is dropped and never becomes the current view.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::LoadFailure;
use crate::index::{IndexPolicy, LoadStatus};
use crate::loader::Dispatcher;
use crate::payload::InitialPayload;
use crate::repository::ContentRepository;
use crate::route::{RouteMatch, RouteTable};
use crate::snapshot::ContentSnapshot;

/// Lazy loads slower than this resolve as absent.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// What the client shows for one pathname.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    /// The route the pathname resolved to.
    pub route: RouteMatch,
    pub status: LoadStatus,
    /// `None` while loading.
    pub snapshot: Option<ContentSnapshot>,
    /// Robots decision, made with the same policy as the prerender pass.
    pub indexable: bool,
}

impl PageView {
    fn loading(route: RouteMatch) -> Self {
        Self {
            route,
            status: LoadStatus::Loading,
            snapshot: None,
            indexable: false,
        }
    }

    fn settled(
        route: RouteMatch,
        status: LoadStatus,
        snapshot: ContentSnapshot,
        policy: &IndexPolicy,
    ) -> Self {
        let indexable = policy.should_index(&route, status, snapshot.has_content());
        Self {
            route,
            status,
            snapshot: Some(snapshot),
            indexable,
        }
    }

    pub fn pathname(&self) -> &str {
        &self.route.pathname
    }

    /// Whether the view has renderable content.
    pub fn has_content(&self) -> bool {
        self.snapshot.as_ref().is_some_and(ContentSnapshot::has_content)
    }

    pub fn should_index(&self) -> bool {
        self.indexable
    }
}

#[derive(Debug, Default)]
struct ViewState {
    generation: u64,
    view: Option<PageView>,
}

/// Drives page views on the client.
pub struct HydrationBootstrap<R> {
    routes: Arc<RouteTable>,
    dispatcher: Dispatcher<R>,
    policy: IndexPolicy,
    embedded: Mutex<Option<InitialPayload>>,
    state: Mutex<ViewState>,
    load_timeout: Duration,
}

impl<R: ContentRepository> HydrationBootstrap<R> {
    /// `embedded` is the payload read from the prerendered document, if any.
    /// It is consumed by the first [`bootstrap`](Self::bootstrap) call.
    pub fn new(
        routes: Arc<RouteTable>,
        dispatcher: Dispatcher<R>,
        embedded: Option<InitialPayload>,
    ) -> Self {
        Self {
            routes,
            dispatcher,
            policy: IndexPolicy::default(),
            embedded: Mutex::new(embedded),
            state: Mutex::new(ViewState::default()),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Use the deny-lists the server was configured with.
    pub fn with_policy(mut self, policy: IndexPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    pub fn policy(&self) -> &IndexPolicy {
        &self.policy
    }

    pub fn load_timeout(&self) -> Duration {
        self.load_timeout
    }

    /// View for the most recently issued pathname.
    pub fn current(&self) -> Option<PageView> {
        self.state.lock().view.clone()
    }

    /// Show `location`, a raw URL or path as the browser reports it.
    /// Returns the settled view, or `None` when a newer call superseded this
    /// one before its load resolved.
    pub async fn bootstrap(&self, location: &str) -> Option<PageView> {
        // Normalized exactly once, by the route table, as on the server.
        let route = self.routes.resolve(location);
        let generation = self.issue(PageView::loading(route.clone()));

        let embedded = self.embedded.lock().take();
        if let Some(payload) = embedded {
            if payload.matches(&route.pathname) {
                tracing::debug!(pathname = %route.pathname, "hydrating from embedded payload");
                let view =
                    PageView::settled(route, LoadStatus::Embedded, payload.snapshot, &self.policy);
                return self.commit(generation, view);
            }
            tracing::debug!(
                embedded = %payload.pathname,
                requested = %route.pathname,
                "discarding stale embedded payload"
            );
        }

        let snapshot =
            match tokio::time::timeout(self.load_timeout, self.dispatcher.load(&route)).await {
                Ok(snapshot) => snapshot,
                Err(_) => {
                    let failure = LoadFailure::TimedOut;
                    tracing::warn!(
                        pathname = %route.pathname,
                        timeout_ms = self.load_timeout.as_millis() as u64,
                        "lazy load timed out"
                    );
                    metrics::counter!(
                        "vitrina_loader_failures_total",
                        "kind" => route.kind.as_str(),
                        "reason" => failure.as_str()
                    )
                    .increment(1);
                    ContentSnapshot::not_found(route.kind)
                }
            };

        let status = if snapshot.is_found() {
            LoadStatus::Loaded
        } else {
            LoadStatus::Absent
        };
        let view = PageView::settled(route, status, snapshot, &self.policy);
        self.commit(generation, view)
    }

    /// Start a new generation showing `view`.
    fn issue(&self, view: PageView) -> u64 {
        let mut state = self.state.lock();
        state.generation += 1;
        state.view = Some(view);
        state.generation
    }

    /// Store `view` if `generation` is still the latest.
    fn commit(&self, generation: u64, view: PageView) -> Option<PageView> {
        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!(
                pathname = %view.route.pathname,
                generation,
                latest = state.generation,
                "dropping superseded load"
            );
            return None;
        }
        state.view = Some(view.clone());
        Some(view)
    }
}
