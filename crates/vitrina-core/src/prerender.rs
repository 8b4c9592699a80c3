//! One-shot server-side render pass.
//!
//! normalize → match → exactly one load → render host → payload. Markup and
//! payload are produced from the same snapshot value, so the document and
//! its embedded data cannot disagree.

use std::sync::Arc;
use std::time::Instant;

use crate::index::{IndexPolicy, LoadStatus, RobotsDirective};
use crate::loader::Dispatcher;
use crate::payload::InitialPayload;
use crate::repository::ContentRepository;
use crate::route::{RouteMatch, RouteTable};
use crate::snapshot::ContentSnapshot;

/// Document head fields a render host derives from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHead {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Open Graph type (`website`, `article`, `video.movie`...).
    pub og_type: String,
}

/// Turns snapshots into markup. Must have a presentation for every kind,
/// found or not.
pub trait RenderHost: Send + Sync {
    /// Body markup for the snapshot.
    fn render_markup(&self, snapshot: &ContentSnapshot) -> String;

    /// Head fields for the snapshot.
    fn head(&self, snapshot: &ContentSnapshot) -> PageHead;
}

impl<H: RenderHost + ?Sized> RenderHost for Arc<H> {
    fn render_markup(&self, snapshot: &ContentSnapshot) -> String {
        (**self).render_markup(snapshot)
    }

    fn head(&self, snapshot: &ContentSnapshot) -> PageHead {
        (**self).head(snapshot)
    }
}

/// Output of one render pass.
#[derive(Debug, Clone)]
pub struct Prerendered {
    pub route: RouteMatch,
    pub markup: String,
    pub payload: InitialPayload,
    pub head: PageHead,
    pub status: LoadStatus,
    pub indexable: bool,
}

impl Prerendered {
    pub fn robots(&self) -> RobotsDirective {
        RobotsDirective::from_indexable(self.indexable)
    }

    pub fn is_found(&self) -> bool {
        self.payload.snapshot.is_found()
    }

    pub fn snapshot(&self) -> &ContentSnapshot {
        &self.payload.snapshot
    }
}

/// Runs the render pass for a URL.
pub struct PrerenderHost<R, H> {
    routes: Arc<RouteTable>,
    dispatcher: Dispatcher<R>,
    host: H,
    policy: IndexPolicy,
}

impl<R: ContentRepository, H: RenderHost> PrerenderHost<R, H> {
    pub fn new(routes: Arc<RouteTable>, dispatcher: Dispatcher<R>, host: H) -> Self {
        Self {
            routes,
            dispatcher,
            host,
            policy: IndexPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: IndexPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.routes
    }

    pub fn dispatcher(&self) -> &Dispatcher<R> {
        &self.dispatcher
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn policy(&self) -> &IndexPolicy {
        &self.policy
    }

    /// Resolve and load `url` without rendering. Used by the JSON snapshot
    /// endpoint that serves lazy client loads.
    pub async fn load(&self, url: &str) -> (RouteMatch, ContentSnapshot) {
        let route = self.routes.resolve(url);
        let snapshot = self.dispatcher.load(&route).await;
        (route, snapshot)
    }

    /// Render `url`. Performs exactly one load.
    pub async fn render(&self, url: &str) -> Prerendered {
        let started = Instant::now();
        let (route, snapshot) = self.load(url).await;

        let status = if snapshot.is_found() {
            LoadStatus::Loaded
        } else {
            LoadStatus::Absent
        };
        let indexable = self.policy.should_index(&route, status, snapshot.has_content());

        let markup = self.host.render_markup(&snapshot);
        let head = self.host.head(&snapshot);

        let kind = route.kind.as_str();
        let outcome = if snapshot.is_found() { "found" } else { "not_found" };
        metrics::counter!("vitrina_page_renders_total", "kind" => kind, "outcome" => outcome)
            .increment(1);
        metrics::histogram!("vitrina_render_duration_seconds", "kind" => kind)
            .record(started.elapsed().as_secs_f64());

        tracing::debug!(
            pathname = %route.pathname,
            kind,
            outcome,
            indexable,
            "page prerendered"
        );

        let payload = InitialPayload::new(route.pathname.clone(), snapshot);
        Prerendered {
            route,
            markup,
            payload,
            head,
            status,
            indexable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::PageKind;
    use crate::payload::extract_payload;
    use crate::repository::{Collection, MemoryRepository};
    use crate::snapshot::PageContent;
    use serde_json::json;

    /// Renders a one-line summary of the snapshot.
    struct LineHost;

    impl RenderHost for LineHost {
        fn render_markup(&self, snapshot: &ContentSnapshot) -> String {
            match snapshot.content() {
                Some(PageContent::Event(event)) => format!("<h1>{}</h1>", event.title),
                Some(other) => format!("<p>{}</p>", other.kind()),
                None => format!("<p>{} not found</p>", snapshot.kind()),
            }
        }

        fn head(&self, snapshot: &ContentSnapshot) -> PageHead {
            PageHead {
                title: snapshot.kind().to_string(),
                og_type: "website".to_string(),
                ..PageHead::default()
            }
        }
    }

    fn host(repo: MemoryRepository) -> PrerenderHost<MemoryRepository, LineHost> {
        PrerenderHost::new(RouteTable::shared(), Dispatcher::new(repo), LineHost)
    }

    fn untold() -> MemoryRepository {
        MemoryRepository::new().with_record(
            Collection::Events,
            "untold-2025",
            json!({ "title": "UNTOLD 2025", "starts_at": "2025-08-07T16:00:00Z" }),
        )
    }

    #[tokio::test]
    async fn event_render_is_indexable_and_reads_once() {
        let repo = untold();
        let rendered = host(repo.clone())
            .render("https://vitrina.ro/evenimente/untold-2025?utm=x")
            .await;

        assert_eq!(rendered.route.kind, PageKind::Event);
        assert_eq!(rendered.route.params.text("slug"), Some("untold-2025"));
        assert_eq!(rendered.markup, "<h1>UNTOLD 2025</h1>");
        assert_eq!(rendered.status, LoadStatus::Loaded);
        assert!(rendered.indexable);
        assert_eq!(rendered.robots(), RobotsDirective::Index);
        assert_eq!(rendered.payload.pathname, "/evenimente/untold-2025");
        assert_eq!(repo.read_count(), 1);
    }

    #[tokio::test]
    async fn payload_rerenders_to_identical_markup() {
        let prerender = host(untold());
        let rendered = prerender.render("/evenimente/untold-2025").await;

        let document = format!(
            "<main>{}</main><script type=\"application/json\" id=\"__VITRINA_DATA__\">{}</script>",
            rendered.markup,
            rendered.payload.to_script_json().unwrap()
        );
        let payload = extract_payload(&document).unwrap();
        assert_eq!(payload, rendered.payload);
        assert_eq!(
            prerender.host().render_markup(&payload.snapshot),
            rendered.markup
        );
    }

    #[tokio::test]
    async fn unknown_path_renders_fallback() {
        let rendered = host(MemoryRepository::new()).render("/nu-exista").await;
        assert_eq!(rendered.route.kind, PageKind::Generic);
        assert!(!rendered.is_found());
        assert_eq!(rendered.status, LoadStatus::Absent);
        assert_eq!(rendered.markup, "<p>generic not found</p>");
        assert!(!rendered.indexable);
    }

    #[tokio::test]
    async fn embed_is_never_indexable() {
        let repo = MemoryRepository::new().with_record(
            Collection::Embeds,
            "abc123",
            json!({ "title": "UNTOLD", "target_url": "https://vitrina.ro/evenimente/untold-2025" }),
        );
        let rendered = host(repo).render("/embed/abc123").await;
        assert!(rendered.is_found());
        assert!(!rendered.indexable);
        assert_eq!(rendered.robots().as_str(), "noindex");
    }

    #[tokio::test]
    async fn policy_prefixes_apply() {
        let repo = MemoryRepository::new().with_record(
            Collection::Pages,
            "/cont/setari",
            json!({ "title": "Setări" }),
        );
        let rendered = host(repo).render("/cont/setari").await;
        assert!(rendered.is_found());
        assert!(!rendered.indexable);
    }
}
