//! Per-route view state with stale-request protection.
//!
//! ```text
//!            navigate(req)                commit(current ticket)
//!   Idle ───────────────────► Loading ───────────────────────────► Loaded | Error
//!                               ▲  │
//!                               │  │ navigate(other req)
//!                               └──┘ (previous ticket is now stale)
//! ```
//!
//! Every `begin()` bumps a generation counter and hands out a [`Ticket`]. Only the
//! ticket of the latest generation may commit, so a slow response for an earlier
//! navigation is dropped no matter when it arrives. The underlying fetch is not
//! aborted; its result is ignored.

use crate::{
    content::{AssetStore, BlogPost, BlogPostSummary, ContentError, ContentPage, ContentResolver},
    i18n::Lang,
    router::RouteIntent,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::{future::Future, sync::Arc};
use tokio::task::JoinHandle;

// ============================================================================
// State Machine
// ============================================================================

/// What a route currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Error(ViewError),
}

/// A failed load, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewError {
    pub message: String,
    pub not_found: bool,
}

impl From<&ContentError> for ViewError {
    fn from(err: &ContentError) -> Self {
        Self {
            message: err.to_string(),
            not_found: err.is_not_found(),
        }
    }
}

/// Permission to commit the result of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// View state plus the generation counter guarding it.
#[derive(Debug)]
pub struct ViewSlot<T> {
    generation: u64,
    state: ViewState<T>,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            state: ViewState::Idle,
        }
    }
}

impl<T> ViewSlot<T> {
    /// Start a new request: move to `Loading` and invalidate older tickets.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = ViewState::Loading;
        Ticket(self.generation)
    }

    /// Apply a result if `ticket` is still current. Returns whether it was applied.
    pub fn commit(&mut self, ticket: Ticket, result: Result<T, ViewError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = match result {
            Ok(value) => ViewState::Loaded(value),
            Err(err) => ViewState::Error(err),
        };
        true
    }

    /// Invalidate every outstanding ticket without changing what is displayed.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }
}

// ============================================================================
// Content Requests
// ============================================================================

/// Content a route needs before it can render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentRequest {
    Page { lang: Lang, slug: String },
    Post { lang: Lang, slug: String },
    PostList { lang: Lang },
}

impl ContentRequest {
    /// The fetch an intent needs, if any. `Home` and `NotFound` render without content.
    pub fn for_intent(lang: Lang, intent: &RouteIntent) -> Option<Self> {
        match intent {
            RouteIntent::Home | RouteIntent::NotFound => None,
            RouteIntent::BlogIndex => Some(Self::PostList { lang }),
            RouteIntent::BlogPost { slug } => Some(Self::Post {
                lang,
                slug: slug.trim().to_owned(),
            }),
            RouteIntent::GenericPage { slug } => Some(Self::Page {
                lang,
                slug: slug.trim().to_owned(),
            }),
        }
    }
}

/// Fetched content, one variant per request kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent {
    Page(ContentPage),
    Post(BlogPost),
    PostList { posts: Vec<BlogPostSummary> },
}

/// Anything that can satisfy a [`ContentRequest`].
pub trait ContentSource: Send + Sync + 'static {
    fn fetch(
        &self,
        request: &ContentRequest,
    ) -> impl Future<Output = Result<PageContent, ContentError>> + Send;
}

impl<S: AssetStore> ContentSource for ContentResolver<S> {
    fn fetch(
        &self,
        request: &ContentRequest,
    ) -> impl Future<Output = Result<PageContent, ContentError>> + Send {
        async move {
            match request {
                ContentRequest::Page { lang, slug } => {
                    self.resolve_page(*lang, slug).await.map(PageContent::Page)
                }
                ContentRequest::Post { lang, slug } => {
                    self.resolve_post(*lang, slug).await.map(PageContent::Post)
                }
                ContentRequest::PostList { lang } => self
                    .list_posts(*lang)
                    .await
                    .map(|posts| PageContent::PostList { posts }),
            }
        }
    }
}

// ============================================================================
// Route Renderer
// ============================================================================

/// Drives one route's view: issues fetches and commits only the latest result.
pub struct RouteRenderer<C> {
    source: Arc<C>,
    slot: Arc<Mutex<ViewSlot<PageContent>>>,
    current: Mutex<Option<ContentRequest>>,
}

impl<C: ContentSource> RouteRenderer<C> {
    pub fn new(source: Arc<C>) -> Self {
        Self {
            source,
            slot: Arc::new(Mutex::new(ViewSlot::default())),
            current: Mutex::new(None),
        }
    }

    /// Show `request`. Re-navigating to the current request is a no-op.
    ///
    /// Returns the spawned fetch, which completes after its result has been
    /// committed or discarded. Must be called within a tokio runtime.
    pub fn navigate(&self, request: ContentRequest) -> Option<JoinHandle<()>> {
        {
            let mut current = self.current.lock();
            if current.as_ref() == Some(&request) {
                return None;
            }
            *current = Some(request.clone());
        }

        let ticket = self.slot.lock().begin();
        let source = Arc::clone(&self.source);
        let slot = Arc::clone(&self.slot);

        Some(tokio::spawn(async move {
            let result = source.fetch(&request).await;
            slot.lock().commit(ticket, result.map_err(|err| ViewError::from(&err)));
        }))
    }

    /// Navigate and wait for the fetch, returning the resulting state.
    pub async fn load(&self, request: ContentRequest) -> ViewState<PageContent> {
        if let Some(handle) = self.navigate(request) {
            // a panicking fetch leaves the view in Loading
            handle.await.ok();
        }
        self.snapshot()
    }

    /// Drop interest in any pending fetch.
    pub fn unmount(&self) {
        self.slot.lock().cancel();
        *self.current.lock() = None;
    }

    pub fn snapshot(&self) -> ViewState<PageContent> {
        self.slot.lock().state().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryStore;
    use rustc_hash::FxHashMap;
    use tokio::sync::Notify;

    /// Source that answers pages named after their slug; gated slugs wait for a signal.
    #[derive(Default)]
    struct GatedSource {
        gates: FxHashMap<String, Arc<Notify>>,
    }

    impl GatedSource {
        fn gate(&mut self, slug: &str) -> Arc<Notify> {
            let notify = Arc::new(Notify::new());
            self.gates.insert(slug.to_owned(), Arc::clone(&notify));
            notify
        }
    }

    impl ContentSource for GatedSource {
        fn fetch(
            &self,
            request: &ContentRequest,
        ) -> impl Future<Output = Result<PageContent, ContentError>> + Send {
            let request = request.clone();
            let gate = match &request {
                ContentRequest::Page { slug, .. } => self.gates.get(slug).cloned(),
                _ => None,
            };
            async move {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                match request {
                    ContentRequest::Page { lang, slug } if slug != "missing" => {
                        Ok(PageContent::Page(ContentPage {
                            meta: crate::content::PageMeta {
                                title: slug.to_uppercase(),
                                description: None,
                            },
                            body: format!("body of {slug}"),
                            slug,
                            lang,
                        }))
                    }
                    ContentRequest::Page { lang, slug } => Err(ContentError::NotFound {
                        kind: crate::content::AssetKind::Page,
                        lang,
                        slug,
                    }),
                    _ => Ok(PageContent::PostList { posts: Vec::new() }),
                }
            }
        }
    }

    fn page(slug: &str) -> ContentRequest {
        ContentRequest::Page {
            lang: Lang::En,
            slug: slug.to_owned(),
        }
    }

    fn loaded_slug(state: &ViewState<PageContent>) -> Option<&str> {
        match state {
            ViewState::Loaded(PageContent::Page(page)) => Some(&page.slug),
            _ => None,
        }
    }

    #[test]
    fn test_slot_transitions() {
        let mut slot = ViewSlot::<u32>::default();
        assert_eq!(slot.state(), &ViewState::Idle);

        let ticket = slot.begin();
        assert_eq!(slot.state(), &ViewState::Loading);
        assert!(slot.commit(ticket, Ok(7)));
        assert_eq!(slot.state(), &ViewState::Loaded(7));
    }

    #[test]
    fn test_slot_rejects_stale_ticket() {
        let mut slot = ViewSlot::<u32>::default();
        let stale = slot.begin();
        let fresh = slot.begin();

        assert!(!slot.commit(stale, Ok(1)));
        assert_eq!(slot.state(), &ViewState::Loading);
        assert!(slot.commit(fresh, Ok(2)));
        assert!(!slot.commit(stale, Ok(1)));
        assert_eq!(slot.state(), &ViewState::Loaded(2));
    }

    #[test]
    fn test_slot_error_is_terminal_until_next_begin() {
        let mut slot = ViewSlot::<u32>::default();
        let ticket = slot.begin();
        let err = ViewError { message: "boom".into(), not_found: false };
        assert!(slot.commit(ticket, Err(err.clone())));
        assert_eq!(slot.state(), &ViewState::Error(err));

        let next = slot.begin();
        assert_eq!(slot.state(), &ViewState::Loading);
        assert!(slot.commit(next, Ok(1)));
    }

    #[test]
    fn test_slot_cancel_keeps_display() {
        let mut slot = ViewSlot::<u32>::default();
        let ticket = slot.begin();
        slot.cancel();
        assert!(!slot.commit(ticket, Ok(1)));
        assert_eq!(slot.state(), &ViewState::Loading);
    }

    #[test]
    fn test_request_for_intent() {
        assert_eq!(ContentRequest::for_intent(Lang::En, &RouteIntent::Home), None);
        assert_eq!(ContentRequest::for_intent(Lang::En, &RouteIntent::NotFound), None);
        assert_eq!(
            ContentRequest::for_intent(Lang::De, &RouteIntent::BlogIndex),
            Some(ContentRequest::PostList { lang: Lang::De })
        );
        assert_eq!(
            ContentRequest::for_intent(Lang::En, &RouteIntent::GenericPage { slug: " about ".into() }),
            Some(page("about"))
        );
        assert_eq!(
            ContentRequest::for_intent(Lang::En, &RouteIntent::BlogPost { slug: "x".into() }),
            Some(ContentRequest::Post { lang: Lang::En, slug: "x".into() })
        );
    }

    #[tokio::test]
    async fn test_superseded_request_never_applies() {
        let mut source = GatedSource::default();
        let gate_a = source.gate("a");
        let renderer = RouteRenderer::new(Arc::new(source));

        let a = renderer.navigate(page("a")).unwrap();
        assert_eq!(renderer.snapshot(), ViewState::Loading);

        let b = renderer.navigate(page("b")).unwrap();
        b.await.unwrap();
        assert_eq!(loaded_slug(&renderer.snapshot()), Some("b"));

        // A resolves late
        gate_a.notify_one();
        a.await.unwrap();
        assert_eq!(loaded_slug(&renderer.snapshot()), Some("b"));
    }

    #[tokio::test]
    async fn test_stale_error_never_applies() {
        let mut source = GatedSource::default();
        let gate = source.gate("missing");
        let renderer = RouteRenderer::new(Arc::new(source));

        let stale = renderer.navigate(page("missing")).unwrap();
        renderer.navigate(page("ok")).unwrap().await.unwrap();

        gate.notify_one();
        stale.await.unwrap();
        assert_eq!(loaded_slug(&renderer.snapshot()), Some("ok"));
    }

    #[tokio::test]
    async fn test_same_request_is_not_refetched() {
        let renderer = RouteRenderer::new(Arc::new(GatedSource::default()));
        assert!(renderer.navigate(page("a")).is_some());
        assert!(renderer.navigate(page("a")).is_none());
    }

    #[tokio::test]
    async fn test_unmount_discards_pending() {
        let mut source = GatedSource::default();
        let gate = source.gate("a");
        let renderer = RouteRenderer::new(Arc::new(source));

        let pending = renderer.navigate(page("a")).unwrap();
        renderer.unmount();
        gate.notify_one();
        pending.await.unwrap();
        assert_eq!(renderer.snapshot(), ViewState::Loading);
    }

    #[tokio::test]
    async fn test_load_error_state() {
        let renderer = RouteRenderer::new(Arc::new(GatedSource::default()));
        let ViewState::Error(err) = renderer.load(page("missing")).await else {
            panic!("expected error state");
        };
        assert!(err.not_found);
        assert_eq!(err.message, "Page not found: en/missing");
    }

    #[tokio::test]
    async fn test_resolver_as_source() {
        let store = MemoryStore::new()
            .with("blog/en/launch.md", "---\ntitle: Launch\n---\nhi")
            .with("pages/en/about.md", "---\ntitle: About\n---\nHello");
        let renderer = RouteRenderer::new(Arc::new(ContentResolver::new(store).unwrap()));

        let state = renderer.load(page("about")).await;
        assert_eq!(loaded_slug(&state), Some("about"));

        let state = renderer
            .load(ContentRequest::Post { lang: Lang::En, slug: "missing-slug".into() })
            .await;
        assert!(matches!(state, ViewState::Error(ViewError { not_found: true, .. })));

        let state = renderer.load(ContentRequest::PostList { lang: Lang::En }).await;
        let ViewState::Loaded(PageContent::PostList { posts }) = state else {
            panic!("expected post list");
        };
        assert_eq!(posts[0].title, "Launch");
    }
}
