//! The site service: configuration, content, translations and error reporting
//! behind one request entry point.
//!
//! # Lifecycle
//!
//! ```text
//! Site::open(config)  ──►  render(target, locale)*  ──►  drop
//!                    ▲
//!                    └── reload()  (watcher, on content or locale change)
//! ```
//!
//! # Request Flow
//!
//! ```text
//! target ──► Location ──► router::resolve ──┬──► Redirect { to }
//!                                           └──► Render { lang, intent }
//!                                                   │
//!                          ContentRequest? ──► RouteRenderer::load
//!                                                   │
//!                                 boundary::guard(html views) ──► Rendered::Page
//! ```

use crate::{
    config::SiteConfig,
    content::{AssetStore, ContentResolver, FsStore, SettingsData},
    i18n::{Lang, Translator},
    router::{self, Location, Navigation, RouteIntent, ScrollPlan},
    render::{
        Chrome, ContentRequest, ErrorContext, ErrorReporter, LogReporter, PageContent, RouteRenderer,
        View, ViewContext, ViewState,
        boundary::{guard, recovery_page},
        html,
    },
};
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use serde::Serialize;
use std::sync::Arc;

/// Everything known about a request target before HTML is produced.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub location: Location,
    pub navigation: Navigation,
    pub scroll: ScrollPlan,
    /// Fetched content, for render outcomes whose route needs any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewState<PageContent>>,
}

/// Response to a request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Redirect { to: String },
    Page { status: u16, html: String },
}

pub struct Site<S = FsStore> {
    config: SiteConfig,
    resolver: Arc<ContentResolver<S>>,
    translator: ArcSwap<Translator>,
    reporter: Arc<dyn ErrorReporter>,
}

impl Site<FsStore> {
    /// Index `content.root` and load `content.locales`.
    pub fn open(config: SiteConfig) -> Result<Self> {
        let store = FsStore::new(&config.content.root);
        Self::with_store(config, store, Arc::new(LogReporter))
    }
}

impl<S: AssetStore> Site<S> {
    pub fn with_store(config: SiteConfig, store: S, reporter: Arc<dyn ErrorReporter>) -> Result<Self> {
        let resolver = ContentResolver::new(store)
            .with_context(|| format!("Failed to index `{}`", config.content.root.display()))?;
        let translator = Translator::load(&config.content.locales);

        Ok(Self {
            config,
            resolver: Arc::new(resolver),
            translator: ArcSwap::from_pointee(translator),
            reporter,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn resolver(&self) -> &ContentResolver<S> {
        &self.resolver
    }

    /// Rebuild the content index and reload translations.
    ///
    /// Requests in flight finish against the previous snapshot.
    pub fn reload(&self) -> Result<usize> {
        let assets = self.resolver.reindex().context("Failed to reindex content")?;
        self.translator
            .store(Arc::new(Translator::load(&self.config.content.locales)));
        Ok(assets)
    }

    /// Route `target` and fetch the content it needs.
    ///
    /// `locale` is the client's preferred locale, used for the bare root only.
    pub async fn resolve(&self, target: &str, locale: Option<&str>) -> Resolution {
        let location = Location::parse(target);
        let navigation = router::resolve(&location, locale);
        let scroll = ScrollPlan::for_location(&location);

        let view = match &navigation {
            Navigation::Render { lang, intent } => match ContentRequest::for_intent(*lang, intent) {
                Some(request) => {
                    let renderer = RouteRenderer::new(Arc::clone(&self.resolver));
                    Some(renderer.load(request).await)
                }
                None => None,
            },
            Navigation::Redirect { .. } => None,
        };

        Resolution {
            location,
            navigation,
            scroll,
            view,
        }
    }

    /// Produce the response for `target`.
    pub async fn render(&self, target: &str, locale: Option<&str>) -> Rendered {
        let resolution = self.resolve(target, locale).await;
        let (lang, intent) = match &resolution.navigation {
            Navigation::Redirect { to } => return Rendered::Redirect { to: to.clone() },
            Navigation::Render { lang, intent } => (*lang, intent),
        };

        let chrome = self.chrome(lang).await;
        let translator = self.translator.load_full();
        let context = ErrorContext {
            location: resolution.location.path.clone(),
            language: lang,
            page: intent.name().to_owned(),
            url: target.to_owned(),
        };

        let ctx = ViewContext {
            lang,
            t: &translator,
            chrome: &chrome,
            base_url: self.config.base.url_prefix(),
            path: &resolution.location.path,
        };

        let status = status_of(intent, resolution.view.as_ref());
        let outcome = guard(&context, self.reporter.as_ref(), || {
            let view = select_view(&ctx, intent, resolution.view.as_ref());
            Ok(html::document(&ctx, &view))
        });

        match outcome {
            Ok(html) => Rendered::Page { status, html },
            Err(failure) => Rendered::Page {
                status: 500,
                html: recovery_page(&context, &translator, &failure, self.config.serve.debug),
            },
        }
    }

    /// Navigation, footer and settings for `lang`, with `[base]` standing in for
    /// missing settings.
    async fn chrome(&self, lang: Lang) -> Chrome {
        let mut settings = self.resolver.settings(lang).await;
        if settings == SettingsData::default() {
            settings.site_name = self.config.base.title.clone();
            settings.site_description = Some(self.config.base.description.clone());
        }

        Chrome {
            navigation: self.resolver.navigation(lang).await,
            footer: self.resolver.footer(lang).await,
            settings,
        }
    }
}

fn select_view(ctx: &ViewContext, intent: &RouteIntent, state: Option<&ViewState<PageContent>>) -> View {
    match (intent, state) {
        (RouteIntent::Home, _) => html::home(ctx),
        (RouteIntent::NotFound, _) => html::not_found(ctx),
        (_, Some(ViewState::Loaded(PageContent::Page(page)))) => html::page(ctx, page),
        (_, Some(ViewState::Loaded(PageContent::Post(post)))) => html::post(ctx, post),
        (_, Some(ViewState::Loaded(PageContent::PostList { posts }))) => html::blog_index(ctx, posts),
        (_, Some(ViewState::Error(err))) => html::load_error(ctx, err),
        (_, Some(ViewState::Idle | ViewState::Loading) | None) => html::loading(ctx),
    }
}

fn status_of(intent: &RouteIntent, state: Option<&ViewState<PageContent>>) -> u16 {
    match (intent, state) {
        (RouteIntent::NotFound, _) | (_, Some(ViewState::Error(_))) => 404,
        _ => 200,
    }
}
