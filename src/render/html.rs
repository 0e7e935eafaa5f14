//! HTML views and the page layout.
//!
//! ```text
//! <body data-scroll-*>
//!   skip link ─► #main-content
//!   header      logo + navigation (hrefs prefixed with /{lang})
//!   <main>      one of the views below
//!   footer      copyright, links, social
//!   scroll script
//! </body>
//! ```
//!
//! Views return a [`View`] (head metadata plus main content); [`document`] wraps
//! it in the layout.

use super::{
    markdown::render_markdown,
    seo::{OgType, SeoMeta, escape_html},
    view::ViewError,
};
use crate::{
    content::{BlogPost, BlogPostSummary, ContentPage, FooterData, NavigationData, SettingsData},
    i18n::{Lang, Translator},
    router::{RouteIntent, ScrollPlan, href, lang_root},
};
use chrono::Datelike;

// ============================================================================
// Templates
// ============================================================================

/// Page layout (embedded at compile time)
const LAYOUT_TEMPLATE: &str = include_str!("../embed/layout.html");

/// Applies the scroll plan in the browser
const SCROLL_SCRIPT: &str = include_str!("../embed/scroll.js");

// ============================================================================
// Context
// ============================================================================

/// Site-wide data rendered around every view.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub navigation: NavigationData,
    pub footer: FooterData,
    pub settings: SettingsData,
}

/// Everything a view needs besides its own content.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub lang: Lang,
    pub t: &'a Translator,
    pub chrome: &'a Chrome,
    /// Absolute site URL without trailing slash, if configured.
    pub base_url: Option<&'a str>,
    /// Request path, used for the canonical URL.
    pub path: &'a str,
}

impl<'a> ViewContext<'a> {
    fn text(&self, ns: &str, key: &'a str) -> String {
        escape_html(self.t.t(self.lang, ns, key))
    }

    /// Head metadata shared by all views.
    fn seo(&self, title: impl Into<String>) -> SeoMeta {
        let settings = &self.chrome.settings;
        SeoMeta {
            canonical_url: self.base_url.map(|base| format!("{base}{}", self.path)),
            site_name: Some(settings.site_name.clone()),
            og_image: settings.default_og_image.clone(),
            ..SeoMeta::new(title, self.lang.og_locale())
        }
    }
}

/// A rendered view, not yet wrapped in the layout.
#[derive(Debug, Clone)]
pub struct View {
    pub seo: SeoMeta,
    pub main: String,
}

// ============================================================================
// Views
// ============================================================================

/// Localized landing page. Needs no content fetch.
pub fn home(ctx: &ViewContext) -> View {
    let mut seo = ctx.seo(ctx.t.t(ctx.lang, "common", "home.title"));
    seo.description = Some(ctx.t.t(ctx.lang, "common", "home.description").to_owned());

    let example = href(ctx.lang, &RouteIntent::GenericPage { slug: "about".into() });
    let blog = href(ctx.lang, &RouteIntent::BlogIndex);

    let main = format!(
        r#"<section class="home">
<p class="muted">{tagline}</p>
<h1>{heading}</h1>
<p>{intro}</p>
<div class="actions">
<a class="button primary" href="{example}">{example_label}</a>
<a class="button" href="{blog}">{blog_label}</a>
</div>
</section>"#,
        tagline = ctx.text("common", "brandTagline"),
        heading = ctx.text("common", "home.heading"),
        intro = ctx.text("common", "home.intro"),
        example_label = ctx.text("common", "home.examplePage"),
        blog_label = ctx.text("common", "home.toBlog"),
    );

    View { seo, main }
}

/// Post listing, newest first.
pub fn blog_index(ctx: &ViewContext, posts: &[BlogPostSummary]) -> View {
    let mut seo = ctx.seo(ctx.t.t(ctx.lang, "common", "blog.title"));
    seo.description = Some(ctx.t.t(ctx.lang, "common", "blog.description").to_owned());

    let list = if posts.is_empty() {
        format!(r#"<p class="muted">{}</p>"#, ctx.text("common", "blog.empty"))
    } else {
        let items: Vec<String> = posts
            .iter()
            .map(|post| {
                let url = href(ctx.lang, &RouteIntent::BlogPost { slug: post.slug.clone() });
                let date = post
                    .date
                    .as_deref()
                    .map(|d| format!(r#"<p class="muted"><time datetime="{0}">{0}</time></p>"#, escape_html(d)))
                    .unwrap_or_default();
                let excerpt = post
                    .excerpt
                    .as_deref()
                    .map(|e| format!("<p>{}</p>", escape_html(e)))
                    .unwrap_or_default();
                format!(
                    r#"<li><h2><a href="{}">{}</a></h2>{date}{excerpt}</li>"#,
                    escape_html(&url),
                    escape_html(&post.title)
                )
            })
            .collect();
        format!("<ul class=\"posts\">\n{}\n</ul>", items.join("\n"))
    };

    let main = format!("<h1>{}</h1>\n{list}", ctx.text("common", "blog.title"));
    View { seo, main }
}

pub fn post(ctx: &ViewContext, post: &BlogPost) -> View {
    let mut seo = ctx.seo(post.meta.title.clone());
    seo.description = post.meta.excerpt.clone().or_else(|| post.meta.description.clone());
    seo.og_type = OgType::Article;
    seo.published_time = post.meta.date.clone();

    let date = post
        .meta
        .date
        .as_deref()
        .map(|d| format!("<p class=\"muted\"><time datetime=\"{0}\">{0}</time></p>\n", escape_html(d)))
        .unwrap_or_default();

    let main = format!(
        "<article>\n<h1>{}</h1>\n{date}{}</article>",
        escape_html(&post.meta.title),
        render_markdown(&post.body)
    );
    View { seo, main }
}

pub fn page(ctx: &ViewContext, page: &ContentPage) -> View {
    let mut seo = ctx.seo(page.meta.title.clone());
    seo.description = page.meta.description.clone();

    let main = format!(
        "<article>\n<h1>{}</h1>\n{}</article>",
        escape_html(&page.meta.title),
        render_markdown(&page.body)
    );
    View { seo, main }
}

/// Unknown route in a supported language.
pub fn not_found(ctx: &ViewContext) -> View {
    let mut seo = ctx.seo(ctx.t.t(ctx.lang, "errors", "notFound.title"));
    seo.noindex = true;

    let main = format!(
        r#"<section class="not-found">
<h1>{heading}</h1>
<p class="muted">{body}</p>
<div class="actions"><a class="button primary" href="{home}">{back}</a></div>
</section>"#,
        heading = ctx.text("errors", "notFound.heading"),
        body = ctx.text("errors", "notFound.body"),
        home = lang_root(ctx.lang),
        back = ctx.text("errors", "notFound.backHome"),
    );
    View { seo, main }
}

pub fn loading(ctx: &ViewContext) -> View {
    let text = ctx.text("common", "loading");
    View {
        seo: ctx.seo(ctx.t.t(ctx.lang, "common", "loading")),
        main: format!(r#"<p class="muted" aria-busy="true">{text}</p>"#),
    }
}

/// A content fetch that failed: localized heading and message.
///
/// `err.message` is internal (it names store paths) and never reaches the page.
pub fn load_error(ctx: &ViewContext, err: &ViewError) -> View {
    let mut seo = ctx.seo(ctx.t.t(ctx.lang, "errors", "notFound.title"));
    seo.noindex = true;

    let message = if err.not_found {
        ctx.text("errors", "notFound.body")
    } else {
        ctx.text("errors", "loadFailed")
    };

    let main = format!(
        "<section class=\"load-error\">\n<h1>{}</h1>\n<p class=\"muted\">{message}</p>\n</section>",
        ctx.text("errors", "notFound.title"),
    );
    View { seo, main }
}

// ============================================================================
// Layout
// ============================================================================

/// Wrap a view in the full page layout.
pub fn document(ctx: &ViewContext, view: &View) -> String {
    let header = header(ctx);
    let footer = footer(ctx);
    fill_layout(ctx.lang, ctx.t, &view.seo, &header, &view.main, &footer)
}

/// Layout without header or footer, for pages rendered when the chrome itself
/// may be what failed.
pub fn bare_document(lang: Lang, t: &Translator, seo: &SeoMeta, main: &str) -> String {
    fill_layout(lang, t, seo, "", main, "")
}

fn fill_layout(lang: Lang, t: &Translator, seo: &SeoMeta, header: &str, main: &str, footer: &str) -> String {
    let skip = format!(
        r##"<a class="skip-link" href="#main-content">{}</a>"##,
        escape_html(t.t(lang, "navigation", "skipToContent"))
    );
    let header = format!("{skip}\n{header}");
    let head = seo.to_head();
    let body_attrs = ScrollPlan::body_attributes();

    fill(
        LAYOUT_TEMPLATE,
        &[
            ("lang", lang.code()),
            ("head", head.trim_end()),
            ("body_attrs", body_attrs.as_str()),
            ("header", header.as_str()),
            ("main", main),
            ("footer", footer),
            ("scroll_script", SCROLL_SCRIPT.trim_end()),
        ],
    )
}

fn header(ctx: &ViewContext) -> String {
    let nav = &ctx.chrome.navigation;
    let root = lang_root(ctx.lang);

    let brand = match &nav.logo {
        Some(logo) => format!(r#"<img src="{}" alt="Logo">"#, escape_html(logo)),
        None => String::new(),
    };
    let items: String = nav
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<a href="{}{}">{}</a>"#,
                root,
                escape_html(&item.href),
                escape_html(&item.label)
            )
        })
        .collect();

    format!(
        r#"<header class="site-header"><div class="container">
<a class="brand" href="{root}">{brand}<span>{name}</span></a>
<nav aria-label="{label}">{items}</nav>
</div></header>"#,
        name = escape_html(&ctx.chrome.settings.site_name),
        label = ctx.text("navigation", "mainNavigation"),
    )
}

fn footer(ctx: &ViewContext) -> String {
    let data = &ctx.chrome.footer;
    let root = lang_root(ctx.lang);

    let copyright = match &data.copyright {
        Some(text) if !text.trim().is_empty() => escape_html(text),
        _ => format!(
            "© {} {}",
            chrono::Local::now().year(),
            escape_html(&ctx.chrome.settings.site_name)
        ),
    };
    let links: String = data
        .links
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{root}{}">{}</a>"#,
                escape_html(&link.href),
                escape_html(&link.label)
            )
        })
        .collect();
    let social: String = data
        .social
        .iter()
        .map(|s| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer" aria-label="{1}">{1}</a>"#,
                escape_html(&s.url),
                escape_html(&s.platform)
            )
        })
        .collect();

    format!(
        r#"<footer class="site-footer"><div class="container">
<p>{copyright}</p>
<div>{links}</div>
<div>{social}</div>
</div></footer>"#
    )
}

/// Substitute `{key}` placeholders in a single pass.
///
/// Inserted values are never rescanned, so user text containing `{main}` stays literal.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find(|(key, _)| {
            tail.strip_prefix(key).is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
