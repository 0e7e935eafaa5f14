//! Render-time error boundary.
//!
//! ```text
//! guard(context, reporter, render)
//!   ├── Ok(html)              ──► html
//!   ├── Err(error)            ──┐
//!   └── panic                 ──┴─► reporter.report(..) ──► Err(RenderFailure)
//! ```
//!
//! A [`RenderFailure`] is turned into a localized recovery page with
//! [`recovery_page`]. The raw error text only appears there in debug mode.

use super::{
    html::bare_document,
    seo::{SeoMeta, escape_html},
};
use crate::{
    i18n::{Lang, Translator},
    log,
    router::lang_root,
};
use serde::Serialize;
use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};

/// Where a render failure happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorContext {
    /// Request path.
    pub location: String,
    pub language: Lang,
    /// Route being rendered, e.g. `blog_post`.
    pub page: String,
    /// Full request URL including query and hash.
    pub url: String,
}

/// Sink for render failures.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &str, context: &ErrorContext);
}

/// Reports through the `error` log channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, error: &str, context: &ErrorContext) {
        log!(
            "error";
            "render failed at {} (lang: {}, page: {}, url: {}): {error}",
            context.location, context.language, context.page, context.url
        );
    }
}

/// A render that returned an error or panicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub message: String,
}

/// Run `render`, reporting and converting any error or panic.
pub fn guard<F>(context: &ErrorContext, reporter: &dyn ErrorReporter, render: F) -> Result<String, RenderFailure>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    let message = match catch_unwind(AssertUnwindSafe(render)) {
        Ok(Ok(html)) => return Ok(html),
        Ok(Err(err)) => format!("{err:#}"),
        Err(payload) => panic_message(payload.as_ref()),
    };

    reporter.report(&message, context);
    Err(RenderFailure { message })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "render panicked".to_owned()
    }
}

/// Localized recovery page with retry, home and reload actions.
pub fn recovery_page(context: &ErrorContext, t: &Translator, failure: &RenderFailure, debug: bool) -> String {
    let lang = context.language;
    let text = |key: &'static str| escape_html(t.t(lang, "errors", key));

    let mut seo = SeoMeta::new(t.t(lang, "errors", "boundary.title"), lang.og_locale());
    seo.noindex = true;

    let detail = if debug {
        format!("<p class=\"error-detail\">{}</p>\n", escape_html(&failure.message))
    } else {
        String::new()
    };

    let main = format!(
        r#"<section class="boundary" role="alert">
<h1>{title}</h1>
<p class="muted">{body}</p>
{detail}<div class="actions">
<a class="button primary" href="{retry_href}">{retry}</a>
<a class="button" href="{home_href}">{home}</a>
<button class="button" type="button" onclick="window.location.reload()">{reload}</button>
</div>
</section>"#,
        title = text("boundary.title"),
        body = text("boundary.body"),
        retry_href = escape_html(&context.location),
        retry = text("boundary.retry"),
        home_href = lang_root(lang),
        home = text("boundary.home"),
        reload = text("boundary.reload"),
    );

    bare_document(lang, t, &seo, &main)
}
