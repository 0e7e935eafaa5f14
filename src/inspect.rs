//! One-shot commands: `resolve` and `check`.
//!
//! Both open the site the same way `serve` does and drive it on a short-lived
//! tokio runtime.

use crate::{
    config::SiteConfig,
    content::{AssetStore, ContentResolver},
    i18n::Lang,
    log,
    site::Site,
};
use anyhow::{Context, Result};
use serde::Serialize;
use tokio::runtime::Runtime;

/// Print how `url` routes and what it resolves to, as JSON.
pub fn resolve_url(config: SiteConfig, url: &str, locale: Option<&str>) -> Result<()> {
    let site = Site::open(config)?;
    let runtime = Runtime::new().context("Failed to start async runtime")?;

    let resolution = runtime.block_on(site.resolve(url, locale));
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

/// One indexed asset and the title it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckEntry {
    pub slug: String,
    pub title: String,
    /// The asset has no usable `title` and shows its slug instead.
    pub title_fallback: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LangReport {
    pub pages: Vec<CheckEntry>,
    pub posts: Vec<CheckEntry>,
}

/// Index the content and print pages and posts per language.
pub fn check_site(config: SiteConfig) -> Result<()> {
    let site = Site::open(config)?;
    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let resolver = site.resolver();

    log!("check"; "{} assets indexed", resolver.index().len());

    let mut warnings = 0;
    for lang in Lang::ALL {
        let report = runtime.block_on(collect(resolver, lang))?;
        log!("check"; "{lang}: {} pages, {} posts", report.pages.len(), report.posts.len());

        for (kind, entries) in [("page", &report.pages), ("post", &report.posts)] {
            for entry in entries {
                println!("  {lang}/{kind} {:<24} {}", entry.slug, entry.title);
                if entry.title_fallback {
                    warnings += 1;
                    log!("content"; "{lang} {kind} `{}` has no title, showing its slug", entry.slug);
                }
            }
        }
    }

    if warnings > 0 {
        log!("check"; "{warnings} warning(s)");
    }
    Ok(())
}

/// Resolve every page and post of `lang`.
pub async fn collect<S: AssetStore>(resolver: &ContentResolver<S>, lang: Lang) -> Result<LangReport> {
    let index = resolver.index();
    let mut report = LangReport::default();

    for entry in index.pages(lang) {
        let page = resolver.resolve_page(lang, &entry.slug).await?;
        report.pages.push(CheckEntry {
            title_fallback: page.meta.title == entry.slug,
            slug: entry.slug.clone(),
            title: page.meta.title,
        });
    }

    for post in resolver.list_posts(lang).await? {
        report.posts.push(CheckEntry {
            title_fallback: post.title == post.slug,
            slug: post.slug,
            title: post.title,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryStore;

    #[tokio::test]
    async fn test_collect_flags_title_fallback() {
        let store = MemoryStore::new()
            .with("pages/en/about.md", "---\ntitle: About\n---\n")
            .with("pages/en/untitled.md", "just text")
            .with("pages/de/ueber.md", "---\ntitle: Über\n---\n")
            .with("blog/en/launch.md", "---\ntitle: Launch\ndate: \"2024-01-01\"\n---\n")
            .with("blog/en/draft.md", "---\ntitle: [broken\n---\n");
        let resolver = ContentResolver::new(store).unwrap();

        let en = collect(&resolver, Lang::En).await.unwrap();
        assert_eq!(en.pages.len(), 2);
        assert!(!en.pages[0].title_fallback);
        assert_eq!(en.pages[1].slug, "untitled");
        assert!(en.pages[1].title_fallback);

        assert_eq!(en.posts[0].title, "Launch");
        assert!(en.posts[1].title_fallback);

        let de = collect(&resolver, Lang::De).await.unwrap();
        assert_eq!(de.pages[0].title, "Über");
        assert!(de.posts.is_empty());
    }
}
