//! Content resolution: (language, slug) → parsed asset.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   list()    ┌──────────────────┐
//! │  AssetStore  │ ──────────► │   ContentIndex   │  (ArcSwap, rebuilt by reindex)
//! └──────┬───────┘             └────────┬─────────┘
//!        │ read(path)                   │ contains / posts(lang)
//!        ▼                              ▼
//! ┌──────────────────────────────────────────────┐
//! │               ContentResolver                │
//! │  resolve_page · resolve_post · list_posts    │
//! │  navigation · footer · settings              │
//! └──────────────────────────────────────────────┘
//! ```

use super::{
    ContentError,
    error::AssetKind,
    frontmatter::FrontMatter,
    index::{ContentIndex, normalize_slug, page_candidates, post_path},
    store::AssetStore,
    types::{BlogPost, BlogPostMeta, BlogPostSummary, ContentPage, PageMeta},
};
use crate::{i18n::Lang, log};
use arc_swap::ArcSwap;
use std::{cmp::Ordering, sync::Arc};

/// Slug used when a page route carries none.
pub const HOME_SLUG: &str = "home";

/// Resolves content assets from a store through an index.
pub struct ContentResolver<S> {
    pub(super) store: S,
    index: ArcSwap<ContentIndex>,
}

impl<S: AssetStore> ContentResolver<S> {
    /// Build the index from `store` and wrap both.
    pub fn new(store: S) -> Result<Self, ContentError> {
        let index = ContentIndex::build(store.list().map_err(ContentError::Index)?);
        Ok(Self {
            store,
            index: ArcSwap::from_pointee(index),
        })
    }

    /// Rebuild the index from the store, returning the number of assets.
    ///
    /// Readers holding the previous index keep using it until they finish.
    pub fn reindex(&self) -> Result<usize, ContentError> {
        let index = ContentIndex::build(self.store.list().map_err(ContentError::Index)?);
        let len = index.len();
        self.index.store(Arc::new(index));
        Ok(len)
    }

    /// Current index snapshot.
    pub fn index(&self) -> Arc<ContentIndex> {
        self.index.load_full()
    }

    /// Resolve a generic page, trying `{slug}.md` then `{slug}/index.md`.
    pub async fn resolve_page(&self, lang: Lang, slug: &str) -> Result<ContentPage, ContentError> {
        let slug = match slug.trim() {
            "" => HOME_SLUG,
            trimmed => trimmed,
        };
        let key = normalize_slug(slug);
        let index = self.index();

        let path = page_candidates(lang, &key)
            .into_iter()
            .find(|candidate| index.contains(candidate))
            .ok_or_else(|| ContentError::NotFound {
                kind: AssetKind::Page,
                lang,
                slug: slug.to_owned(),
            })?;

        let fm = self.load(&path).await?;
        Ok(ContentPage {
            slug: slug.to_owned(),
            lang,
            meta: PageMeta {
                title: fm.string("title").unwrap_or_else(|| slug.to_owned()),
                description: fm.string("description"),
            },
            body: fm.body,
        })
    }

    /// Resolve a blog post. Only `blog/{lang}/{slug}.md` is tried.
    pub async fn resolve_post(&self, lang: Lang, slug: &str) -> Result<BlogPost, ContentError> {
        let slug = slug.trim();
        let path = post_path(lang, &normalize_slug(slug));

        if slug.is_empty() || !self.index().contains(&path) {
            return Err(ContentError::NotFound {
                kind: AssetKind::Post,
                lang,
                slug: slug.to_owned(),
            });
        }

        let fm = self.load(&path).await?;
        Ok(BlogPost {
            slug: slug.to_owned(),
            lang,
            meta: BlogPostMeta {
                title: fm.string("title").unwrap_or_else(|| slug.to_owned()),
                description: fm.string("description"),
                excerpt: fm.string("excerpt"),
                date: fm.string("date"),
            },
            body: fm.body,
        })
    }

    /// Summaries of every post in `lang`, newest first, undated last.
    ///
    /// Equal dates (and undated posts) keep index enumeration order.
    pub async fn list_posts(&self, lang: Lang) -> Result<Vec<BlogPostSummary>, ContentError> {
        let index = self.index();
        let mut summaries = Vec::new();

        for entry in index.posts(lang) {
            let fm = self.load(&entry.path).await?;
            summaries.push(BlogPostSummary {
                slug: entry.slug.clone(),
                title: fm.string("title").unwrap_or_else(|| entry.slug.clone()),
                excerpt: fm.string("excerpt"),
                date: fm.string("date"),
            });
        }

        // stable sort keeps enumeration order for ties
        summaries.sort_by(|a, b| compare_dates_desc(a.date.as_deref(), b.date.as_deref()));
        Ok(summaries)
    }

    /// Read and split an asset, logging degraded front matter.
    async fn load(&self, path: &str) -> Result<FrontMatter, ContentError> {
        let raw = self
            .store
            .read(path)
            .await
            .map_err(|source| ContentError::Fetch {
                path: path.to_owned(),
                source,
            })?;

        let fm = FrontMatter::parse(&raw);
        if fm.malformed {
            log!("content"; "`{path}` has malformed front matter, using defaults");
        }
        Ok(fm)
    }
}

/// Newest first by string comparison; undated after dated.
fn compare_dates_desc(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::store::MemoryStore;

    fn resolver(store: MemoryStore) -> ContentResolver<MemoryStore> {
        ContentResolver::new(store).unwrap()
    }

    fn post(title: &str, date: Option<&str>) -> String {
        match date {
            Some(date) => format!("---\ntitle: {title}\ndate: \"{date}\"\n---\nbody"),
            None => format!("---\ntitle: {title}\n---\nbody"),
        }
    }

    #[tokio::test]
    async fn test_resolve_page_about() {
        let r = resolver(MemoryStore::new().with("pages/en/about.md", "---\ntitle: \"About\"\n---\nHello"));
        let page = r.resolve_page(Lang::En, "about").await.unwrap();
        assert_eq!(page.meta.title, "About");
        assert_eq!(page.meta.description, None);
        assert_eq!(page.body, "Hello");
        assert_eq!(page.slug, "about");
        assert_eq!(page.lang, Lang::En);
    }

    #[tokio::test]
    async fn test_resolve_page_nested_index() {
        let r = resolver(MemoryStore::new().with("pages/de/team/index.md", "---\ntitle: Team\ndescription: Wir\n---\nx"));
        let page = r.resolve_page(Lang::De, "team").await.unwrap();
        assert_eq!(page.meta.title, "Team");
        assert_eq!(page.meta.description.as_deref(), Some("Wir"));
    }

    #[tokio::test]
    async fn test_direct_match_wins_over_nested() {
        let r = resolver(
            MemoryStore::new()
                .with("pages/en/team/index.md", "---\ntitle: Nested\n---\n")
                .with("pages/en/team.md", "---\ntitle: Direct\n---\n"),
        );
        let page = r.resolve_page(Lang::En, "team").await.unwrap();
        assert_eq!(page.meta.title, "Direct");
    }

    #[tokio::test]
    async fn test_page_slug_is_normalized_for_lookup() {
        let r = resolver(MemoryStore::new().with("pages/en/about.md", "---\ntitle: About\n---\n"));
        let page = r.resolve_page(Lang::En, "  About ").await.unwrap();
        assert_eq!(page.slug, "About");
        assert_eq!(page.meta.title, "About");
    }

    #[tokio::test]
    async fn test_empty_page_slug_defaults_to_home() {
        let r = resolver(MemoryStore::new().with("pages/en/home.md", "---\ntitle: Welcome\n---\n"));
        let page = r.resolve_page(Lang::En, "  ").await.unwrap();
        assert_eq!(page.slug, "home");
        assert_eq!(page.meta.title, "Welcome");
    }

    #[tokio::test]
    async fn test_title_falls_back_to_slug() {
        let r = resolver(
            MemoryStore::new()
                .with("pages/en/plain.md", "no front matter")
                .with("pages/en/numeric.md", "---\ntitle: 7\n---\nbody")
                .with("pages/en/broken.md", "---\ntitle: [x\n---\nbody"),
        );
        for slug in ["plain", "numeric", "broken"] {
            let page = r.resolve_page(Lang::En, slug).await.unwrap();
            assert_eq!(page.meta.title, slug);
            assert!(!page.meta.title.is_empty());
        }
        let plain = r.resolve_page(Lang::En, "plain").await.unwrap();
        assert_eq!(plain.body, "no front matter");
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let r = resolver(MemoryStore::new().with("pages/de/about.md", "x"));
        let err = r.resolve_page(Lang::En, "about").await.unwrap_err();
        assert!(matches!(
            err,
            ContentError::NotFound { kind: AssetKind::Page, lang: Lang::En, ref slug } if slug == "about"
        ));
    }

    #[tokio::test]
    async fn test_traversal_slug_is_not_found() {
        let r = resolver(MemoryStore::new().with("pages/en/about.md", "x"));
        assert!(r.resolve_page(Lang::En, "../en/about").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_resolve_post_meta() {
        let r = resolver(MemoryStore::new().with(
            "blog/en/launch.md",
            "---\ntitle: Launch\nexcerpt: We shipped\ndate: 2024-03-01\ndescription: d\n---\nBody",
        ));
        let post = r.resolve_post(Lang::En, "launch").await.unwrap();
        assert_eq!(post.meta.title, "Launch");
        assert_eq!(post.meta.excerpt.as_deref(), Some("We shipped"));
        assert_eq!(post.meta.date.as_deref(), Some("2024-03-01"));
        assert_eq!(post.meta.description.as_deref(), Some("d"));
        assert_eq!(post.body, "Body");
    }

    #[tokio::test]
    async fn test_post_has_no_nested_fallback() {
        let r = resolver(MemoryStore::new().with("blog/en/launch/index.md", "x"));
        let err = r.resolve_post(Lang::En, "launch").await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound { kind: AssetKind::Post, .. }));
    }

    #[tokio::test]
    async fn test_missing_post_and_empty_slug() {
        let r = resolver(MemoryStore::new());
        assert!(r.resolve_post(Lang::En, "missing-slug").await.unwrap_err().is_not_found());
        assert!(r.resolve_post(Lang::En, " ").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_posts_sorted_desc_undated_last() {
        let r = resolver(
            MemoryStore::new()
                .with("blog/en/undated-a.md", &post("Undated A", None))
                .with("blog/en/old.md", &post("Old", Some("2023-01-01")))
                .with("blog/de/other.md", &post("Andere", Some("2030-01-01")))
                .with("blog/en/new.md", &post("New", Some("2024-06-01")))
                .with("blog/en/undated-b.md", &post("Undated B", None))
                .with("blog/en/mid.md", &post("Mid", Some("2024-01-15"))),
        );

        let posts = r.list_posts(Lang::En).await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old", "undated-a", "undated-b"]);

        let dated: Vec<_> = posts.iter().filter_map(|p| p.date.as_deref()).collect();
        assert!(dated.windows(2).all(|w| w[0] >= w[1]));
        let first_undated = posts.iter().position(|p| p.date.is_none()).unwrap();
        assert!(posts[first_undated..].iter().all(|p| p.date.is_none()));
    }

    #[tokio::test]
    async fn test_list_posts_ties_keep_enumeration_order() {
        let r = resolver(
            MemoryStore::new()
                .with("blog/en/second.md", &post("Second", Some("2024-01-01")))
                .with("blog/en/first.md", &post("First", Some("2024-01-01"))),
        );
        let posts = r.list_posts(Lang::En).await.unwrap();
        assert_eq!(posts[0].slug, "second");
        assert_eq!(posts[1].slug, "first");
    }

    #[tokio::test]
    async fn test_list_posts_degrades_per_asset() {
        let r = resolver(
            MemoryStore::new()
                .with("blog/en/broken.md", "---\ntitle: [x\n---\n")
                .with("blog/en/plain.md", "no front matter"),
        );
        let posts = r.list_posts(Lang::En).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "broken");
        assert_eq!(posts[1].title, "plain");
        assert!(posts.iter().all(|p| p.date.is_none() && p.excerpt.is_none()));
    }

    #[tokio::test]
    async fn test_list_posts_empty_language() {
        let r = resolver(MemoryStore::new().with("blog/de/x.md", "x"));
        assert!(r.list_posts(Lang::En).await.unwrap().is_empty());
    }

    #[test]
    fn test_broken_store_fails_indexing() {
        let err = ContentResolver::new(MemoryStore::broken()).err().unwrap();
        assert!(matches!(err, ContentError::Index(_)));
    }

    #[test]
    fn test_compare_dates_desc() {
        assert_eq!(compare_dates_desc(Some("2024"), Some("2023")), Ordering::Less);
        assert_eq!(compare_dates_desc(Some("2023"), Some("2024")), Ordering::Greater);
        assert_eq!(compare_dates_desc(Some("2023"), None), Ordering::Less);
        assert_eq!(compare_dates_desc(None, Some("2023")), Ordering::Greater);
        assert_eq!(compare_dates_desc(None, None), Ordering::Equal);
    }
}
