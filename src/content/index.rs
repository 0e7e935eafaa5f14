//! Content index, built once from a store listing.
//!
//! Maps (language, slug) pairs to asset paths:
//!
//! | Asset                          | Path                              |
//! |--------------------------------|-----------------------------------|
//! | page                           | `pages/{lang}/{slug}.md`          |
//! | page (nested)                  | `pages/{lang}/{slug}/index.md`    |
//! | post                           | `blog/{lang}/{slug}.md`           |
//! | navigation / footer / settings | `globals/{lang}/{name}.json`      |

use crate::i18n::Lang;
use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

static POST_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^blog/([^/]+)/([^/]+)\.md$").expect("valid post path regex"));

static PAGE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^pages/([^/]+)/([^/]+?)(?:/index)?\.md$").expect("valid page path regex")
});

/// A routable asset discovered in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub lang: Lang,
    pub slug: String,
    pub path: String,
}

/// Known asset paths plus per-collection entries in enumeration order.
#[derive(Debug, Default)]
pub struct ContentIndex {
    assets: FxHashSet<String>,
    pages: Vec<IndexEntry>,
    posts: Vec<IndexEntry>,
}

impl ContentIndex {
    pub fn build(paths: Vec<String>) -> Self {
        let mut index = Self::default();

        for path in paths {
            if let Some(entry) = classify(&POST_PATH, &path) {
                index.posts.push(entry);
            } else if let Some(entry) = classify(&PAGE_PATH, &path) {
                index.pages.push(entry);
            }
            index.assets.insert(path);
        }

        index
    }

    pub fn contains(&self, path: &str) -> bool {
        self.assets.contains(path)
    }

    /// Posts of `lang`, in enumeration order.
    pub fn posts(&self, lang: Lang) -> impl Iterator<Item = &IndexEntry> {
        self.posts.iter().filter(move |e| e.lang == lang)
    }

    /// Routable pages of `lang`, in enumeration order.
    pub fn pages(&self, lang: Lang) -> impl Iterator<Item = &IndexEntry> {
        self.pages.iter().filter(move |e| e.lang == lang)
    }

    /// Total number of indexed assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }
}

fn classify(pattern: &Regex, path: &str) -> Option<IndexEntry> {
    let caps = pattern.captures(path)?;
    let lang = Lang::parse(caps.get(1)?.as_str())?;
    Some(IndexEntry {
        lang,
        slug: caps.get(2)?.as_str().to_owned(),
        path: path.to_owned(),
    })
}

/// Normalize a requested slug for lookup.
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

/// Page lookup candidates, in priority order.
pub fn page_candidates(lang: Lang, slug: &str) -> [String; 2] {
    [
        format!("pages/{lang}/{slug}.md"),
        format!("pages/{lang}/{slug}/index.md"),
    ]
}

pub fn post_path(lang: Lang, slug: &str) -> String {
    format!("blog/{lang}/{slug}.md")
}

pub fn global_path(lang: Lang, name: &str) -> String {
    format!("globals/{lang}/{name}.json")
}
