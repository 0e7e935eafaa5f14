//! Resolved content records.

use crate::i18n::Lang;
use serde::Serialize;

/// Metadata of a generic page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A Markdown page from `pages/{lang}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPage {
    pub slug: String,
    pub lang: Lang,
    pub meta: PageMeta,
    /// Markup after the front matter, verbatim.
    pub body: String,
}

/// Metadata of a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPostMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// ISO 8601 date string, compared lexicographically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A Markdown post from `blog/{lang}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub slug: String,
    pub lang: Lang,
    pub meta: BlogPostMeta,
    pub body: String,
}

/// Listing projection of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPostSummary {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
