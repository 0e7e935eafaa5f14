//! Route intents: what a language-relative path asks to show.

use serde::Serialize;

/// Classification of the path remaining after the language prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteIntent {
    Home,
    BlogIndex,
    BlogPost { slug: String },
    GenericPage { slug: String },
    NotFound,
}

/// Segment under which blog routes live.
pub const BLOG_SEGMENT: &str = "blog";

impl RouteIntent {
    /// Match the remaining segments, in priority order:
    ///
    /// | Segments          | Intent               |
    /// |-------------------|----------------------|
    /// | `[]`              | `Home`               |
    /// | `["blog"]`        | `BlogIndex`          |
    /// | `["blog", slug]`  | `BlogPost { slug }`  |
    /// | `[slug]`          | `GenericPage { slug }` |
    /// | anything else     | `NotFound`           |
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        match segments {
            [] => Self::Home,
            [blog] if blog.as_ref() == BLOG_SEGMENT => Self::BlogIndex,
            [blog, slug] if blog.as_ref() == BLOG_SEGMENT => Self::BlogPost {
                slug: slug.as_ref().to_owned(),
            },
            [slug] => Self::GenericPage {
                slug: slug.as_ref().to_owned(),
            },
            _ => Self::NotFound,
        }
    }

    /// Short name used in logs and error reports.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::BlogIndex => "blog_index",
            Self::BlogPost { .. } => "blog_post",
            Self::GenericPage { .. } => "generic_page",
            Self::NotFound => "not_found",
        }
    }

    /// Language-relative path this intent is served at.
    pub fn path(&self) -> String {
        match self {
            Self::Home | Self::NotFound => String::new(),
            Self::BlogIndex => format!("/{BLOG_SEGMENT}"),
            Self::BlogPost { slug } => format!("/{BLOG_SEGMENT}/{slug}"),
            Self::GenericPage { slug } => format!("/{slug}"),
        }
    }
}
