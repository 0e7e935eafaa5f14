//! Content resolution errors.

use crate::i18n::Lang;
use std::fmt;
use thiserror::Error;

/// Collections a slug can be resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Page,
    Post,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKind::Page => "Page",
            AssetKind::Post => "Blog post",
        })
    }
}

/// Errors surfaced by the content resolver.
///
/// Front matter problems are not errors: fields degrade to defaults.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{kind} not found: {lang}/{slug}")]
    NotFound {
        kind: AssetKind,
        lang: Lang,
        slug: String,
    },

    #[error("failed to read `{path}`")]
    Fetch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to index content store")]
    Index(#[source] std::io::Error),
}

impl ContentError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
