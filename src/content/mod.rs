//! Markdown and JSON content assets.
//!
//! # Layout
//!
//! ```text
//! content/
//! ├── pages/{lang}/{slug}.md          generic pages
//! ├── pages/{lang}/{slug}/index.md    generic pages (nested form)
//! ├── blog/{lang}/{slug}.md           blog posts
//! └── globals/{lang}/*.json           navigation, footer, settings
//! ```
//!
//! Markdown assets start with YAML front matter (`title`, `description`,
//! `excerpt`, `date`). Missing or malformed fields never fail resolution: the
//! title falls back to the slug and optional fields become absent.

mod error;
mod frontmatter;
mod globals;
mod index;
mod resolver;
mod store;
mod types;

pub use error::{AssetKind, ContentError};
pub use globals::{FooterData, NavigationData, SettingsData};
pub use resolver::ContentResolver;
pub use store::{AssetStore, FsStore};
pub use types::{BlogPost, BlogPostSummary, ContentPage, PageMeta};

#[cfg(test)]
pub use store::MemoryStore;
