//! `[content]` section configuration.
//!
//! Directories the site reads from. Relative paths are resolved against the
//! project root when the config is loaded.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in herald.toml - content, locale and static directories.
///
/// # Example
/// ```toml
/// [content]
/// root = "content"    # pages/, blog/, globals/
/// locales = "locales" # {lang}/{namespace}.json
/// public = "public"   # served as-is before routing
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Markdown and JSON content assets.
    #[serde(default = "defaults::content::root")]
    #[educe(Default = defaults::content::root())]
    pub root: PathBuf,

    /// UI string catalogs.
    #[serde(default = "defaults::content::locales")]
    #[educe(Default = defaults::content::locales())]
    pub locales: PathBuf,

    /// Static files.
    #[serde(default = "defaults::content::public")]
    #[educe(Default = defaults::content::public())]
    pub public: PathBuf,
}
