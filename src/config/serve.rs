//! `[serve]` section configuration.
//!
//! Contains server settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in herald.toml - server settings.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # Listen on all interfaces
/// port = 3000
/// watch = true           # Reload content on file changes
/// debug = false          # Show error details on recovery pages
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 5277).
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Enable file watcher for content and translation reloads.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,

    /// Show raw render errors on the recovery page.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub debug: bool,
}
