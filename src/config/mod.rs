//! Site configuration management for `herald.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site metadata (title, description, url)          |
//! | `[content]` | Content, locale and static file directories      |
//! | `[serve]`   | HTTP server (interface, port, watch, debug)      |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Acme"
//! description = "Tools for teams"
//! url = "https://acme.example"
//!
//! [content]
//! root = "content"
//!
//! [serve]
//! port = 5277
//! ```
//!
//! Every section is optional. A missing config file yields the defaults.

mod base;
mod content;
pub mod defaults;
mod error;
mod serve;

pub use base::BaseConfig;
pub use content::ContentConfig;
pub use error::ConfigError;
pub use serve::ServeConfig;

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing herald.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Content directories
    #[serde(default)]
    pub content: ContentConfig,

    /// Server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, apply CLI overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            log!("config"; "`{}` not found, using defaults", config_path.display());
            Self::default()
        };

        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        Self::update_option(&mut self.content.root, cli.content.as_ref());
        self.update_path_with_root(&root);

        if let Commands::Serve {
            interface,
            port,
            watch,
            debug,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
            Self::update_option(&mut self.serve.debug, debug.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.content.root = Self::normalize_path(&root.join(&self.content.root));
        self.content.locales = Self::normalize_path(&root.join(&self.content.locales));
        self.content.public = Self::normalize_path(&root.join(&self.content.public));
        self.root = root;
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if !self.content.root.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[content.root] `{}` not found",
                self.content.root.display()
            )));
        }

        if self.serve.interface.parse::<std::net::IpAddr>().is_err() {
            bail!(ConfigError::Validation(format!(
                "[serve.interface] `{}` is not an IP address",
                self.serve.interface
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
