//! `[base]` section configuration.
//!
//! Contains site metadata used in page heads.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in herald.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Acme"
/// description = "Tools for teams"
/// url = "https://acme.example"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used when `globals/{lang}/settings.json` has none.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Site description for SEO meta tags.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,

    /// Absolute site URL. Enables canonical links and JSON-LD.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,
}

impl BaseConfig {
    /// `url` without a trailing slash, ready to prefix request paths.
    pub fn url_prefix(&self) -> Option<&str> {
        self.url.as_deref().map(|url| url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Acme"
            description = "Tools for teams"
            url = "https://acme.example/"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Acme");
        assert_eq!(config.base.description, "Tools for teams");
        assert_eq!(config.base.url.as_deref(), Some("https://acme.example/"));
        assert_eq!(config.base.url_prefix(), Some("https://acme.example"));
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.base.title, "Marketing Site Starter");
        assert!(config.base.url.is_none());
        assert_eq!(config.base.url_prefix(), None);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Acme"
            author = "someone"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
