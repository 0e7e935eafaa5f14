//! Site-wide data per language: navigation, footer and settings.
//!
//! These only feed page chrome, so every getter fails soft: any read or parse
//! failure is logged and the default structure is returned.

use super::{ContentResolver, index::global_path, store::AssetStore};
use crate::{i18n::Lang, log};
use educe::Educe;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

/// `globals/{lang}/navigation.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationData {
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// `globals/{lang}/footer.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterData {
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub links: Vec<FooterLink>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

/// `globals/{lang}/settings.json`
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsData {
    #[educe(Default = default_site_name())]
    pub site_name: String,
    #[serde(default)]
    pub site_description: Option<String>,
    #[serde(default)]
    pub default_og_image: Option<String>,
}

fn default_site_name() -> String {
    "Marketing Site Starter".into()
}

impl<S: AssetStore> ContentResolver<S> {
    pub async fn navigation(&self, lang: Lang) -> NavigationData {
        self.global(lang, "navigation").await
    }

    pub async fn footer(&self, lang: Lang) -> FooterData {
        self.global(lang, "footer").await
    }

    pub async fn settings(&self, lang: Lang) -> SettingsData {
        self.global(lang, "settings").await
    }

    async fn global<T: DeserializeOwned + Default + Send>(&self, lang: Lang, name: &str) -> T {
        let path = global_path(lang, name);

        let raw = match self.store.read(&path).await {
            Ok(raw) => raw,
            Err(err) => {
                log!("content"; "failed to load {name} (`{path}`): {err}");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log!("content"; "failed to parse {name} (`{path}`): {err}");
            T::default()
        })
    }
}
