//! Supported languages.
//!
//! The set is closed: every URL segment, locale tag or directory name is either
//! one of [`Lang::ALL`] or maps to [`Lang::FALLBACK`].

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A language the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    De,
    En,
}

impl Lang {
    /// All supported languages, in URL/listing order.
    pub const ALL: [Lang; 2] = [Lang::De, Lang::En];

    /// Language used whenever a request names none or an unsupported one.
    pub const FALLBACK: Lang = Lang::En;

    /// Two-letter code used in URLs and content directories.
    pub const fn code(self) -> &'static str {
        match self {
            Lang::De => "de",
            Lang::En => "en",
        }
    }

    /// Open Graph locale (`og:locale`).
    pub const fn og_locale(self) -> &'static str {
        match self {
            Lang::De => "de_DE",
            Lang::En => "en_US",
        }
    }

    /// Exact, case-sensitive match against the supported codes.
    pub fn parse(code: &str) -> Option<Lang> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Pick a language from a browser locale such as `de-AT` or `en-US`.
    ///
    /// Prefix match on the lower-cased locale; missing or unmatched locales
    /// get the fallback.
    pub fn detect(locale: Option<&str>) -> Lang {
        let locale = locale.unwrap_or(Self::FALLBACK.code()).trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| locale.starts_with(lang.code()))
            .unwrap_or(Self::FALLBACK)
    }

    /// Primary tag of an `Accept-Language` header value.
    ///
    /// `de-DE,de;q=0.9,en;q=0.8` → `de-DE`
    pub fn primary_tag(accept_language: &str) -> Option<&str> {
        accept_language
            .split(',')
            .next()
            .and_then(|tag| tag.split(';').next())
            .map(str::trim)
            .filter(|tag| !tag.is_empty() && *tag != "*")
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unsupported language `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Lang::parse("de"), Some(Lang::De));
        assert_eq!(Lang::parse("en"), Some(Lang::En));
        assert_eq!(Lang::parse("EN"), None);
        assert_eq!(Lang::parse("fr"), None);
        assert_eq!(Lang::parse(""), None);
    }

    #[test]
    fn test_fallback_is_supported() {
        assert!(Lang::ALL.contains(&Lang::FALLBACK));
    }

    #[test]
    fn test_detect_prefers_de_prefix() {
        assert_eq!(Lang::detect(Some("de")), Lang::De);
        assert_eq!(Lang::detect(Some("de-AT")), Lang::De);
        assert_eq!(Lang::detect(Some("DE-ch")), Lang::De);
    }

    #[test]
    fn test_detect_defaults_to_en() {
        assert_eq!(Lang::detect(Some("fr-FR")), Lang::En);
        assert_eq!(Lang::detect(Some("en-GB")), Lang::En);
        assert_eq!(Lang::detect(Some("")), Lang::En);
        assert_eq!(Lang::detect(None), Lang::En);
    }

    #[test]
    fn test_primary_tag() {
        assert_eq!(Lang::primary_tag("de-DE,de;q=0.9,en;q=0.8"), Some("de-DE"));
        assert_eq!(Lang::primary_tag("en;q=0.5"), Some("en"));
        assert_eq!(Lang::primary_tag("*"), None);
        assert_eq!(Lang::primary_tag(""), None);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Lang::De).unwrap(), "\"de\"");
        let lang: Lang = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Lang::En);
    }
}
