//! Language-prefixed routing.
//!
//! Every public URL starts with a language segment. The router validates it and
//! classifies the rest of the path:
//!
//! ```text
//! /                      ──► redirect /{detected}
//! /{unsupported}/...     ──► redirect /en
//! /{lang}                ──► Home
//! /{lang}/blog           ──► BlogIndex
//! /{lang}/blog/{slug}    ──► BlogPost
//! /{lang}/{slug}         ──► GenericPage
//! /{lang}/...            ──► NotFound
//! ```
//!
//! Redirect targets are always `/{supported}`, which route to `Home` without
//! another redirect.

mod intent;
mod location;
mod scroll;

pub use intent::RouteIntent;
pub use location::Location;
pub use scroll::ScrollPlan;

use crate::i18n::Lang;
use serde::Serialize;

/// Outcome of routing a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Navigation {
    /// Replace the current location with `to`.
    Redirect { to: String },
    /// Render `intent` in `lang`.
    Render { lang: Lang, intent: RouteIntent },
}

/// Route `location`.
///
/// `locale` is the client's preferred locale (e.g. `de-DE`); it only matters for
/// the bare root path.
pub fn resolve(location: &Location, locale: Option<&str>) -> Navigation {
    let segments = location.segments();

    let Some((first, rest)) = segments.split_first() else {
        return Navigation::Redirect {
            to: lang_root(Lang::detect(locale)),
        };
    };

    match Lang::parse(first) {
        Some(lang) => Navigation::Render {
            lang,
            intent: RouteIntent::from_segments(rest),
        },
        None => Navigation::Redirect {
            to: lang_root(Lang::FALLBACK),
        },
    }
}

/// Root path of a language, e.g. `/de`.
pub fn lang_root(lang: Lang) -> String {
    format!("/{}", lang.code())
}

/// Full path of `intent` in `lang`.
pub fn href(lang: Lang, intent: &RouteIntent) -> String {
    format!("{}{}", lang_root(lang), intent.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str) -> Navigation {
        resolve(&Location::parse(path), None)
    }

    fn render(lang: Lang, intent: RouteIntent) -> Navigation {
        Navigation::Render { lang, intent }
    }

    #[test]
    fn test_root_redirects_by_locale() {
        let de = resolve(&Location::parse("/"), Some("de-DE"));
        assert_eq!(de, Navigation::Redirect { to: "/de".into() });

        let fr = resolve(&Location::parse("/"), Some("fr-FR"));
        assert_eq!(fr, Navigation::Redirect { to: "/en".into() });

        let none = resolve(&Location::parse("/"), None);
        assert_eq!(none, Navigation::Redirect { to: "/en".into() });
    }

    #[test]
    fn test_unsupported_language_redirects_to_fallback() {
        assert_eq!(route("/xx/about"), Navigation::Redirect { to: "/en".into() });
        assert_eq!(route("/fr"), Navigation::Redirect { to: "/en".into() });
        assert_eq!(route("/EN/blog"), Navigation::Redirect { to: "/en".into() });
    }

    #[test]
    fn test_redirect_target_does_not_redirect_again() {
        for start in ["/", "/xx", "/xx/blog/post", "/favicon"] {
            for locale in [None, Some("de"), Some("en-US"), Some("ja")] {
                let Navigation::Redirect { to } = resolve(&Location::parse(start), locale) else {
                    panic!("{start} should redirect");
                };
                let next = resolve(&Location::parse(&to), locale);
                assert!(
                    matches!(next, Navigation::Render { intent: RouteIntent::Home, .. }),
                    "{start} → {to} → {next:?}"
                );
            }
        }
    }

    #[test]
    fn test_supported_language_routes() {
        assert_eq!(route("/en"), render(Lang::En, RouteIntent::Home));
        assert_eq!(route("/de/"), render(Lang::De, RouteIntent::Home));
        assert_eq!(route("/de/blog"), render(Lang::De, RouteIntent::BlogIndex));
        assert_eq!(
            route("/en/blog/launch"),
            render(Lang::En, RouteIntent::BlogPost { slug: "launch".into() })
        );
        assert_eq!(
            route("/en/about"),
            render(Lang::En, RouteIntent::GenericPage { slug: "about".into() })
        );
        assert_eq!(route("/en/a/b/c"), render(Lang::En, RouteIntent::NotFound));
    }

    #[test]
    fn test_query_and_hash_do_not_affect_routing() {
        assert_eq!(
            route("/en/about?ref=nav#team"),
            render(Lang::En, RouteIntent::GenericPage { slug: "about".into() })
        );
    }

    #[test]
    fn test_href() {
        assert_eq!(href(Lang::De, &RouteIntent::Home), "/de");
        assert_eq!(href(Lang::En, &RouteIntent::BlogPost { slug: "x".into() }), "/en/blog/x");
    }
}
