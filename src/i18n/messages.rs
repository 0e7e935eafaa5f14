//! Namespaced UI strings.
//!
//! Strings live in `locales/{lang}/{namespace}.json`. Nested objects are
//! flattened with `.` so `{"home": {"title": "Home"}}` in `common.json` is looked
//! up as `t(lang, "common", "home.title")`.
//!
//! Lookup order:
//!
//! ```text
//! locales/{lang}  ──►  locales/{fallback}  ──►  built-in {lang}  ──►  built-in {fallback}  ──►  key
//! ```

use super::Lang;
use crate::log;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::{fs, path::Path};

/// Namespaces loaded from each language directory.
pub const NAMESPACES: [&str; 3] = ["common", "errors", "navigation"];

/// Built-in strings: (`namespace.key`, en, de).
const BUILTIN: &[(&str, &str, &str)] = &[
    ("common.brandTagline", "Marketing websites, done right.", "Marketing-Websites, richtig gemacht."),
    ("common.loading", "Loading…", "Laden…"),
    ("common.home.title", "Home", "Startseite"),
    (
        "common.home.description",
        "A production-ready starter for marketing websites.",
        "Ein Starter für Marketing-Websites.",
    ),
    ("common.home.heading", "Marketing Site Starter", "Marketing Site Starter"),
    (
        "common.home.intro",
        "This page is intentionally minimal: content comes from Markdown files and can be extended as needed.",
        "Diese Seite ist absichtlich minimal: Inhalte kommen aus Markdown-Dateien und werden bei Bedarf erweitert.",
    ),
    ("common.home.examplePage", "View example page", "Beispielseite ansehen"),
    ("common.home.toBlog", "Go to blog", "Zum Blog"),
    ("common.blog.title", "Blog", "Blog"),
    ("common.blog.description", "Articles and updates.", "Artikel und Updates."),
    ("common.blog.empty", "No posts yet.", "Noch keine Beiträge."),
    ("errors.notFound.title", "Not found", "Nicht gefunden"),
    ("errors.notFound.heading", "Page not found", "Seite nicht gefunden"),
    (
        "errors.notFound.body",
        "The page you requested does not exist or has been moved.",
        "Die angeforderte Seite existiert nicht oder wurde verschoben.",
    ),
    ("errors.notFound.backHome", "Back home", "Zur Startseite"),
    (
        "errors.loadFailed",
        "The content could not be loaded.",
        "Der Inhalt konnte nicht geladen werden.",
    ),
    ("errors.boundary.title", "Something went wrong", "Etwas ist schiefgelaufen"),
    (
        "errors.boundary.body",
        "An unexpected error occurred. Please try again.",
        "Es ist ein unerwarteter Fehler aufgetreten. Bitte versuchen Sie es erneut.",
    ),
    ("errors.boundary.retry", "Try again", "Erneut versuchen"),
    ("errors.boundary.home", "Home", "Startseite"),
    ("errors.boundary.reload", "Reload", "Neu laden"),
    ("navigation.skipToContent", "Skip to content", "Zum Inhalt springen"),
    ("navigation.mainNavigation", "Main navigation", "Hauptnavigation"),
];

type Catalog = FxHashMap<String, String>;

/// String lookup service, constructed once per site and swapped on reload.
#[derive(Debug, Default)]
pub struct Translator {
    catalogs: FxHashMap<Lang, Catalog>,
}

impl Translator {
    /// Translator with built-in strings only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load every `{lang}/{namespace}.json` under `dir`.
    ///
    /// Missing files are skipped silently; unreadable or malformed files are
    /// logged and skipped. Never fails: the built-ins cover every key the
    /// renderer uses.
    pub fn load(dir: &Path) -> Self {
        let mut catalogs = FxHashMap::default();

        for lang in Lang::ALL {
            let mut catalog = Catalog::default();
            for ns in NAMESPACES {
                let path = dir.join(lang.code()).join(format!("{ns}.json"));
                if !path.is_file() {
                    continue;
                }
                match fs::read_to_string(&path)
                    .map_err(anyhow::Error::from)
                    .and_then(|raw| Ok(serde_json::from_str::<Value>(&raw)?))
                {
                    Ok(value) => flatten_into(&mut catalog, ns, &value),
                    Err(err) => log!("i18n"; "skipping `{}`: {err}", path.display()),
                }
            }
            if !catalog.is_empty() {
                catalogs.insert(lang, catalog);
            }
        }

        Self { catalogs }
    }

    /// Look up `key` in namespace `ns`.
    ///
    /// Order: loaded `lang` strings, built-in `lang` strings, then the same two
    /// for the fallback language, then the key itself.
    pub fn t<'a>(&'a self, lang: Lang, ns: &str, key: &'a str) -> &'a str {
        let full = format!("{ns}.{key}");

        [lang, Lang::FALLBACK]
            .into_iter()
            .find_map(|l| {
                self.catalogs
                    .get(&l)
                    .and_then(|c| c.get(&full))
                    .map(String::as_str)
                    .or_else(|| builtin(l, &full))
            })
            .unwrap_or(key)
    }
}

fn builtin(lang: Lang, full_key: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(key, ..)| *key == full_key)
        .map(|(_, en, de)| match lang {
            Lang::En => *en,
            Lang::De => *de,
        })
}

/// Flatten nested JSON objects into `prefix.a.b` keys. Non-string leaves are ignored.
fn flatten_into(catalog: &mut Catalog, prefix: &str, value: &Value) {
    match value {
        Value::String(text) => {
            catalog.insert(prefix.to_owned(), text.clone());
        }
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(catalog, &format!("{prefix}.{key}"), child);
            }
        }
        _ => {}
    }
}
