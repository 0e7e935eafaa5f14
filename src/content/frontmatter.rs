//! YAML front matter splitting.
//!
//! ```text
//! ---            ◄─ opening fence, first line of the file
//! title: About   ◄─ YAML attributes
//! ---            ◄─ closing fence (`---` or `...`)
//! Hello          ◄─ body, verbatim
//! ```
//!
//! A document without a complete fence pair has no attributes and its whole
//! text is the body.

use serde_yaml::{Mapping, Value};

/// A document split into attributes and body.
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    pub attributes: Mapping,
    pub body: String,
    /// The fence was present but its content was not a YAML mapping.
    pub malformed: bool,
}

impl FrontMatter {
    pub fn parse(raw: &str) -> Self {
        let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let Some((yaml, body)) = split(text) else {
            return Self {
                body: text.to_owned(),
                ..Self::default()
            };
        };

        let (attributes, malformed) = match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(mapping)) => (mapping, false),
            Ok(Value::Null) => (Mapping::new(), false),
            Ok(_) | Err(_) => (Mapping::new(), true),
        };

        Self {
            attributes,
            body: body.to_owned(),
            malformed,
        }
    }

    /// String attribute `key`.
    ///
    /// Non-string values and blank strings count as absent.
    pub fn string(&self, key: &str) -> Option<String> {
        match self.attributes.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// Split `text` into (yaml, body) at the fence lines.
fn split(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        let fence = line.trim_end();
        if fence == "---" || fence == "..." {
            return Some((&text[yaml_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_and_body() {
        let fm = FrontMatter::parse("---\ntitle: \"About\"\n---\nHello");
        assert_eq!(fm.string("title").as_deref(), Some("About"));
        assert_eq!(fm.body, "Hello");
        assert!(!fm.malformed);
    }

    #[test]
    fn test_body_is_verbatim() {
        let fm = FrontMatter::parse("---\ntitle: X\n---\n\n# Heading\n\ntext  \n");
        assert_eq!(fm.body, "\n# Heading\n\ntext  \n");
    }

    #[test]
    fn test_no_front_matter() {
        let fm = FrontMatter::parse("# Just markdown\n");
        assert!(fm.attributes.is_empty());
        assert_eq!(fm.body, "# Just markdown\n");
    }

    #[test]
    fn test_unclosed_fence_is_body() {
        let fm = FrontMatter::parse("---\ntitle: X\nno closing");
        assert!(fm.attributes.is_empty());
        assert_eq!(fm.body, "---\ntitle: X\nno closing");
    }

    #[test]
    fn test_crlf_and_bom() {
        let fm = FrontMatter::parse("\u{feff}---\r\ntitle: Hallo\r\n---\r\nWelt");
        assert_eq!(fm.string("title").as_deref(), Some("Hallo"));
        assert_eq!(fm.body, "Welt");
    }

    #[test]
    fn test_dots_close_fence() {
        let fm = FrontMatter::parse("---\ntitle: X\n...\nbody");
        assert_eq!(fm.string("title").as_deref(), Some("X"));
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_empty_front_matter() {
        let fm = FrontMatter::parse("---\n---\nbody");
        assert!(fm.attributes.is_empty());
        assert!(!fm.malformed);
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_malformed_yaml_degrades() {
        let fm = FrontMatter::parse("---\ntitle: [unclosed\n---\nbody");
        assert!(fm.malformed);
        assert!(fm.attributes.is_empty());
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_non_mapping_yaml_degrades() {
        let fm = FrontMatter::parse("---\n- a\n- b\n---\nbody");
        assert!(fm.malformed);
        assert_eq!(fm.string("title"), None);
    }

    #[test]
    fn test_non_string_values_are_absent() {
        let fm = FrontMatter::parse("---\ntitle: 42\ndraft: true\nexcerpt: \"  \"\n---\n");
        assert_eq!(fm.string("title"), None);
        assert_eq!(fm.string("draft"), None);
        assert_eq!(fm.string("excerpt"), None);
    }

    #[test]
    fn test_unquoted_iso_date_is_string() {
        let fm = FrontMatter::parse("---\ndate: 2024-01-15\n---\n");
        assert_eq!(fm.string("date").as_deref(), Some("2024-01-15"));
    }
}
