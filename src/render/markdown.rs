//! Markdown body rendering.
//!
//! Content bodies are rendered with CommonMark plus tables and strikethrough.
//! Raw HTML in the source is escaped, never passed through. Headings without an
//! explicit `{#id}` get a slug id, deduplicated within one document.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use rustc_hash::FxHashSet;
use slug::slugify;

/// Render a Markdown body to an HTML fragment.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let events: Vec<Event> = Parser::new_ext(source, options)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        })
        .collect();

    let events = assign_heading_ids(events);

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Produces unique heading ids: `intro`, `intro-1`, `intro-2`, ...
#[derive(Default)]
struct Slugger {
    seen: FxHashSet<String>,
}

impl Slugger {
    fn slugify(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();
        let mut counter = 1;
        while self.seen.contains(&slug) {
            slug = format!("{base}-{counter}");
            counter += 1;
        }
        self.seen.insert(slug.clone());
        slug
    }
}

fn assign_heading_ids(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut slugger = Slugger::default();

    // Explicit ids are reserved up front, wherever they appear.
    for event in &events {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            slugger.seen.insert(id.to_string());
        }
    }

    for i in 0..events.len() {
        let Event::Start(Tag::Heading { id: None, .. }) = &events[i] else {
            continue;
        };

        let text = heading_text(&events[i + 1..]);
        let slug = slugger.slugify(&text);
        if slug.is_empty() {
            continue;
        }
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(slug));
        }
    }

    events
}

/// Plain text of a heading, up to its end tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_markdown("Hello *world*");
        assert_eq!(html, "<p>Hello <em>world</em></p>\n");
    }

    #[test]
    fn test_heading_ids() {
        let html = render_markdown("## Getting Started\n\ntext\n\n### `cargo` Setup");
        assert!(html.contains(r#"<h2 id="getting-started">Getting Started</h2>"#));
        assert!(html.contains(r#"<h3 id="cargo-setup">"#));
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let html = render_markdown("# FAQ\n\n# FAQ\n\n# FAQ");
        assert!(html.contains(r#"id="faq""#));
        assert!(html.contains(r#"id="faq-1""#));
        assert!(html.contains(r#"id="faq-2""#));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let html = render_markdown("## Pricing {#plans}");
        assert!(html.contains(r#"<h2 id="plans">Pricing</h2>"#));
    }

    #[test]
    fn test_generated_id_avoids_explicit_id() {
        let html = render_markdown("## Team {#team}\n\n## Team");
        assert!(html.contains(r#"<h2 id="team">Team</h2>"#));
        assert!(html.contains(r#"<h2 id="team-1">Team</h2>"#));

        // also when the explicit id comes later in the document
        let html = render_markdown("## Team\n\n## Crew {#team}");
        assert!(html.contains(r#"<h2 id="team-1">Team</h2>"#));
        assert!(html.contains(r#"<h2 id="team">Crew</h2>"#));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>\n\nInline <b>bold</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(render_markdown(""), "");
    }
}
