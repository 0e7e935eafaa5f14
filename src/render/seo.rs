//! Document head metadata.
//!
//! Emits `<title>`, description, canonical link, robots, Open Graph, article,
//! Twitter card and JSON-LD tags. JSON-LD is only emitted when a canonical URL
//! is known, since schema.org entities need an absolute `url`.

use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OgType {
    #[default]
    Website,
    Article,
}

impl OgType {
    fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

/// Head metadata of one rendered document.
#[derive(Debug, Clone, Default)]
pub struct SeoMeta {
    pub title: String,
    pub description: Option<String>,
    pub canonical_url: Option<String>,
    pub noindex: bool,
    pub og_type: OgType,
    pub og_image: Option<String>,
    pub site_name: Option<String>,
    /// Open Graph locale, e.g. `en_US`.
    pub locale: &'static str,
    /// Publication date of an article.
    pub published_time: Option<String>,
}

impl SeoMeta {
    pub fn new(title: impl Into<String>, locale: &'static str) -> Self {
        Self {
            title: title.into(),
            locale,
            ..Self::default()
        }
    }

    /// Render the head tags, one per line.
    pub fn to_head(&self) -> String {
        let mut head = String::with_capacity(1024);
        let title = escape_html(&self.title);
        let description = self.description.as_deref().map(escape_html);
        let canonical = self.canonical_url.as_deref().map(escape_html);
        let image = self.og_image.as_deref().map(escape_html);

        push_line(&mut head, format!("<title>{title}</title>"));
        if let Some(description) = &description {
            push_line(&mut head, meta_name("description", description));
        }
        if let Some(canonical) = &canonical {
            push_line(&mut head, format!(r#"<link rel="canonical" href="{canonical}">"#));
        }
        if self.noindex {
            push_line(&mut head, meta_name("robots", "noindex,nofollow"));
        }

        // Open Graph
        push_line(&mut head, meta_property("og:title", &title));
        push_line(&mut head, meta_property("og:type", self.og_type.as_str()));
        if let Some(description) = &description {
            push_line(&mut head, meta_property("og:description", description));
        }
        if let Some(canonical) = &canonical {
            push_line(&mut head, meta_property("og:url", canonical));
        }
        if let Some(site_name) = &self.site_name {
            push_line(&mut head, meta_property("og:site_name", &escape_html(site_name)));
        }
        push_line(&mut head, meta_property("og:locale", self.locale));
        if let Some(image) = &image {
            push_line(&mut head, meta_property("og:image", image));
        }
        if self.og_type == OgType::Article
            && let Some(published) = &self.published_time
        {
            push_line(&mut head, meta_property("article:published_time", &escape_html(published)));
        }

        // Twitter
        push_line(&mut head, meta_name("twitter:card", "summary_large_image"));
        push_line(&mut head, meta_name("twitter:title", &title));
        if let Some(description) = &description {
            push_line(&mut head, meta_name("twitter:description", description));
        }
        if let Some(image) = &image {
            push_line(&mut head, meta_name("twitter:image", image));
        }

        if let Some(json_ld) = self.json_ld() {
            push_line(
                &mut head,
                format!(r#"<script type="application/ld+json">{}</script>"#, escape_script(&json_ld)),
            );
        }

        head
    }

    /// schema.org `WebPage` or `Article`, when a canonical URL exists.
    pub fn json_ld(&self) -> Option<String> {
        let url = self.canonical_url.as_ref()?;
        let kind = match self.og_type {
            OgType::Website => "WebPage",
            OgType::Article => "Article",
        };

        let mut schema = Map::new();
        schema.insert("@context".into(), json!("https://schema.org"));
        schema.insert("@type".into(), json!(kind));
        schema.insert("name".into(), json!(self.title));
        schema.insert("url".into(), json!(url));
        if let Some(description) = &self.description {
            schema.insert("description".into(), json!(description));
        }
        if let Some(image) = &self.og_image {
            schema.insert("image".into(), json!(image));
        }
        if self.og_type == OgType::Article
            && let Some(published) = &self.published_time
        {
            schema.insert("datePublished".into(), json!(published));
        }

        Some(Value::Object(schema).to_string())
    }
}

fn push_line(head: &mut String, line: String) {
    head.push_str(&line);
    head.push('\n');
}

fn meta_name(name: &str, content: &str) -> String {
    format!(r#"<meta name="{name}" content="{content}">"#)
}

fn meta_property(property: &str, content: &str) -> String {
    format!(r#"<meta property="{property}" content="{content}">"#)
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep serialized JSON from closing its `<script>` element.
fn escape_script(json: &str) -> String {
    json.replace("</", r"<\/")
}
