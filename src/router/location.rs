//! Request location parsing.

use serde::Serialize;

/// A request target split into path, query and fragment.
///
/// `/en/about?utm=x#team` → path `/en/about`, query `utm=x`, hash `team`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Location {
    pub fn parse(target: &str) -> Self {
        let (rest, hash) = match target.split_once('#') {
            Some((rest, hash)) => (rest, non_empty(hash)),
            None => (target, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, non_empty(query)),
            None => (rest, None),
        };
        let path = if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        };

        Self { path, query, hash }
    }

    /// Non-empty path segments, percent-decoded.
    ///
    /// Segments that fail to decode are kept verbatim.
    pub fn segments(&self) -> Vec<String> {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                urlencoding::decode(segment)
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or_else(|_| segment.to_owned())
            })
            .collect()
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}
