//! Scroll behaviour after navigation.
//!
//! The plan is computed here and applied in the browser by the embedded scroll
//! script, which reads the constants from `data-*` attributes on `<body>`.

use super::Location;
use serde::Serialize;

/// Height of the sticky site header, subtracted from anchor positions.
pub const HEADER_OFFSET_PX: u32 = 88;

/// Delays (ms) at which a missing anchor is looked up again before giving up.
pub const ANCHOR_RETRY_DELAYS_MS: [u32; 3] = [250, 500, 900];

/// What the view does once a navigation lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollPlan {
    /// Scroll to the top of the page.
    Top,
    /// Scroll to the element with `id`, `offset` pixels above it.
    Anchor { id: String, offset: u32, retry_delays_ms: [u32; 3] },
}

impl ScrollPlan {
    pub fn for_location(location: &Location) -> Self {
        match location.hash.as_deref() {
            Some(hash) => {
                let id = urlencoding::decode(hash)
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or_else(|_| hash.to_owned());
                Self::Anchor {
                    id,
                    offset: HEADER_OFFSET_PX,
                    retry_delays_ms: ANCHOR_RETRY_DELAYS_MS,
                }
            }
            None => Self::Top,
        }
    }

    /// `data-*` attributes consumed by the scroll script.
    pub fn body_attributes() -> String {
        let delays = ANCHOR_RETRY_DELAYS_MS
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!(r#"data-scroll-offset="{HEADER_OFFSET_PX}" data-scroll-retries="{delays}""#)
    }
}
