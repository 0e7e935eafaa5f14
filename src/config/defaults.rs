//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Marketing Site Starter".into()
    }

    pub fn description() -> String {
        "A production-ready starter for marketing websites.".into()
    }

    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        "content".into()
    }

    pub fn locales() -> PathBuf {
        "locales".into()
    }

    pub fn public() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
