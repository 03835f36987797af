//! # Generation Options
//!
//! Settings shared by the template and URL generators.
//!
//! ## Environment Variables
//!
//! [`GenerationOptions::from_env`] reads:
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `BRRTLINK_URI_KIND` | `absolute` / `relative` | `absolute` |
//! | `BRRTLINK_BASE_URI` | absolute URL | request scheme, host and port |
//! | `BRRTLINK_PROPERTY_SEPARATOR` | any string | `.` |
//! | `BRRTLINK_LOWERCASE_KEYS` | `true` / `false` | `true` |
//!
//! Unparseable values fall back to the default.
//!
//! ## Config Files
//!
//! The same settings deserialize from the `options` block of a routes file:
//!
//! ```yaml
//! options:
//!   uri_kind: relative
//!   property_separator: "_"
//! ```

use std::env;

use serde::{Deserialize, Serialize};

/// Whether generated output carries scheme, host and port
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UriKind {
    /// `http://host:port/foo/1`
    #[default]
    Absolute,
    /// `/foo/1`
    Relative,
}

impl UriKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" => Some(UriKind::Absolute),
            "relative" => Some(UriKind::Relative),
            _ => None,
        }
    }
}

/// Generation settings
///
/// One instance is typically shared by every generator in a process; use
/// the generators' `with_options` to override per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Absolute or path-relative output
    pub uri_kind: UriKind,
    /// Replaces the request-derived base for absolute output
    pub base_uri: Option<String>,
    /// Joins nested property names in leftover keys (`bar.abc`)
    pub property_separator: String,
    /// Lower-case leftover keys (`Bar` becomes `bar`)
    pub lowercase_keys: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            uri_kind: UriKind::Absolute,
            base_uri: None,
            property_separator: ".".to_string(),
            lowercase_keys: true,
        }
    }
}

impl GenerationOptions {
    /// Defaults with relative output
    #[must_use]
    pub fn relative() -> Self {
        Self {
            uri_kind: UriKind::Relative,
            ..Self::default()
        }
    }

    /// Load options from environment variables, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri_kind: env::var("BRRTLINK_URI_KIND")
                .ok()
                .and_then(|v| UriKind::parse(&v))
                .unwrap_or(defaults.uri_kind),
            base_uri: env::var("BRRTLINK_BASE_URI")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            property_separator: env::var("BRRTLINK_PROPERTY_SEPARATOR")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.property_separator),
            lowercase_keys: env::var("BRRTLINK_LOWERCASE_KEYS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.lowercase_keys),
        }
    }

    #[must_use]
    pub fn with_uri_kind(mut self, uri_kind: UriKind) -> Self {
        self.uri_kind = uri_kind;
        self
    }

    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    #[must_use]
    pub fn with_property_separator(mut self, separator: impl Into<String>) -> Self {
        self.property_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_lowercase_keys(mut self, lowercase: bool) -> Self {
        self.lowercase_keys = lowercase;
        self
    }

    /// Leftover key for a root-level property
    pub(crate) fn key(&self, name: &str) -> String {
        if self.lowercase_keys {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    /// Leftover key for a property nested under `prefix`
    pub(crate) fn nested_key(&self, prefix: &str, name: &str) -> String {
        let mut key = String::with_capacity(prefix.len() + self.property_separator.len() + name.len());
        key.push_str(prefix);
        key.push_str(&self.property_separator);
        key.push_str(&self.key(name));
        key
    }
}
