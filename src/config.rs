//! Routes file loading
//!
//! A routes file declares generation options and named routes. YAML and JSON
//! are both accepted; the format is picked from the file extension.
//!
//! ```yaml
//! options:
//!   uri_kind: absolute
//!   base_uri: https://api.example.com/
//!
//! routes:
//!   - name: foo.show
//!     template: foo/{id}
//!     constraints:
//!       id: '\d+'
//!   - name: foo.one.two
//!     template: foo/{one}/{two}
//!     defaults:
//!       one: optional
//!       two: optional
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::options::GenerationOptions;
use crate::route::{RouteDefinition, RouteTable};

/// On-disk shape of a routes file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoutesFile {
    pub options: GenerationOptions,
    pub routes: Vec<RouteDefinition>,
}

/// A loaded routes file: the route table and the options to generate with
#[derive(Debug, Clone)]
pub struct RouteConfig {
    pub table: RouteTable,
    pub options: GenerationOptions,
}

/// Serialization format of a routes file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.yaml` and `.yml` are YAML, anything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

/// Load a routes file from disk
pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<RouteConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read routes file {}", path.display()))?;
    let config = load_routes_from_str(&content, ConfigFormat::from_path(path))
        .with_context(|| format!("Invalid routes file {}", path.display()))?;
    info!(
        path = %path.display(),
        routes_count = config.table.len(),
        "Routes file loaded"
    );
    Ok(config)
}

/// Parse a routes document already in memory
pub fn load_routes_from_str(content: &str, format: ConfigFormat) -> anyhow::Result<RouteConfig> {
    let file: RoutesFile = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };
    let table = RouteTable::from_definitions(file.routes)?;
    Ok(RouteConfig {
        table,
        options: file.options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::UriKind;
    use crate::route::RouteResolver;

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("r.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("r.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("r.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("routes")), ConfigFormat::Json);
    }

    #[test]
    fn yaml_document() {
        let doc = r"
options:
  uri_kind: relative
routes:
  - name: foo.show
    template: foo/{id}
  - name: bar
    template: bar/{id}
    defaults:
      id: ~
";
        let config = load_routes_from_str(doc, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.options.uri_kind, UriKind::Relative);
        assert_eq!(config.table.names(), vec!["bar", "foo.show"]);
        assert!(config.table.resolve("bar").unwrap().parameters()[0].optional);
    }

    #[test]
    fn empty_document_is_an_empty_table() {
        let config = load_routes_from_str("{}", ConfigFormat::Json).unwrap();
        assert!(config.table.is_empty());
        assert_eq!(config.options, GenerationOptions::default());
    }

    #[test]
    fn duplicate_routes_fail() {
        let doc = r#"{"routes": [{"name": "a", "template": "a"}, {"name": "a", "template": "b"}]}"#;
        let err = load_routes_from_str(doc, ConfigFormat::Json).unwrap_err();
        assert!(err.to_string().contains("'a'"));
    }
}
