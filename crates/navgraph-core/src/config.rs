//! Navigation configuration loading.
//!
//! A configuration file lists the destinations, the graphs grouping them and
//! the root graph of the session:
//!
//! ```yaml
//! root: root
//! destinations:
//!   - id: login
//!     route: login
//!   - id: profile
//!     route: profile/{name}/{score}
//! graphs:
//!   - id: root
//!     start: login
//!     members: [login, profile]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::{DestinationTemplate, Graph, NavError, Navigator, RouteRegistry};

/// Errors raised while loading a navigation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for a configuration.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file is not valid JSON for a configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The extension is neither YAML nor JSON.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The described routes do not form a valid registry.
    #[error("invalid navigation config: {0}")]
    Registry(#[from] NavError),
}

/// Static description of a navigation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Graph or destination the session starts in.
    pub root: String,
    /// Destination templates, in matching order.
    #[serde(default)]
    pub destinations: Vec<DestinationTemplate>,
    /// Graphs grouping the destinations.
    #[serde(default)]
    pub graphs: Vec<Graph>,
}

impl NavConfig {
    /// Loads a configuration, choosing the format by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&contents)?,
            "json" => Self::from_json(&contents)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        tracing::info!(
            ?path,
            destinations = config.destinations.len(),
            graphs = config.graphs.len(),
            "Loaded navigation config"
        );
        Ok(config)
    }

    /// Parses a YAML configuration.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Parses a JSON configuration.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Builds and validates the registry described by this configuration.
    pub fn to_registry(&self) -> Result<RouteRegistry, ConfigError> {
        let mut registry = RouteRegistry::new();
        for template in &self.destinations {
            registry.register(template.clone())?;
        }
        for graph in &self.graphs {
            registry.register_graph(graph.clone())?;
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Builds a navigator positioned at the start of the root graph.
    pub fn to_navigator(&self) -> Result<Navigator, ConfigError> {
        Ok(Navigator::new(self.to_registry()?, &self.root)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r#"
root: root
destinations:
  - id: login
    route: login
  - id: signup
    route: signup
  - id: home
    route: home
  - id: profile
    route: profile/{name}/{score}
graphs:
  - id: auth
    start: login
    members: [login, signup]
  - id: main
    start: home
    members: [home, profile]
  - id: root
    start: auth
    members: [auth, main]
"#;

    #[test]
    fn test_yaml_config_builds_navigator() {
        let config = NavConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.destinations.len(), 4);

        let nav = config.to_navigator().unwrap();
        assert_eq!(nav.current_destination().0, "login");
    }

    #[test]
    fn test_json_config() {
        let json = r#"{
            "root": "home",
            "destinations": [{"id": "home", "route": "home"}]
        }"#;
        let config = NavConfig::from_json(json).unwrap();
        assert!(config.graphs.is_empty());
        assert_eq!(config.to_navigator().unwrap().depth(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_a_parse_error() {
        let yaml = "root: a\ndestinations:\n  - id: a\n    route: \"a//b\"\n";
        assert!(matches!(
            NavConfig::from_yaml(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_registry_errors_surface() {
        let yaml = r#"
root: a
destinations:
  - id: a
    route: "user/{id}"
  - id: b
    route: user/me
"#;
        let config = NavConfig::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.to_registry(),
            Err(ConfigError::Registry(NavError::AmbiguousRoute { .. }))
        ));
    }

    #[test]
    fn test_dangling_member_rejected_at_load() {
        let yaml = r#"
root: g
destinations:
  - id: a
    route: a
graphs:
  - id: g
    start: a
    members: [a, ghost]
"#;
        let config = NavConfig::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.to_registry(),
            Err(ConfigError::Registry(NavError::UnknownDestination { .. }))
        ));
    }

    #[test]
    fn test_membership_cycle_rejected_at_load() {
        let yaml = r#"
root: a
destinations:
  - id: x
    route: x
  - id: y
    route: y
graphs:
  - id: a
    start: x
    members: [x, b]
  - id: b
    start: y
    members: [y, a]
"#;
        let config = NavConfig::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.to_registry(),
            Err(ConfigError::Registry(NavError::GraphCycle { .. }))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("nav.yaml");
        std::fs::File::create(&yaml_path)
            .unwrap()
            .write_all(YAML.as_bytes())
            .unwrap();
        let config = NavConfig::load(&yaml_path).unwrap();
        assert_eq!(config.root, "root");

        let json_path = dir.path().join("nav.json");
        std::fs::write(&json_path, serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(NavConfig::load(&json_path).unwrap(), config);

        let toml_path = dir.path().join("nav.toml");
        std::fs::write(&toml_path, "root = 'x'").unwrap();
        assert!(matches!(
            NavConfig::load(&toml_path),
            Err(ConfigError::UnsupportedFormat(ref ext)) if ext == "toml"
        ));

        assert!(matches!(
            NavConfig::load(dir.path().join("missing.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
