//! User configuration file (~/.kiln/config.yaml)

use std::collections::BTreeMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::get_home_dir;

/// Config file name inside the kiln directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Program that implements the generator engine
const DEFAULT_GENERATOR_PROGRAM: &str = "kiln-generator";

/// Parsed user configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KilnConfig {
    /// Preferred package manager (npm, yarn, pnpm)
    #[serde(default)]
    pub package_manager: Option<String>,

    /// Default package registry URL
    #[serde(default)]
    pub registry: Option<String>,

    /// Generator engine invocation
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Version requirements for the CLI itself
    #[serde(default)]
    pub engines: EnginesConfig,

    /// Saved presets, handed to the generator engine as-is
    #[serde(default)]
    pub presets: BTreeMap<String, serde_json::Value>,
}

/// How to launch the generator engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratorConfig {
    #[serde(default = "default_generator_program")]
    pub program: String,

    /// Extra arguments placed before the operation name
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: default_generator_program(),
            args: Vec::new(),
        }
    }
}

fn default_generator_program() -> String {
    DEFAULT_GENERATOR_PROGRAM.to_string()
}

/// Semver requirements, e.g. `kiln: ">=0.4"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnginesConfig {
    #[serde(default)]
    pub kiln: Option<String>,
}

impl KilnConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_file(path)
    }

    /// Load from `path`, which must exist
    pub fn load_file(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Parse YAML content
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }
}

/// Default config path (~/.kiln/config.yaml)
pub fn default_config_path() -> Result<Utf8PathBuf> {
    let home = get_home_dir()?;
    Ok(home.join(".kiln").join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
package-manager: pnpm
registry: https://registry.example.com
generator:
  program: /opt/kiln/bin/generate
  args: ["--color"]
engines:
  kiln: ">=0.3"
presets:
  minimal:
    plugins:
      eslint: {}
"#;
        let config = KilnConfig::parse(yaml).unwrap();

        assert_eq!(config.package_manager.as_deref(), Some("pnpm"));
        assert_eq!(config.registry.as_deref(), Some("https://registry.example.com"));
        assert_eq!(config.generator.program, "/opt/kiln/bin/generate");
        assert_eq!(config.generator.args, vec!["--color"]);
        assert_eq!(config.engines.kiln.as_deref(), Some(">=0.3"));
        assert!(config.presets["minimal"]["plugins"]["eslint"].is_object());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = KilnConfig::parse("").unwrap();
        assert_eq!(config, KilnConfig::default());
        assert_eq!(config.generator.program, "kiln-generator");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap().join("config.yaml");

        let config = KilnConfig::load(&path).unwrap();
        assert_eq!(config, KilnConfig::default());

        let err = KilnConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_malformed_file_is_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap().join("config.yaml");
        fs::write(&path, "generator: [not, a, map]\n").unwrap();

        let err = KilnConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
