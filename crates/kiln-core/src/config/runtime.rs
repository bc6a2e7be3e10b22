//! Runtime configuration assembled once at startup
//!
//! Combines the user config file, the environment snapshot and the working
//! directory. It is passed by reference to every stage that needs it.

use camino::{Utf8Path, Utf8PathBuf};

use super::loader::{default_config_path, KilnConfig};
use crate::environment::{check_version, is_dev_checkout, EnvSnapshot};
use crate::error::Result;

/// Effective configuration for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Working directory every relative target is resolved against
    pub cwd: Utf8PathBuf,

    /// Parsed user configuration
    pub config: KilnConfig,

    /// Where the user configuration was looked up
    pub config_path: Option<Utf8PathBuf>,

    /// Proxy from the environment; `--proxy` takes precedence per invocation
    pub proxy: Option<String>,

    /// Return failures to the caller instead of exiting the process
    pub test_mode: bool,

    /// Verbose diagnostics
    pub debug: bool,
}

impl RuntimeConfig {
    /// Defaults for `cwd`, without reading any file or variable
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self {
            cwd,
            config: KilnConfig::default(),
            config_path: None,
            proxy: None,
            test_mode: false,
            debug: false,
        }
    }

    /// Fold in the environment snapshot; the user config is read separately
    /// by [`RuntimeConfig::load_user_config`] so a broken config file can
    /// still be reported according to `test_mode`.
    pub fn from_env(env: EnvSnapshot, cwd: Utf8PathBuf) -> Self {
        let debug = env.debug || is_dev_checkout(&cwd);
        Self {
            config_path: env.config_path,
            proxy: env.proxy,
            test_mode: env.test_mode,
            debug,
            ..Self::new(cwd)
        }
    }

    /// Read the user config.
    ///
    /// Path precedence: `config_override` (the `--config` flag), then
    /// `KILN_CONFIG`, then `~/.kiln/config.yaml`. An explicit path must exist;
    /// the others may be absent.
    pub fn load_user_config(mut self, config_override: Option<&Utf8Path>) -> Result<Self> {
        let config_path = match (config_override, self.config_path.take()) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path,
            (None, None) => default_config_path()?,
        };
        self.config = if config_override.is_some() {
            KilnConfig::load_file(&config_path)?
        } else {
            KilnConfig::load(&config_path)?
        };
        self.config_path = Some(config_path);
        Ok(self)
    }

    /// Proxy for this invocation: an explicit override wins over the environment
    pub fn effective_proxy<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or(self.proxy.as_deref())
    }

    /// Enforce `engines.kiln` from the user config against `current_version`
    pub fn check_engines(&self, current_version: &str) -> Result<()> {
        match self.config.engines.kiln.as_deref() {
            Some(wanted) => check_version("kiln", current_version, wanted),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnginesConfig;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_effective_proxy() {
        let mut config = RuntimeConfig::new(Utf8PathBuf::from("/work"));
        assert_eq!(config.effective_proxy(None), None);

        config.proxy = Some("http://env:1".to_string());
        assert_eq!(config.effective_proxy(None), Some("http://env:1"));
        assert_eq!(config.effective_proxy(Some("http://cli:2")), Some("http://cli:2"));
    }

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();
        let path = dir.join("kiln.yaml");
        std::fs::write(&path, "package-manager: yarn\n").unwrap();

        let env = EnvSnapshot {
            proxy: Some("http://env:1".to_string()),
            test_mode: true,
            ..Default::default()
        };
        let config = RuntimeConfig::from_env(env, dir.to_path_buf())
            .load_user_config(Some(&path))
            .unwrap();

        assert_eq!(config.config.package_manager.as_deref(), Some("yarn"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.proxy.as_deref(), Some("http://env:1"));
        assert!(config.test_mode);
        assert!(!config.debug);
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();
        let path = dir.join("missing.yaml");

        let err = RuntimeConfig::from_env(EnvSnapshot::default(), dir.to_path_buf())
            .load_user_config(Some(&path))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_env_config_path_may_be_missing() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();

        let env = EnvSnapshot {
            config_path: Some(dir.join("absent.yaml")),
            ..Default::default()
        };
        let config = RuntimeConfig::from_env(env, dir.to_path_buf())
            .load_user_config(None)
            .unwrap();
        assert_eq!(config.config, KilnConfig::default());
        assert_eq!(config.config_path, Some(dir.join("absent.yaml")));
    }

    #[test]
    fn test_check_engines() {
        let config = RuntimeConfig::new(Utf8PathBuf::from("/work"));
        assert!(config.check_engines("0.1.0").is_ok());

        let config = RuntimeConfig {
            config: KilnConfig {
                engines: EnginesConfig {
                    kiln: Some(">=1.0".to_string()),
                },
                ..Default::default()
            },
            ..config
        };
        assert!(config.check_engines("0.4.0").is_err());
        assert!(config.check_engines("1.2.0").is_ok());
    }

    #[test]
    fn test_from_env_detects_dev_checkout() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8Path::from_path(temp_dir.path()).unwrap();
        let fixture = root.join("packages").join("test");
        std::fs::create_dir_all(root.join("packages").join("@kiln")).unwrap();
        std::fs::create_dir_all(&fixture).unwrap();

        let config = RuntimeConfig::from_env(EnvSnapshot::default(), fixture);
        assert!(config.debug);
        assert!(!config.test_mode);

        let env = EnvSnapshot {
            test_mode: true,
            ..Default::default()
        };
        let config = RuntimeConfig::from_env(env, root.to_path_buf());
        assert!(!config.debug);
        assert!(config.test_mode);
    }
}
