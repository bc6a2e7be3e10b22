//! Process environment inputs and runtime version checks
//!
//! Environment variables are read exactly once, into an [`EnvSnapshot`], and
//! from there flow into [`crate::RuntimeConfig`]. Nothing else in the
//! workspace reads or writes the process environment.

use camino::{Utf8Path, Utf8PathBuf};
use semver::{Prerelease, Version, VersionReq};

use crate::error::{Error, Result};

/// Proxy URL override
pub const ENV_PROXY: &str = "KILN_PROXY";
/// Test-mode flag: failures are returned instead of exiting the process
pub const ENV_TEST: &str = "KILN_TEST";
/// Force debug output
pub const ENV_DEBUG: &str = "KILN_DEBUG";
/// Config file override
pub const ENV_CONFIG: &str = "KILN_CONFIG";

/// Standard proxy variables, in lookup order
const PROXY_FALLBACKS: &[&str] = &["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy"];

/// Scope directory that marks a development checkout of kiln itself
const DEV_SCOPE_DIR: &str = "@kiln";

/// Snapshot of the environment inputs kiln recognises
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub proxy: Option<String>,
    pub test_mode: bool,
    pub debug: bool,
    pub config_path: Option<Utf8PathBuf>,
}

impl EnvSnapshot {
    /// Read the process environment
    pub fn capture() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let proxy = non_empty(ENV_PROXY)
            .or_else(|| PROXY_FALLBACKS.iter().find_map(|key| non_empty(*key)));

        Self {
            proxy,
            test_mode: non_empty(ENV_TEST).is_some_and(|v| is_truthy(&v)),
            debug: non_empty(ENV_DEBUG).is_some_and(|v| is_truthy(&v)),
            config_path: non_empty(ENV_CONFIG).map(Utf8PathBuf::from),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}

/// Whether `cwd` is a test fixture inside a development checkout of kiln
/// (`.../packages/test/...` next to an `@kiln` scope directory).
pub fn is_dev_checkout(cwd: &Utf8Path) -> bool {
    let slashed = cwd.as_str().replace('\\', "/");
    let inside_test_packages = slashed.find("/packages/test").is_some_and(|idx| idx > 0);

    inside_test_packages
        && (cwd.join("..").join(DEV_SCOPE_DIR).exists()
            || cwd.join("../..").join(DEV_SCOPE_DIR).exists())
}

/// Check that `current` satisfies the semver requirement `wanted`.
///
/// Pre-release builds are compared by their release triple, so `0.5.0-beta.1`
/// satisfies `>=0.4`.
pub fn check_version(id: &str, current: &str, wanted: &str) -> Result<()> {
    let requirement = VersionReq::parse(wanted).map_err(|_| Error::invalid_version(wanted))?;
    let version = Version::parse(current).map_err(|_| Error::invalid_version(current))?;

    let release = Version {
        pre: Prerelease::EMPTY,
        ..version.clone()
    };

    if requirement.matches(&version) || requirement.matches(&release) {
        tracing::debug!("{} {} satisfies {}", id, current, wanted);
        Ok(())
    } else {
        Err(Error::unsupported_version(id, current, wanted))
    }
}
