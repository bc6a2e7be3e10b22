//! Core types for project bootstrap

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use kiln_core::utils::resolve_path;
use kiln_core::ParsedInvocation;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Package manager used to install dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Get all supported package managers
    pub fn all() -> &'static [Self] {
        &[Self::Npm, Self::Yarn, Self::Pnpm]
    }

    /// Get the command name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Lockfile that marks a project managed by this package manager
    pub fn lockfile(&self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Guess from the lockfile in `dir`; npm when there is none
    pub fn detect(dir: &Utf8Path) -> Self {
        [Self::Pnpm, Self::Yarn]
            .into_iter()
            .find(|pm| dir.join(pm.lockfile()).exists())
            .unwrap_or(Self::Npm)
    }

    /// Arguments that run a package script, e.g. `run serve`
    pub fn run_script_args(&self, script: &str, extra: &[String]) -> Vec<String> {
        let mut args = match self {
            Self::Yarn => vec![script.to_string()],
            Self::Npm | Self::Pnpm => vec!["run".to_string(), script.to_string()],
        };
        if !extra.is_empty() {
            if *self == Self::Npm {
                args.push("--".to_string());
            }
            args.extend(extra.iter().cloned());
        }
        args
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|pm| pm.as_str() == s)
            .ok_or_else(|| {
                let available = Self::all()
                    .iter()
                    .map(PackageManager::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Error::unknown_package_manager(s, available)
            })
    }
}

/// Where the project preset comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PresetSource {
    /// Ask the user interactively
    #[default]
    Prompt,
    /// The built-in default preset
    Default,
    /// A saved or remote preset by name
    Named(String),
    /// A preset given inline on the command line
    Inline(serde_json::Value),
}

/// Version control initialisation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GitMode {
    /// Let the engine decide
    #[default]
    Auto,
    /// Never initialise a repository
    Skip,
    /// Always initialise, optionally with an initial commit message
    Init { message: Option<String> },
}

/// Normalized `create` options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOptions {
    pub preset: PresetSource,
    pub package_manager: Option<PackageManager>,
    pub registry: Option<String>,
    pub git: GitMode,
    /// Overwrite the target directory if it exists
    pub force: bool,
    /// Merge into the target directory if it exists
    pub merge: bool,
    /// Fetch remote presets with `git clone`
    pub clone: bool,
    pub proxy: Option<String>,
    /// Scaffold without beginner instructions
    pub bare: bool,
    pub skip_get_started: bool,
}

impl CreateOptions {
    /// Build from a parsed `create` invocation, applying every default here.
    ///
    /// Preset precedence: `--preset`, then `--default`, then `--inlinePreset`,
    /// then interactive prompts.
    pub fn from_invocation(inv: &ParsedInvocation) -> Result<Self> {
        let preset = if let Some(name) = inv.value("preset") {
            PresetSource::Named(name.to_string())
        } else if inv.flag("default") {
            PresetSource::Default
        } else if let Some(json) = inv.value("inlinePreset") {
            let value = serde_json::from_str(json)
                .map_err(|_| Error::invalid_option("CLI inline preset is not valid JSON"))?;
            PresetSource::Inline(value)
        } else {
            PresetSource::Prompt
        };

        let package_manager = inv
            .value("packageManager")
            .map(PackageManager::from_str)
            .transpose()?;

        let git = match inv.options.get("git") {
            None => GitMode::Auto,
            Some(value) if !value.is_set() => GitMode::Skip,
            Some(value) => GitMode::Init {
                message: value.as_str().map(str::to_string),
            },
        };

        Ok(Self {
            preset,
            package_manager,
            registry: inv.value("registry").map(str::to_string),
            git,
            force: inv.flag("force"),
            merge: inv.flag("merge"),
            clone: inv.flag("clone"),
            proxy: inv.value("proxy").map(str::to_string),
            bare: inv.flag("bare"),
            skip_get_started: inv.flag("skipGetStarted"),
        })
    }
}

/// A validated request to bootstrap one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    /// Package / display name
    pub name: String,
    /// Absolute, normalized target directory
    pub target_dir: Utf8PathBuf,
    /// Project is generated into the working directory itself (`.`)
    pub in_current: bool,
    pub options: CreateOptions,
}

impl ProjectRequest {
    /// Resolve the `<app-name>` argument against `cwd`.
    ///
    /// For `.` the name is the final component of `cwd`.
    pub fn resolve(app_name: &str, cwd: &Utf8Path, options: CreateOptions) -> Self {
        let in_current = app_name == ".";
        let target_dir = resolve_path(cwd, app_name);
        let name = if in_current {
            target_dir.file_name().unwrap_or_default().to_string()
        } else {
            app_name.to_string()
        };

        Self {
            name,
            target_dir,
            in_current,
            options,
        }
    }
}
