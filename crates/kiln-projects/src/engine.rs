//! Generator engine hand-off
//!
//! The generator engine owns preset resolution, dependency installation and
//! file generation. kiln only hands it a validated [`ProjectRequest`].

use std::collections::BTreeMap;
use std::process::Stdio;

use async_trait::async_trait;
use camino::Utf8Path;
use kiln_core::config::GeneratorConfig;
use kiln_core::RuntimeConfig;
use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::GenerationError;
use crate::types::ProjectRequest;

/// Something that can generate a project
#[async_trait]
pub trait GeneratorEngine: Send + Sync {
    /// Generate the project described by `request`; resolves once generation is complete
    async fn generate(
        &self,
        request: &ProjectRequest,
        config: &RuntimeConfig,
    ) -> Result<(), GenerationError>;
}

/// Payload passed to the generator for `create`
#[derive(Debug, Serialize)]
struct CreatePayload<'a> {
    operation: &'static str,
    #[serde(flatten)]
    request: &'a ProjectRequest,
    /// Package manager from the user config when `--packageManager` was not given
    default_package_manager: Option<&'a str>,
    default_registry: Option<&'a str>,
    presets: &'a BTreeMap<String, serde_json::Value>,
}

/// Runs an external generator program as
/// `<program> <args> <operation> <payload>`, with the terminal attached so it
/// can prompt for presets and report its own progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEngine {
    program: String,
    args: Vec<String>,
}

impl ProcessEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(
        &self,
        operation: &str,
        payload: String,
        cwd: &Utf8Path,
        proxy: Option<&str>,
    ) -> Result<(), GenerationError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(operation)
            .arg(payload)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(proxy) = proxy {
            cmd.env("HTTP_PROXY", proxy).env("HTTPS_PROXY", proxy);
        }

        let status = cmd
            .status()
            .await
            .map_err(|e| GenerationError::spawn(&self.program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(GenerationError::failed(&self.program, status.to_string()))
        }
    }

    /// Forward a pass-through operation with the parsed invocation as payload
    pub async fn forward(
        &self,
        operation: &str,
        payload: &serde_json::Value,
        config: &RuntimeConfig,
    ) -> Result<(), GenerationError> {
        let encoded = serde_json::to_string(payload)?;
        debug!("Forwarding '{}' to {}", operation, self.program);
        self.run(operation, encoded, &config.cwd, config.effective_proxy(None))
            .await
    }
}

#[async_trait]
impl GeneratorEngine for ProcessEngine {
    async fn generate(
        &self,
        request: &ProjectRequest,
        config: &RuntimeConfig,
    ) -> Result<(), GenerationError> {
        let payload = CreatePayload {
            operation: "create",
            request,
            default_package_manager: config.config.package_manager.as_deref(),
            default_registry: config.config.registry.as_deref(),
            presets: &config.config.presets,
        };
        let encoded = serde_json::to_string(&payload)?;
        let proxy = config.effective_proxy(request.options.proxy.as_deref());

        info!("Generating {} in {}", request.name, request.target_dir);
        self.run("create", encoded, &config.cwd, proxy).await?;
        debug!("Generator finished for {}", request.name);
        Ok(())
    }
}
