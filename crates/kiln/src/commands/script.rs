//! `kiln serve` / `kiln build`: run the project's package script

use anyhow::{bail, Context, Result};
use kiln_core::{ParsedInvocation, RuntimeConfig};
use kiln_projects::PackageManager;
use tokio::process::Command;
use tracing::debug;

pub(super) async fn run(script: &str, inv: &ParsedInvocation, config: &RuntimeConfig) -> Result<()> {
    let package_manager = package_manager_for(config);
    let program = which::which(package_manager.as_str())
        .with_context(|| format!("{} not found in PATH", package_manager))?;
    let args = package_manager.run_script_args(script, &inv.raw);

    debug!("Running: {} {}", package_manager, args.join(" "));
    let mut cmd = Command::new(program);
    cmd.args(&args).current_dir(&config.cwd);
    if let Some(proxy) = config.effective_proxy(None) {
        cmd.env("HTTP_PROXY", proxy).env("HTTPS_PROXY", proxy);
    }

    let status = cmd
        .status()
        .await
        .with_context(|| format!("Failed to run {}", package_manager))?;
    if !status.success() {
        bail!("{} {} failed with {}", package_manager, args.join(" "), status);
    }
    Ok(())
}

/// Configured package manager, else the one the project's lockfile points to
fn package_manager_for(config: &RuntimeConfig) -> PackageManager {
    config
        .config
        .package_manager
        .as_deref()
        .and_then(|pm| pm.parse().ok())
        .unwrap_or_else(|| PackageManager::detect(&config.cwd))
}
