//! `kiln info` command handler

use anyhow::Result;
use kiln_core::RuntimeConfig;
use kiln_projects::PackageManager;
use tokio::process::Command;

use crate::output;

pub(super) async fn run(config: &RuntimeConfig) -> Result<()> {
    output::header("Environment Info");

    output::kv("OS", std::env::consts::OS);
    output::kv("Arch", std::env::consts::ARCH);
    output::kv("kiln", env!("CARGO_PKG_VERSION"));
    output::kv(
        "Config",
        config
            .config_path
            .as_ref()
            .map(|p| p.as_str())
            .unwrap_or("none"),
    );

    let generator = &config.config.generator.program;
    let generator_status = match which::which(generator) {
        Ok(path) => format!("{} ({})", generator, path.display()),
        Err(_) => format!("{} (Not Found)", generator),
    };
    output::kv("Generator", &generator_status);

    let pb = output::spinner("Collecting package manager versions");
    let mut versions = Vec::new();
    for pm in PackageManager::all() {
        versions.push((pm.as_str(), tool_version(pm.as_str()).await));
    }
    pb.finish_and_clear();

    output::header("Package Managers");
    for (name, version) in &versions {
        output::kv(name, version);
    }

    Ok(())
}

/// `<version> - <path>`, or "Not Found"
async fn tool_version(tool: &str) -> String {
    let Ok(path) = which::which(tool) else {
        return "Not Found".to_string();
    };

    let version = match Command::new(&path).arg("--version").output().await {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        _ => "unknown".to_string(),
    };
    format!("{} - {}", version, path.display())
}
