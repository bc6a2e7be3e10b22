//! Operations handled entirely by the generator program

use anyhow::{Context, Result};
use kiln_core::{ParsedInvocation, RuntimeConfig};
use kiln_projects::ProcessEngine;

pub(super) async fn run(operation: &str, inv: &ParsedInvocation, config: &RuntimeConfig) -> Result<()> {
    let payload = serde_json::to_value(inv).context("Failed to encode invocation")?;
    let engine = ProcessEngine::from_config(&config.config.generator);
    engine.forward(operation, &payload, config).await?;
    Ok(())
}
