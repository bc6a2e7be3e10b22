//! Operation handlers

mod create;
mod forward;
mod info;
mod script;

use anyhow::Result;
use kiln_core::{CommandSpec, Operation, ParsedInvocation, RuntimeConfig};

/// Run the operation behind `spec` with its parsed arguments
pub async fn run(spec: &CommandSpec, inv: &ParsedInvocation, config: &RuntimeConfig) -> Result<()> {
    match spec.operation {
        Operation::Create => create::run(inv, config).await,
        Operation::Serve | Operation::Build => script::run(spec.name, inv, config).await,
        Operation::Info => info::run(config).await,
        Operation::Add
        | Operation::Invoke
        | Operation::Inspect
        | Operation::Ui
        | Operation::Init
        | Operation::Config
        | Operation::Outdated
        | Operation::Upgrade
        | Operation::Migrate => forward::run(spec.name, inv, config).await,
    }
}
