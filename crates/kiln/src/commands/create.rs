//! `kiln create` command handler

use anyhow::{anyhow, Result};
use kiln_core::{ParsedInvocation, RuntimeConfig};
use kiln_projects::{
    CreateOptions, CreateOutcome, CreateWorkflow, PackageManager, ProcessEngine, ProjectRequest,
    TokioFs,
};

use crate::output;
use crate::prompt::TerminalPrompter;

pub(super) async fn run(inv: &ParsedInvocation, config: &RuntimeConfig) -> Result<()> {
    let app_name = inv
        .positional(0)
        .ok_or_else(|| anyhow!("Missing required argument <app-name>."))?;
    let options = CreateOptions::from_invocation(inv)?;

    // The generator owns the terminal while it runs, including its own progress output
    let engine = ProcessEngine::from_config(&config.config.generator);
    let workflow = CreateWorkflow::new(&TerminalPrompter, &TokioFs, &engine);

    match workflow.run(app_name, options, config).await? {
        CreateOutcome::Aborted => Ok(()),
        CreateOutcome::Created {
            request, warnings, ..
        } => {
            for warning in &warnings {
                output::warning(&format!("Project name: {}", warning));
            }
            println!();
            output::success(&format!("Successfully created project {}.", request.name));
            if !request.options.skip_get_started {
                print_get_started(&request, config);
            }
            Ok(())
        }
    }
}

fn print_get_started(request: &ProjectRequest, config: &RuntimeConfig) {
    let package_manager = request
        .options
        .package_manager
        .or_else(|| {
            config
                .config
                .package_manager
                .as_deref()
                .and_then(|pm| pm.parse().ok())
        })
        .unwrap_or_else(|| PackageManager::detect(&request.target_dir));

    output::info("Get started with the following commands:");
    println!();
    if !request.in_current {
        output::command(&format!("cd {}", request.name));
    }
    let script = package_manager.run_script_args("serve", &[]).join(" ");
    output::command(&format!("{} {}", package_manager, script));
    println!();
}
