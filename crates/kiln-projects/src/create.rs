//! The `create` workflow: name validation, conflict resolution, generation
//!
//! Each stage short-circuits: a rejected name never touches the filesystem
//! and a cancelled conflict never reaches the engine.

use kiln_core::RuntimeConfig;
use tracing::{debug, info};

use crate::conflict::{ConflictDecision, ConflictResolver, ProjectFs, Prompter};
use crate::engine::GeneratorEngine;
use crate::error::{Error, Result};
use crate::types::{CreateOptions, ProjectRequest};
use crate::validation::validate_project_name;

/// How a `create` run ended
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The engine generated the project
    Created {
        request: ProjectRequest,
        decision: ConflictDecision,
        /// Non-blocking name warnings
        warnings: Vec<String>,
    },
    /// The user cancelled at a prompt; nothing was changed
    Aborted,
}

/// Drives one `create` invocation through its collaborators
pub struct CreateWorkflow<'a> {
    prompter: &'a dyn Prompter,
    fs: &'a dyn ProjectFs,
    engine: &'a dyn GeneratorEngine,
}

impl<'a> CreateWorkflow<'a> {
    pub fn new(
        prompter: &'a dyn Prompter,
        fs: &'a dyn ProjectFs,
        engine: &'a dyn GeneratorEngine,
    ) -> Self {
        Self {
            prompter,
            fs,
            engine,
        }
    }

    /// Create `app_name` (or `.`) relative to the configured working directory
    pub async fn run(
        &self,
        app_name: &str,
        options: CreateOptions,
        config: &RuntimeConfig,
    ) -> Result<CreateOutcome> {
        let mut request = ProjectRequest::resolve(app_name, &config.cwd, options);

        let validation = validate_project_name(&request.name);
        if !validation.is_accepted() {
            return Err(Error::invalid_project_name(
                &request.name,
                validation.errors,
                validation.warnings,
            ));
        }
        for warning in &validation.warnings {
            debug!("Project name '{}': {}", request.name, warning);
        }

        let resolver = ConflictResolver::new(self.prompter, self.fs);
        let decision = resolver.resolve(&request).await?;
        if decision == ConflictDecision::Abort {
            info!("Creation of {} cancelled", request.name);
            return Ok(CreateOutcome::Aborted);
        }
        if decision == ConflictDecision::ProceedMerge {
            request.options.merge = true;
        }
        // `--force` on `.` removes the working directory the engine runs in
        if request.in_current && !self.fs.exists(&request.target_dir).await? {
            debug!("Recreating {}", request.target_dir);
            self.fs.create_dir_all(&request.target_dir).await?;
        }

        info!("Creating project {} in {}", request.name, request.target_dir);
        self.engine.generate(&request, config).await?;

        Ok(CreateOutcome::Created {
            request,
            decision,
            warnings: validation.warnings,
        })
    }
}
