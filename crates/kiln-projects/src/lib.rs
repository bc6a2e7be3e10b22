//! # kiln-projects
//!
//! Project bootstrap library for the kiln CLI providing:
//! - Project name validation
//! - Target directory conflict resolution
//! - The generator engine contract and its process-backed implementation
//! - The `create` workflow tying them together
//!
//! # Examples
//!
//! ```no_run
//! use kiln_core::RuntimeConfig;
//! use kiln_projects::{CreateOptions, CreateOutcome, CreateWorkflow, ProcessEngine, TokioFs};
//! # use kiln_projects::{ConflictAction, Prompter};
//! # struct Yes;
//! # #[async_trait::async_trait]
//! # impl Prompter for Yes {
//! #     async fn confirm(&self, _: &str) -> kiln_projects::Result<bool> { Ok(true) }
//! #     async fn choose_action(&self, _: &str) -> kiln_projects::Result<ConflictAction> {
//! #         Ok(ConflictAction::Merge)
//! #     }
//! # }
//!
//! # async fn example(config: RuntimeConfig) -> kiln_projects::Result<()> {
//! let engine = ProcessEngine::from_config(&config.config.generator);
//! let workflow = CreateWorkflow::new(&Yes, &TokioFs, &engine);
//!
//! match workflow.run("my-app", CreateOptions::default(), &config).await? {
//!     CreateOutcome::Created { request, .. } => println!("created {}", request.target_dir),
//!     CreateOutcome::Aborted => println!("cancelled"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod conflict;
pub mod create;
pub mod engine;
pub mod error;
pub mod types;
pub mod validation;

pub use conflict::{ConflictAction, ConflictDecision, ConflictResolver, ProjectFs, Prompter, TokioFs};
pub use create::{CreateOutcome, CreateWorkflow};
pub use engine::{GeneratorEngine, ProcessEngine};
pub use error::{Error, GenerationError, Result};
pub use types::{CreateOptions, GitMode, PackageManager, PresetSource, ProjectRequest};
pub use validation::{validate_project_name, ValidationResult};
