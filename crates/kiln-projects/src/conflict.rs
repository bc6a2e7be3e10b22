//! Target directory conflict resolution
//!
//! Decides whether project generation may proceed when the target directory
//! already exists, prompting the user when neither `--force` nor `--merge`
//! settles it. Prompts and filesystem access are injected so the state
//! machine can be driven without a terminal.

use async_trait::async_trait;
use camino::Utf8Path;
use tracing::debug;

use crate::error::Result;
use crate::types::ProjectRequest;

/// Outcome of conflict resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Nothing was in the way
    ProceedClean,
    /// The existing directory was removed after the user chose to overwrite
    ProceedAfterDelete,
    /// Generate on top of the existing directory
    ProceedMerge,
    /// The user cancelled
    Abort,
}

/// Answer to the "target directory already exists" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAction {
    Overwrite,
    Merge,
    Cancel,
}

impl ConflictAction {
    /// Choices in the order they are offered
    pub fn all() -> &'static [Self] {
        &[Self::Overwrite, Self::Merge, Self::Cancel]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overwrite => "Overwrite",
            Self::Merge => "Merge",
            Self::Cancel => "Cancel",
        }
    }
}

/// Interactive questions asked while resolving a conflict
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Yes/no question
    async fn confirm(&self, message: &str) -> Result<bool>;

    /// Pick one of [`ConflictAction::all`]
    async fn choose_action(&self, message: &str) -> Result<ConflictAction>;

    /// Progress notice shown to the user
    fn notify(&self, _message: &str) {}
}

/// Filesystem operations the resolver needs
#[async_trait]
pub trait ProjectFs: Send + Sync {
    /// Whether `path` exists; errors when it cannot be inspected
    async fn exists(&self, path: &Utf8Path) -> std::io::Result<bool>;

    /// Remove `path` recursively
    async fn remove_all(&self, path: &Utf8Path) -> std::io::Result<()>;

    async fn create_dir_all(&self, path: &Utf8Path) -> std::io::Result<()>;
}

/// [`ProjectFs`] backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl ProjectFs for TokioFs {
    async fn exists(&self, path: &Utf8Path) -> std::io::Result<bool> {
        tokio::fs::try_exists(path).await
    }

    async fn remove_all(&self, path: &Utf8Path) -> std::io::Result<()> {
        let metadata = tokio::fs::symlink_metadata(path).await?;
        if metadata.is_dir() {
            tokio::fs::remove_dir_all(path).await
        } else {
            tokio::fs::remove_file(path).await
        }
    }

    async fn create_dir_all(&self, path: &Utf8Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }
}

/// Message for the in-current confirmation
pub const CONFIRM_CURRENT_DIR: &str = "Generate project in current directory?";

/// Resolves target directory conflicts for one request
pub struct ConflictResolver<'a> {
    prompter: &'a dyn Prompter,
    fs: &'a dyn ProjectFs,
}

impl<'a> ConflictResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter, fs: &'a dyn ProjectFs) -> Self {
        Self { prompter, fs }
    }

    /// Run the state machine for `request`
    pub async fn resolve(&self, request: &ProjectRequest) -> Result<ConflictDecision> {
        let target = &request.target_dir;
        let options = &request.options;

        if !self.fs.exists(target).await? {
            debug!("Target {} is free", target);
            return Ok(ConflictDecision::ProceedClean);
        }

        if options.merge {
            debug!("Target {} exists, merging (--merge)", target);
            return Ok(ConflictDecision::ProceedMerge);
        }

        if options.force {
            debug!("Target {} exists, removing (--force)", target);
            self.fs.remove_all(target).await?;
            return Ok(ConflictDecision::ProceedClean);
        }

        if request.in_current {
            let ok = self.prompter.confirm(CONFIRM_CURRENT_DIR).await?;
            debug!("Generate in current directory confirmed: {}", ok);
            return Ok(if ok {
                ConflictDecision::ProceedClean
            } else {
                ConflictDecision::Abort
            });
        }

        let message = format!("Target directory {} already exists. Pick an action:", target);
        let action = self.prompter.choose_action(&message).await?;
        debug!("Conflict action for {}: {:?}", target, action);

        match action {
            ConflictAction::Overwrite => {
                self.prompter.notify(&format!("\nRemoving {}...", target));
                self.fs.remove_all(target).await?;
                Ok(ConflictDecision::ProceedAfterDelete)
            }
            ConflictAction::Merge => Ok(ConflictDecision::ProceedMerge),
            ConflictAction::Cancel => Ok(ConflictDecision::Abort),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CreateOptions;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Answers prompts from a fixed script and records what was asked
    #[derive(Default)]
    struct ScriptedPrompter {
        confirm: Option<bool>,
        action: Option<ConflictAction>,
        asked: Mutex<Vec<String>>,
        notices: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Prompter for ScriptedPrompter {
        async fn confirm(&self, message: &str) -> Result<bool> {
            self.asked.lock().unwrap().push(message.to_string());
            Ok(self.confirm.expect("unexpected confirm prompt"))
        }

        async fn choose_action(&self, message: &str) -> Result<ConflictAction> {
            self.asked.lock().unwrap().push(message.to_string());
            Ok(self.action.expect("unexpected action prompt"))
        }

        fn notify(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }
    }

    fn request(dir: &Utf8Path, name: &str, options: CreateOptions) -> ProjectRequest {
        ProjectRequest::resolve(name, dir, options)
    }

    fn fixture() -> (TempDir, camino::Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8Path::from_path(temp_dir.path()).unwrap().to_path_buf();
        (temp_dir, root)
    }

    #[tokio::test]
    async fn test_absent_target_proceeds_without_prompt() {
        let (_guard, root) = fixture();
        let prompter = ScriptedPrompter::default();
        let resolver = ConflictResolver::new(&prompter, &TokioFs);

        let decision = resolver
            .resolve(&request(&root, "my-app", CreateOptions::default()))
            .await
            .unwrap();

        assert_eq!(decision, ConflictDecision::ProceedClean);
        assert!(prompter.asked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_merge_leaves_directory_untouched() {
        let (_guard, root) = fixture();
        let target = root.join("my-app");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "x").unwrap();

        let prompter = ScriptedPrompter::default();
        let resolver = ConflictResolver::new(&prompter, &TokioFs);
        let options = CreateOptions {
            merge: true,
            force: true,
            ..Default::default()
        };

        let decision = resolver
            .resolve(&request(&root, "my-app", options))
            .await
            .unwrap();

        assert_eq!(decision, ConflictDecision::ProceedMerge);
        assert!(target.join("keep.txt").exists());
        assert!(prompter.asked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_force_removes_without_prompt() {
        let (_guard, root) = fixture();
        let target = root.join("my-app");
        std::fs::create_dir_all(target.join("src")).unwrap();

        let prompter = ScriptedPrompter::default();
        let resolver = ConflictResolver::new(&prompter, &TokioFs);
        let options = CreateOptions {
            force: true,
            ..Default::default()
        };

        let decision = resolver
            .resolve(&request(&root, "my-app", options))
            .await
            .unwrap();

        assert_eq!(decision, ConflictDecision::ProceedClean);
        assert!(!target.exists());
        assert!(prompter.asked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_current_directory_declined() {
        let (_guard, root) = fixture();
        let prompter = ScriptedPrompter {
            confirm: Some(false),
            ..Default::default()
        };
        let resolver = ConflictResolver::new(&prompter, &TokioFs);

        let decision = resolver
            .resolve(&request(&root, ".", CreateOptions::default()))
            .await
            .unwrap();

        assert_eq!(decision, ConflictDecision::Abort);
        assert_eq!(*prompter.asked.lock().unwrap(), vec![CONFIRM_CURRENT_DIR]);
        assert!(root.exists());
    }

    #[tokio::test]
    async fn test_current_directory_confirmed() {
        let (_guard, root) = fixture();
        let prompter = ScriptedPrompter {
            confirm: Some(true),
            ..Default::default()
        };
        let resolver = ConflictResolver::new(&prompter, &TokioFs);

        let decision = resolver
            .resolve(&request(&root, ".", CreateOptions::default()))
            .await
            .unwrap();
        assert_eq!(decision, ConflictDecision::ProceedClean);
    }

    #[tokio::test]
    async fn test_overwrite_removes_and_notifies() {
        let (_guard, root) = fixture();
        let target = root.join("my-app");
        std::fs::create_dir_all(&target).unwrap();

        let prompter = ScriptedPrompter {
            action: Some(ConflictAction::Overwrite),
            ..Default::default()
        };
        let resolver = ConflictResolver::new(&prompter, &TokioFs);

        let decision = resolver
            .resolve(&request(&root, "my-app", CreateOptions::default()))
            .await
            .unwrap();

        assert_eq!(decision, ConflictDecision::ProceedAfterDelete);
        assert!(!target.exists());

        let asked = prompter.asked.lock().unwrap();
        assert_eq!(
            asked[0],
            format!("Target directory {} already exists. Pick an action:", target)
        );
        let notices = prompter.notices.lock().unwrap();
        assert_eq!(notices[0], format!("\nRemoving {}...", target));
    }

    #[tokio::test]
    async fn test_merge_and_cancel_choices() {
        let (_guard, root) = fixture();
        std::fs::create_dir_all(root.join("my-app")).unwrap();

        for (action, expected) in [
            (ConflictAction::Merge, ConflictDecision::ProceedMerge),
            (ConflictAction::Cancel, ConflictDecision::Abort),
        ] {
            let prompter = ScriptedPrompter {
                action: Some(action),
                ..Default::default()
            };
            let resolver = ConflictResolver::new(&prompter, &TokioFs);
            let decision = resolver
                .resolve(&request(&root, "my-app", CreateOptions::default()))
                .await
                .unwrap();

            assert_eq!(decision, expected);
            assert!(root.join("my-app").exists());
        }
    }

    #[tokio::test]
    async fn test_remove_all_handles_files() {
        let (_guard, root) = fixture();
        let file = root.join("my-app");
        std::fs::write(&file, "not a directory").unwrap();

        TokioFs.remove_all(&file).await.unwrap();
        assert!(!TokioFs.exists(&file).await.unwrap());
    }

    /// Filesystem whose stat calls fail, like a parent without search permission
    struct UnreadableFs;

    #[async_trait]
    impl ProjectFs for UnreadableFs {
        async fn exists(&self, _path: &Utf8Path) -> std::io::Result<bool> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            ))
        }

        async fn remove_all(&self, path: &Utf8Path) -> std::io::Result<()> {
            panic!("unexpected removal of {path}");
        }

        async fn create_dir_all(&self, path: &Utf8Path) -> std::io::Result<()> {
            panic!("unexpected mkdir of {path}");
        }
    }

    #[tokio::test]
    async fn test_uninspectable_target_is_an_error() {
        let (_guard, root) = fixture();
        let prompter = ScriptedPrompter::default();
        let resolver = ConflictResolver::new(&prompter, &UnreadableFs);
        let options = CreateOptions {
            force: true,
            ..Default::default()
        };

        let err = resolver
            .resolve(&request(&root, "my-app", options))
            .await
            .unwrap_err();

        match err {
            crate::Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("unexpected error: {other}"),
        }
        assert!(prompter.asked.lock().unwrap().is_empty());
    }
}
