//! Interactive prompts on the terminal

use async_trait::async_trait;
use console::style;
use dialoguer::{Confirm, Select};
use kiln_projects::{ConflictAction, Prompter};

/// [`Prompter`] backed by dialoguer
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

fn to_io(err: impl std::error::Error + Send + Sync + 'static) -> kiln_projects::Error {
    kiln_projects::Error::Io(std::io::Error::other(err))
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn confirm(&self, message: &str) -> kiln_projects::Result<bool> {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(message)
                .default(true)
                .interact()
                .map_err(to_io)
        })
        .await
        .map_err(to_io)?
    }

    async fn choose_action(&self, message: &str) -> kiln_projects::Result<ConflictAction> {
        let message = message.to_string();
        let choices = ConflictAction::all();
        let labels: Vec<&str> = choices.iter().map(ConflictAction::label).collect();

        let selection = tokio::task::spawn_blocking(move || {
            Select::new()
                .with_prompt(message)
                .items(&labels)
                .default(0)
                .interact()
                .map_err(to_io)
        })
        .await
        .map_err(to_io)??;

        Ok(choices[selection])
    }

    fn notify(&self, message: &str) {
        println!("{}", style(message).cyan());
    }
}
