//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print a shell command the user should run
pub fn command(cmd: &str) {
    println!(" {} {}", style("$").dim(), style(cmd).cyan());
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Report a failure that reached the top of the program
pub fn report(err: &anyhow::Error) {
    if let Some(kiln_projects::Error::InvalidProjectName {
        name,
        errors,
        warnings,
    }) = err.downcast_ref::<kiln_projects::Error>()
    {
        error(&style(format!("Invalid project name: \"{}\"", name)).red().to_string());
        for e in errors {
            eprintln!("  {}", style(format!("Error: {}", e)).red().dim());
        }
        for w in warnings {
            eprintln!("  {}", style(format!("Warning: {}", w)).red().dim());
        }
        return;
    }

    error(&format!("{:#}", err));
}
