use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use ajanda_core::CategoryKind;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner().tick_strings(&["-", "\\", "|", "/"]);
    spinner.set_style(style.clone().template("{msg} {spinner}").unwrap_or(style));
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Required text input.
pub fn prompt_text(label: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(format!("  {label}"))
        .interact_text()?)
}

/// Text input that may be left empty, pre-filled with `current`.
pub fn prompt_optional(label: &str, current: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(format!("  {label}"))
        .default(current.to_string())
        .show_default(!current.is_empty())
        .allow_empty(true)
        .interact_text()?)
}

/// Prompt the user for password input (hidden).
pub fn prompt_password(label: &str) -> Result<String> {
    let prompt = format!("  {label}: ");
    rpassword::prompt_password(&prompt).context("Failed to read password")
}

pub fn confirm(prompt: String) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

pub fn select_category(current: Option<CategoryKind>) -> Result<CategoryKind> {
    let labels: Vec<&str> = CategoryKind::ALL.iter().map(|k| k.label()).collect();
    let default = current
        .and_then(|c| CategoryKind::ALL.iter().position(|k| *k == c))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("  Category")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(CategoryKind::ALL[index])
}
