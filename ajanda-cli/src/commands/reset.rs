use anyhow::Result;
use owo_colors::OwoColorize;

use ajanda_core::viewmodel::{ResetFlow, ResetStep};

use super::create_spinner;
use crate::context::App;
use crate::utils::tui::{prompt_optional, prompt_password};

/// Walk through the reset wizard. An empty answer goes back a step; on the
/// first step it cancels.
pub async fn run(app: &App) -> Result<()> {
    let mut flow = ResetFlow::new();

    loop {
        let input = match flow.step() {
            ResetStep::RequestCode => prompt_optional("Email", "")?,
            ResetStep::VerifyCode { email } => {
                println!("{}", format!("  A reset code was sent to {email}").dimmed());
                prompt_optional("Code", "")?
            }
            ResetStep::NewPassword { .. } => prompt_password("New password")?,
            ResetStep::Done => break,
        };

        if input.trim().is_empty() {
            if flow.back() {
                continue;
            }
            println!("Cancelled");
            return Ok(());
        }

        let spinner = create_spinner("Sending".into());
        let result = flow.advance(&app.api, &input).await.map(|_| ());
        spinner.finish_and_clear();

        // Stay on the same step and ask again
        if let Err(e) = result {
            eprintln!("  {}", e.to_string().red());
        }
    }

    println!("{}", "Password changed. Log in with: ajanda login".green());
    Ok(())
}
