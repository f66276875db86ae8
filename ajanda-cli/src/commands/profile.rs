use anyhow::Result;
use owo_colors::OwoColorize;

use ajanda_core::api::{ChangePassword, DeleteAccount, EditUser};
use ajanda_core::viewmodel::Detail;
use ajanda_core::{AjandaError, ProfileUpdate, User, ValidationError};

use super::create_spinner;
use crate::context::App;
use crate::render::Render;
use crate::utils::tui::{confirm, prompt_optional, prompt_password};

pub async fn show(app: &mut App, email: Option<String>) -> Result<()> {
    let user = app.fetch_user(email).await?;
    println!("{}", user.render());
    Ok(())
}

pub async fn edit(
    app: &mut App,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    new_email: Option<String>,
) -> Result<()> {
    let user = app.fetch_user(email).await?;
    let user_id = require_id(&user)?;
    let interactive = first_name.is_none() && last_name.is_none() && new_email.is_none();

    let mut detail: Detail<User, ProfileUpdate> = Detail::new(user);
    let draft = detail.begin_edit();
    if interactive {
        draft.first_name = prompt_optional("First name", &draft.first_name)?;
        draft.last_name = prompt_optional("Last name", &draft.last_name)?;
        draft.email = prompt_optional("Email", &draft.email)?;
    } else {
        if let Some(first_name) = first_name {
            draft.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            draft.last_name = last_name;
        }
        if let Some(new_email) = new_email {
            draft.email = new_email;
        }
    }

    let api = &app.api;
    let session = app.sessions.current();

    let spinner = create_spinner("Saving profile".into());
    let result = detail
        .save(|update| async move {
            if update.email.trim().is_empty() {
                return Err(ValidationError::MissingEmail.into());
            }
            api.call(
                session,
                EditUser {
                    user_id,
                    update: update.clone(),
                },
            )
            .await?;
            Ok::<_, AjandaError>(User {
                user_id: Some(user_id),
                first_name: update.first_name,
                last_name: update.last_name,
                email: Some(update.email),
            })
        })
        .await;
    spinner.finish_and_clear();

    let saved = result?.clone();
    println!("{}", format!("  Saved: {}", saved.render()).green());
    app.sessions.set_user(saved);

    Ok(())
}

pub async fn change_password(app: &mut App, email: Option<String>) -> Result<()> {
    let user = app.fetch_user(email).await?;
    let user_id = require_id(&user)?;

    let current_password = prompt_password("Current password")?;
    let new_password = prompt_password("New password")?;
    let repeated = prompt_password("Repeat new password")?;

    if new_password.is_empty() {
        return Err(ValidationError::MissingPassword.into());
    }
    if new_password != repeated {
        anyhow::bail!("Passwords do not match");
    }

    let spinner = create_spinner("Changing password".into());
    let result = app
        .api
        .call(
            app.sessions.current(),
            ChangePassword {
                user_id,
                current_password,
                new_password,
            },
        )
        .await;
    spinner.finish_and_clear();
    result?;

    println!("{}", "  Password changed".green());
    Ok(())
}

pub async fn delete_account(app: &mut App, email: Option<String>, force: bool) -> Result<()> {
    let user = app.fetch_user(email).await?;
    let user_id = require_id(&user)?;

    println!("{}", user.render());
    if !force {
        println!();
        let confirmed = confirm(
            "Delete this account and all of its events and notes? This cannot be undone".into(),
        )?;
        if !confirmed {
            return Ok(());
        }
    }

    let spinner = create_spinner("Deleting account".into());
    let result = app
        .api
        .call(app.sessions.current(), DeleteAccount { user_id })
        .await;
    spinner.finish_and_clear();
    result?;

    app.sessions.logout()?;
    println!("{}", "  Account deleted".red());
    Ok(())
}

fn require_id(user: &User) -> Result<i64> {
    user.user_id
        .ok_or_else(|| anyhow::anyhow!("The backend did not return an id for {}", user.full_name()))
}
