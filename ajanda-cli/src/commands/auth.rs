use anyhow::Result;
use owo_colors::OwoColorize;

use ajanda_core::NewUser;

use super::create_spinner;
use crate::context::App;
use crate::render::Render;
use crate::utils::tui::{prompt_password, prompt_text};

pub async fn login(app: &mut App, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    let password = prompt_password("Password")?;

    let spinner = create_spinner("Logging in".into());
    let result = app.sessions.login(&app.api, &email, &password).await;
    spinner.finish_and_clear();

    let auth = result?;
    match &auth.user {
        Some(user) => println!("{}", format!("Logged in as {}", user.full_name()).green()),
        None => println!("{}", "Logged in".green()),
    }

    Ok(())
}

pub async fn register(app: &App) -> Result<()> {
    let first_name = prompt_text("First name")?;
    let last_name = prompt_text("Last name")?;
    let email = prompt_text("Email")?;
    let password = prompt_password("Password")?;
    let repeated = prompt_password("Repeat password")?;

    if password != repeated {
        anyhow::bail!("Passwords do not match");
    }

    let spinner = create_spinner("Creating account".into());
    let result = app
        .sessions
        .register(
            &app.api,
            NewUser {
                first_name,
                last_name,
                email,
                password,
            },
        )
        .await;
    spinner.finish_and_clear();

    let user = result?;
    println!("{}", format!("Created account for {}", user.render()).green());
    println!("\nLog in with:\n  ajanda login");

    Ok(())
}

pub fn logout(app: &mut App) -> Result<()> {
    if !app.session().is_authenticated() {
        println!("{}", "Not logged in".dimmed());
        return Ok(());
    }

    app.sessions.logout()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let session = app.session();
    if !session.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    match session.user() {
        Some(user) => println!("{}", user.render()),
        None => println!("Logged in"),
    }
    println!(
        "{}",
        format!("   session: {}", app.sessions.store().path().display()).dimmed()
    );
    println!(
        "{}",
        format!("   backend: {}", app.api.base_url()).dimmed()
    );

    Ok(())
}
