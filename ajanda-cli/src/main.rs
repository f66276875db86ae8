mod commands;
mod context;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::event::EventArgs;
use crate::context::App;

#[derive(Parser)]
#[command(name = "ajanda")]
#[command(about = "Manage your events, meetings and notes from the terminal")]
struct Cli {
    /// Backend URL, overriding the configured one
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Create an account
    Register,
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Whoami,
    /// Reset a forgotten password with an emailed code
    ResetPassword,
    /// List event categories
    Categories,
    /// List events
    Events {
        /// Only this category (1-8)
        #[arg(short, long)]
        category: Option<i64>,

        /// Events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only events whose text contains this
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List meetings
    Meetings {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a month
    Calendar {
        #[arg(short, long)]
        year: Option<i32>,

        /// Month number, 1-12
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// Show the events of one day (YYYY-MM-DD or "today")
    Day { date: String },
    /// Show today's events
    Today,
    /// Add, edit or delete an event
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },
    /// Personal and meeting notes
    Note {
        #[command(subcommand)]
        command: NoteCommand,
    },
    /// Your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    Password {
        #[command(subcommand)]
        command: PasswordCommand,
    },
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
}

#[derive(Subcommand)]
enum EventCommand {
    Add(EventArgs),
    Edit {
        id: i64,

        #[command(flatten)]
        args: EventArgs,
    },
    Delete {
        id: i64,

        /// Skip the confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Notes attached to an event
    Notes { id: i64 },
}

#[derive(Subcommand)]
enum NoteCommand {
    List {
        #[arg(short, long)]
        search: Option<String>,

        /// Only notes of this event
        #[arg(long)]
        event: Option<i64>,
    },
    Add {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        /// Attach to this meeting
        #[arg(long)]
        event: Option<i64>,
    },
    Edit {
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },
    Delete {
        id: i64,

        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show {
        #[arg(short, long)]
        email: Option<String>,
    },
    Edit {
        /// Current email, used to look the profile up
        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        new_email: Option<String>,
    },
}

#[derive(Subcommand)]
enum PasswordCommand {
    Change {
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum AccountCommand {
    Delete {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut app = App::load(cli.api_url)?;

    let result = match cli.command {
        Commands::Login { email } => commands::auth::login(&mut app, email).await,
        Commands::Register => commands::auth::register(&app).await,
        Commands::Logout => commands::auth::logout(&mut app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::ResetPassword => commands::reset::run(&app).await,
        Commands::Categories => commands::categories::run(&app).await,
        Commands::Events {
            category,
            from,
            to,
            search,
        } => commands::events::run(&app, category, from, to, search).await,
        Commands::Meetings { search } => commands::events::meetings(&app, search).await,
        Commands::Calendar { year, month } => commands::calendar::month(&app, year, month).await,
        Commands::Day { date } => commands::calendar::day(&app, &date).await,
        Commands::Today => commands::events::today(&app).await,
        Commands::Event { command } => match command {
            EventCommand::Add(args) => commands::event::add(&app, args).await,
            EventCommand::Edit { id, args } => commands::event::edit(&app, id, args).await,
            EventCommand::Delete { id, force } => commands::event::delete(&app, id, force).await,
            EventCommand::Notes { id } => commands::notes::list(&app, None, Some(id)).await,
        },
        Commands::Note { command } => match command {
            NoteCommand::List { search, event } => commands::notes::list(&app, search, event).await,
            NoteCommand::Add {
                title,
                content,
                event,
            } => commands::notes::add(&app, title, content, event).await,
            NoteCommand::Edit { id, title, content } => {
                commands::notes::edit(&app, id, title, content).await
            }
            NoteCommand::Delete { id, force } => commands::notes::delete(&app, id, force).await,
        },
        Commands::Profile { command } => match command {
            ProfileCommand::Show { email } => commands::profile::show(&mut app, email).await,
            ProfileCommand::Edit {
                email,
                first_name,
                last_name,
                new_email,
            } => commands::profile::edit(&mut app, email, first_name, last_name, new_email).await,
        },
        Commands::Password { command } => match command {
            PasswordCommand::Change { email } => {
                commands::profile::change_password(&mut app, email).await
            }
        },
        Commands::Account { command } => match command {
            AccountCommand::Delete { email, force } => {
                commands::profile::delete_account(&mut app, email, force).await
            }
        },
    };

    log_failure(&result);
    result
}

/// Record a failed command, with its whole context chain, before anyhow
/// prints it.
fn log_failure(result: &Result<()>) {
    if let Err(e) = result {
        let message = format!("{e:#}");
        tracing::error!(error = %message, "command failed");
    }
}

/// Logs go to stderr so command output stays pipeable. `AJANDA_LOG` takes
/// the usual filter directives, e.g. `AJANDA_LOG=ajanda_core=debug`.
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("AJANDA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logged(result: &Result<()>) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || log_failure(result));

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn failed_commands_are_logged_with_their_context() {
        let result: Result<()> = Err(anyhow::anyhow!("There is already an event at this date and time"))
            .context("Saving event");

        let output = logged(&result);
        assert!(output.contains("ERROR"));
        assert!(output.contains("command failed"));
        assert!(output.contains("Saving event: There is already an event at this date and time"));
    }

    #[test]
    fn successful_commands_log_nothing() {
        assert_eq!(logged(&Ok(())), "");
    }
}
