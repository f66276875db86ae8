use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use owo_colors::OwoColorize;

use ajanda_core::api::{AddEvent, DeleteEvent, EditEvent, SearchEvents};
use ajanda_core::form::EventForm;
use ajanda_core::viewmodel::{Detail, EventListModel};
use ajanda_core::{AjandaError, CategoryKind, Event, OptionalField};

use super::{create_spinner, parse_date_arg};
use crate::context::App;
use crate::render::render_event_detail;
use crate::utils::tui::{confirm, prompt_optional, select_category};

#[derive(Args, Debug, Default)]
pub struct EventArgs {
    /// Category id (1-8)
    #[arg(short, long)]
    pub category: Option<i64>,

    #[arg(short, long)]
    pub title: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Only kept for categories that have a location
    #[arg(long)]
    pub location: Option<String>,

    /// Only kept for categories that have a participant
    #[arg(long)]
    pub participant: Option<String>,

    #[arg(long)]
    pub content: Option<String>,
}

impl EventArgs {
    fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.title.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.participant.is_none()
            && self.content.is_none()
    }
}

pub async fn add(app: &App, args: EventArgs) -> Result<()> {
    let session = app.require_login()?;
    let interactive = args.category.is_none() || args.title.is_none() || args.date.is_none();

    let mut form = EventForm::default();
    fill(&mut form, args, interactive)?;

    let date = form.validate()?.date;
    let existing = events_on(app, date).await?;
    let payload = form.prepare(&existing, None)?;

    let spinner = create_spinner("Saving event".into());
    let result = app.api.call(session, AddEvent(payload.clone())).await;
    spinner.finish_and_clear();
    result?;

    if interactive {
        println!();
    }
    println!(
        "{}",
        format!(
            "  Created: {} on {} at {}",
            payload.title,
            payload.date.format("%d.%m.%Y"),
            payload.time.format("%H:%M")
        )
        .green()
    );

    Ok(())
}

pub async fn edit(app: &App, event_id: i64, args: EventArgs) -> Result<()> {
    let session = app.require_login()?;
    let event = find_event(app, event_id).await?;
    let interactive = args.is_empty();

    println!("{}\n", render_event_detail(&event));

    let mut detail: Detail<Event, EventForm> = Detail::new(event);
    fill(detail.begin_edit(), args, interactive)?;

    let existing = match detail.draft().and_then(|form| form.date) {
        Some(date) => events_on(app, date).await?,
        None => Vec::new(),
    };

    let api = &app.api;
    let original = detail.current().clone();

    let spinner = create_spinner("Saving event".into());
    let result = detail
        .save(|form| async move {
            let payload = form.prepare(&existing, Some(event_id))?;
            api.call(
                session,
                EditEvent {
                    event_id,
                    event: payload.clone(),
                },
            )
            .await?;
            Ok::<_, AjandaError>(original.updated_with(payload))
        })
        .await;
    spinner.finish_and_clear();

    let saved = result?;
    println!("\n{}", render_event_detail(saved));
    println!("{}", "  Saved".green());

    Ok(())
}

pub async fn delete(app: &App, event_id: i64, force: bool) -> Result<()> {
    let session = app.require_login()?;
    let event = find_event(app, event_id).await?;

    println!("{}", render_event_detail(&event));

    if !force {
        println!();
        if !confirm(format!("Delete '{}'?", event.title))? {
            return Ok(());
        }
    }

    let spinner = create_spinner("Deleting event".into());
    let result = app.api.call(session, DeleteEvent { event_id }).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", format!("  Deleted: {}", event.title).red());
    Ok(())
}

/// Copy the given flags into the form, prompting for the rest when
/// interactive. Optional fields are only asked for when the chosen category
/// has them.
fn fill(form: &mut EventForm, args: EventArgs, interactive: bool) -> Result<()> {
    if let Some(id) = args.category {
        form.category = Some(CategoryKind::try_from(id)?);
    } else if interactive {
        form.category = Some(select_category(form.category)?);
    }

    if let Some(title) = args.title {
        form.title = title;
    } else if interactive {
        form.title = prompt_optional("Title", &form.title)?;
    }

    if let Some(date) = args.date {
        form.date = Some(parse_date_arg(&date)?);
    } else if interactive {
        form.date = Some(prompt_date(form.date)?);
    }

    if let Some(time) = args.time {
        form.time = time;
    } else if interactive {
        form.time = prompt_optional("Time (HH:MM)", &form.time)?;
    }

    if let Some(location) = args.location {
        form.location = location;
    } else if interactive && form.fields().contains(OptionalField::Location) {
        form.location = prompt_optional("Location (skip)", &form.location)?;
    }

    if let Some(participant) = args.participant {
        form.participant = participant;
    } else if interactive && form.fields().contains(OptionalField::Participant) {
        form.participant = prompt_optional("Participant (skip)", &form.participant)?;
    }

    if let Some(content) = args.content {
        form.content = content;
    } else if interactive {
        form.content = prompt_optional("Content (skip)", &form.content)?;
    }

    Ok(())
}

/// Prompt for a date until one parses.
fn prompt_date(current: Option<NaiveDate>) -> Result<NaiveDate> {
    let current = current.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    loop {
        let input = prompt_optional("Date (YYYY-MM-DD)", &current)?;
        match parse_date_arg(&input) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Events already booked on `date`, for the slot check.
async fn events_on(app: &App, date: NaiveDate) -> Result<Vec<Event>> {
    let query = SearchEvents {
        category: None,
        start_date: Some(date),
        end_date: Some(date),
    };
    Ok(app.api.call(app.session(), query).await?)
}

/// There is no single-event endpoint; look the id up in the full list.
async fn find_event(app: &App, event_id: i64) -> Result<Event> {
    let mut model = EventListModel::new();

    let spinner = create_spinner("Fetching event".into());
    let result = model.load(&app.api, app.session()).await;
    spinner.finish_and_clear();
    result?;

    model
        .find(event_id)
        .cloned()
        .ok_or_else(|| AjandaError::NotFound(format!("event #{event_id}")).into())
}
