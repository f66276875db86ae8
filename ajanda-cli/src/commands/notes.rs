use anyhow::Result;
use dialoguer::Select;
use owo_colors::OwoColorize;

use ajanda_core::api::{AddNote, DeleteNote, EditNote};
use ajanda_core::form::validate_note;
use ajanda_core::viewmodel::{Detail, EventListModel, NoteListModel};
use ajanda_core::{AjandaError, EventId, Note, NotePayload};

use super::create_spinner;
use crate::context::App;
use crate::render::Render;
use crate::utils::tui::{confirm, prompt_optional, prompt_text};

pub async fn list(app: &App, search: Option<String>, event: Option<EventId>) -> Result<()> {
    let session = app.require_login()?;

    let mut model = match event {
        Some(event_id) => NoteListModel::for_event(event_id),
        None => NoteListModel::new(),
    };
    model.apply_search(search.unwrap_or_default());

    let spinner = create_spinner("Fetching notes".into());
    let result = model.load(&app.api, session).await;
    spinner.finish_and_clear();
    result?;

    if event.is_some() {
        print_notes(&model.visible());
        return Ok(());
    }

    println!("{}", "Personal".bold());
    print_notes(&model.personal());
    println!();
    println!("{}", "Meeting notes".bold());
    print_notes(&model.meeting());

    Ok(())
}

fn print_notes(notes: &[&Note]) {
    if notes.is_empty() {
        println!("{}", "   No notes".dimmed());
    }
    for note in notes {
        println!("   {}", note.render());
    }
}

pub async fn add(
    app: &App,
    title: Option<String>,
    content: Option<String>,
    event: Option<EventId>,
) -> Result<()> {
    let session = app.require_login()?;
    let interactive = title.is_none();

    let title = match title {
        Some(title) => title,
        None => prompt_text("Title")?,
    };
    let content = match content {
        Some(content) => content,
        None if interactive => prompt_optional("Content (skip)", "")?,
        None => String::new(),
    };
    let event_id = match event {
        Some(id) => Some(id),
        None if interactive => pick_meeting(app).await?,
        None => None,
    };

    let note = NotePayload {
        title: title.trim().to_string(),
        content,
        event_id,
    };
    validate_note(&note)?;

    let spinner = create_spinner("Saving note".into());
    let result = app.api.call(session, AddNote(note.clone())).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", format!("  Created: {}", note.title).green());
    Ok(())
}

/// Personal, or one of the user's meetings.
async fn pick_meeting(app: &App) -> Result<Option<EventId>> {
    let mut meetings = EventListModel::meetings();

    let spinner = create_spinner("Fetching meetings".into());
    let result = meetings.load(&app.api, app.session()).await;
    spinner.finish_and_clear();
    result?;

    if meetings.events().is_empty() {
        return Ok(None);
    }

    let mut items = vec!["Personal note".to_string()];
    items.extend(
        meetings
            .events()
            .iter()
            .map(|e| format!("{} {} {}", e.display_date(), e.display_time(), e.title)),
    );

    let selection = Select::new()
        .with_prompt("  Attach to")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selection
        .checked_sub(1)
        .map(|i| meetings.events()[i].event_id))
}

pub async fn edit(
    app: &App,
    note_id: i64,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let session = app.require_login()?;
    let note = find_note(app, note_id).await?;
    let interactive = title.is_none() && content.is_none();

    let mut detail: Detail<Note, NotePayload> = Detail::new(note);
    let draft = detail.begin_edit();
    match title {
        Some(title) => draft.title = title,
        None if interactive => draft.title = prompt_optional("Title", &draft.title)?,
        None => {}
    }
    match content {
        Some(content) => draft.content = content,
        None if interactive => draft.content = prompt_optional("Content", &draft.content)?,
        None => {}
    }

    let api = &app.api;
    let original = detail.current().clone();

    let spinner = create_spinner("Saving note".into());
    let result = detail
        .save(|draft| async move {
            validate_note(&draft)?;
            api.call(
                session,
                EditNote {
                    note_id,
                    note: draft.clone(),
                },
            )
            .await?;
            Ok::<_, AjandaError>(Note {
                title: draft.title,
                content: draft.content,
                ..original
            })
        })
        .await;
    spinner.finish_and_clear();

    let saved = result?;
    println!("{}", format!("  Saved: {}", saved.title).green());
    Ok(())
}

pub async fn delete(app: &App, note_id: i64, force: bool) -> Result<()> {
    let session = app.require_login()?;
    let note = find_note(app, note_id).await?;

    println!("   {}", note.render());

    if !force {
        println!();
        if !confirm(format!("Delete '{}'?", note.title))? {
            return Ok(());
        }
    }

    let spinner = create_spinner("Deleting note".into());
    let result = app.api.call(session, DeleteNote { note_id }).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", format!("  Deleted: {}", note.title).red());
    Ok(())
}

async fn find_note(app: &App, note_id: i64) -> Result<Note> {
    let mut model = NoteListModel::new();

    let spinner = create_spinner("Fetching note".into());
    let result = model.load(&app.api, app.session()).await;
    spinner.finish_and_clear();
    result?;

    model
        .find(note_id)
        .cloned()
        .ok_or_else(|| AjandaError::NotFound(format!("note #{note_id}")).into())
}
