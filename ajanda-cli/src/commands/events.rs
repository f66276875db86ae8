use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use ajanda_core::CategoryKind;
use ajanda_core::calendar::day_events;
use ajanda_core::viewmodel::{EventFilters, EventListModel};

use super::{create_spinner, parse_optional_date};
use crate::context::App;
use crate::render::{Render, render_event_list};

pub async fn run(
    app: &App,
    category: Option<i64>,
    from: Option<String>,
    to: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let filters = EventFilters {
        category: category.map(CategoryKind::try_from).transpose()?,
        start_date: parse_optional_date(from.as_deref())?,
        end_date: parse_optional_date(to.as_deref())?,
        search: search.unwrap_or_default(),
    };

    let mut model = EventListModel::new();
    model.apply_filters(filters);
    show(app, &mut model, "Fetching events").await
}

pub async fn meetings(app: &App, search: Option<String>) -> Result<()> {
    let mut model = EventListModel::meetings();
    model.apply_filters(EventFilters {
        search: search.unwrap_or_default(),
        ..EventFilters::default()
    });
    show(app, &mut model, "Fetching meetings").await
}

async fn show(app: &App, model: &mut EventListModel, message: &str) -> Result<()> {
    let session = app.require_login()?;

    let spinner = create_spinner(message.to_string());
    let result = model.load(&app.api, session).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", render_event_list(&model.visible()));
    model.close();
    Ok(())
}

/// The home screen: today's events by time.
pub async fn today(app: &App) -> Result<()> {
    let session = app.require_login()?;
    let today = Local::now().date_naive();

    let mut model = EventListModel::new();
    model.apply_filters(EventFilters {
        start_date: Some(today),
        end_date: Some(today),
        ..EventFilters::default()
    });

    let spinner = create_spinner("Fetching today's events".into());
    let result = model.load(&app.api, session).await;
    spinner.finish_and_clear();
    result?;

    let events = day_events(today, model.events());
    println!("{}", today.format("%A, %d.%m.%Y").to_string().bold());
    if events.is_empty() {
        println!("{}", "   Nothing planned today".dimmed());
    }
    for event in &events {
        println!("   {}", event.render());
    }

    Ok(())
}
