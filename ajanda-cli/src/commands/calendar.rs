use anyhow::Result;
use chrono::{Datelike, Local};
use owo_colors::OwoColorize;

use ajanda_core::calendar::MonthCursor;
use ajanda_core::viewmodel::CalendarModel;

use super::{create_spinner, parse_date_arg};
use crate::context::App;
use crate::render::{Render, render_event_list, render_month};

pub async fn month(app: &App, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let today = Local::now().date_naive();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());

    let Some(cursor) = month.checked_sub(1).and_then(|m0| MonthCursor::new(year, m0)) else {
        anyhow::bail!("Invalid month {month}. Expected 1-12");
    };

    let mut model = load(app, cursor).await?;

    println!("{}", render_month(model.month(), &model.cells(today)));
    println!();
    let events: Vec<_> = model.events().iter().collect();
    println!("{}", render_event_list(&events));

    model.close();
    Ok(())
}

/// One day, taken from its month's events.
pub async fn day(app: &App, date: &str) -> Result<()> {
    let date = parse_date_arg(date)?;
    let model = load(app, MonthCursor::containing(date)).await?;

    let Some(day) = model.select_day(date.day()) else {
        anyhow::bail!("{date} is not in {}", model.month().first_day().format("%B %Y"));
    };

    println!("{}", date.format("%A, %d.%m.%Y").to_string().bold());
    if day.events.is_empty() {
        println!("{}", "   No events".dimmed());
    }
    for event in &day.events {
        println!("   {}", event.render());
    }

    Ok(())
}

async fn load(app: &App, cursor: MonthCursor) -> Result<CalendarModel> {
    let session = app.require_login()?;
    let mut model = CalendarModel::new(cursor);

    let spinner = create_spinner(cursor.first_day().format("%B %Y").to_string());
    let result = model.load(&app.api, session).await;
    spinner.finish_and_clear();
    result?;

    Ok(model)
}
