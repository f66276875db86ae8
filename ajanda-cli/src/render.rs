//! TUI rendering traits for ajanda types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to ajanda-core types using owo_colors.

use ajanda_core::calendar::{Cell, MonthCursor};
use ajanda_core::{Category, CategoryKind, Event, Note, OptionalField, User};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

fn category_label(id: i64) -> String {
    CategoryKind::try_from(id)
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|_| format!("Category {id}"))
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!(
            "{} {} {}",
            self.display_time().dimmed(),
            self.title,
            format!("[{}]", category_label(self.category_id)).cyan()
        );

        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@ {location}").dimmed()));
        }
        if let Some(participant) = &self.participant {
            line.push_str(&format!(" {}", format!("with {participant}").dimmed()));
        }

        format!("{} {}", line, format!("#{}", self.event_id).dimmed())
    }
}

impl Render for Category {
    fn render(&self) -> String {
        let fields: Vec<&str> = self
            .kind()
            .map(|kind| kind.fields().iter().map(OptionalField::label).collect())
            .unwrap_or_default();

        let extra = if fields.is_empty() {
            String::new()
        } else {
            format!(" ({})", fields.join(", ").to_lowercase())
        };

        format!("{:>2} {}{}", self.category_id, self.category_name, extra.dimmed())
    }
}

/// Longest content preview shown in note lists
const PREVIEW_CHARS: usize = 60;

impl Render for Note {
    fn render(&self) -> String {
        let preview: String = self
            .content
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(PREVIEW_CHARS)
            .collect();

        let mut line = format!("{} {}", self.title, format!("#{}", self.note_id).dimmed());
        if !preview.is_empty() {
            line.push_str(&format!("\n      {}", preview.dimmed()));
        }
        line
    }
}

impl Render for User {
    fn render(&self) -> String {
        match &self.email {
            Some(email) => format!("{} {}", self.full_name().bold(), format!("<{email}>").dimmed()),
            None => self.full_name().bold().to_string(),
        }
    }
}

fn date_heading(date: NaiveDate) -> String {
    date.format("%A, %d.%m.%Y").to_string().bold().to_string()
}

/// Events under one heading per date. Expects the list already ordered.
pub fn render_event_list(events: &[&Event]) -> String {
    if events.is_empty() {
        return "   No events".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut current = None;

    for event in events {
        if current != Some(event.date) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(date_heading(event.date));
            current = Some(event.date);
        }
        lines.push(format!("   {}", event.render()));
    }

    lines.join("\n")
}

/// Full view of one event, showing only the fields its category has.
pub fn render_event_detail(event: &Event) -> String {
    let mut lines = vec![
        event.title.bold().to_string(),
        format!("   {} {}", "Category:".dimmed(), category_label(event.category_id)),
        format!("   {} {}", "Date:".dimmed(), event.display_date()),
        format!("   {} {}", "Time:".dimmed(), event.display_time()),
    ];

    if let Some(kind) = event.category() {
        for field in kind.fields().iter() {
            let value = match field {
                OptionalField::Location => event.location.as_deref(),
                OptionalField::Participant => event.participant.as_deref(),
            };
            lines.push(format!(
                "   {} {}",
                format!("{}:", field.label()).dimmed(),
                value.unwrap_or("-")
            ));
        }
    }

    if let Some(content) = &event.content {
        lines.push(String::new());
        lines.extend(content.lines().map(|l| format!("   {l}")));
    }

    lines.join("\n")
}

/// Monday-first month grid. Today is inverted, days with events are highlighted.
pub fn render_month(month: MonthCursor, cells: &[Cell]) -> String {
    let mut lines = vec![
        month.first_day().format("%B %Y").to_string().bold().to_string(),
        "Mo Tu We Th Fr Sa Su".dimmed().to_string(),
    ];

    for week in cells.chunks(7) {
        let row: Vec<String> = week.iter().map(render_cell).collect();
        lines.push(row.join(" "));
    }

    lines.join("\n")
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Blank => "  ".to_string(),
        Cell::Day(day) => {
            let text = format!("{:>2}", day.day());
            if day.is_today {
                text.reversed().to_string()
            } else if day.has_event {
                text.cyan().bold().to_string()
            } else {
                text
            }
        }
    }
}
