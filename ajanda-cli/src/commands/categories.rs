use anyhow::Result;
use owo_colors::OwoColorize;

use ajanda_core::api::ListCategories;
use ajanda_core::{Category, CategoryKind};

use super::create_spinner;
use crate::context::App;
use crate::render::Render;

pub async fn run(app: &App) -> Result<()> {
    let spinner = create_spinner("Fetching categories".into());
    let result = app.api.call(app.session(), ListCategories).await;
    spinner.finish_and_clear();

    let categories = match result {
        Ok(categories) => categories,
        Err(e) => {
            eprintln!("{}", format!("Could not fetch categories ({e}), showing built-in names").yellow());
            builtin()
        }
    };

    for category in &categories {
        println!("{}", category.render());
    }

    Ok(())
}

fn builtin() -> Vec<Category> {
    CategoryKind::ALL
        .into_iter()
        .map(|kind| Category {
            category_id: kind.id(),
            category_name: kind.label().to_string(),
        })
        .collect()
}
