use super::config::{catalog_client, load_runtime};
use super::ui::Spinner;
use crate::output::{Output, OutputFormat};
use crate::BookmarkCommands;
use anivault_core::{BookmarkSet, ProfileStore};
use anivault_models::BookmarkEntry;
use chrono::{Local, Utc};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use std::sync::Arc;

pub async fn run_bookmark(command: BookmarkCommands, output: &Output) -> Result<()> {
    let (paths, config) = load_runtime()?;
    let store = Arc::new(ProfileStore::new(&paths)?);
    let bookmarks = BookmarkSet::new(store);

    match command {
        BookmarkCommands::Add { anime_id } => add_bookmark(&bookmarks, &config, &anime_id, output).await,
        BookmarkCommands::Remove { anime_id } => remove_bookmark(&bookmarks, &anime_id, output),
        BookmarkCommands::List => list_bookmarks(&bookmarks, output),
    }
}

async fn add_bookmark(
    bookmarks: &BookmarkSet,
    config: &anivault_config::Config,
    anime_id: &str,
    output: &Output,
) -> Result<()> {
    if bookmarks.is_bookmarked(anime_id) {
        output.info(format!("'{}' is already bookmarked", anime_id));
        return Ok(());
    }

    // Snapshot the display fields now; the catalog may be unreachable later.
    let client = catalog_client(config)?;
    let spinner = Spinner::start(output, &format!("Fetching {}...", anime_id));
    let detail = client.anime(anime_id).await;
    spinner.finish();
    let detail = detail.map_err(|e| {
        color_eyre::eyre::eyre!("Failed to fetch anime '{}': {}", anime_id, e)
    })?;

    let entry = BookmarkEntry {
        anime_id: anime_id.to_string(),
        title: detail.title.clone(),
        poster: detail.poster.clone(),
        score: detail.score.clone(),
        status: detail.status.clone(),
        added_at: Utc::now(),
    };

    let added = bookmarks
        .add(entry)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save bookmark: {}", e))?;
    if added {
        output.success(format!("Bookmarked: {}", detail.title));
    } else {
        output.info(format!("'{}' is already bookmarked", anime_id));
    }
    Ok(())
}

fn remove_bookmark(bookmarks: &BookmarkSet, anime_id: &str, output: &Output) -> Result<()> {
    let removed = bookmarks
        .remove(anime_id)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to update bookmarks: {}", e))?;

    if removed {
        output.success(format!("Removed bookmark '{}'", anime_id));
    } else {
        output.warn(format!("No bookmark for '{}'", anime_id));
    }
    Ok(())
}

fn list_bookmarks(bookmarks: &BookmarkSet, output: &Output) -> Result<()> {
    let entries = bookmarks.entries();

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "bookmarks": entries }));
        return Ok(());
    }

    if entries.is_empty() {
        output.info("No bookmarks yet. Add one with 'anivault bookmark add ANIME_ID'.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Anime ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Score").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Status").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Added").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.anime_id),
            Cell::new(if entry.score.is_empty() { "-" } else { &entry.score }),
            Cell::new(if entry.status.is_empty() { "-" } else { &entry.status }),
            Cell::new(
                entry
                    .added_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d")
                    .to_string(),
            ),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(table.to_string());

    Ok(())
}
