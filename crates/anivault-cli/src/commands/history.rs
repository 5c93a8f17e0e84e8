use super::config::load_runtime;
use super::prompts;
use crate::output::{Output, OutputFormat};
use crate::HistoryCommands;
use anivault_core::{HistoryLedger, ProfileStore};
use chrono::Local;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use csv::Writer;
use serde_json::json;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub async fn run_history(command: HistoryCommands, output: &Output) -> Result<()> {
    let (paths, _config) = load_runtime()?;
    let store = Arc::new(ProfileStore::new(&paths)?);
    let ledger = HistoryLedger::new(store);

    match command {
        HistoryCommands::List => list_history(&ledger, output),
        HistoryCommands::Remove { episode_id } => remove_entry(&ledger, &episode_id, output),
        HistoryCommands::Clear { yes } => clear_history(&ledger, yes, output),
        HistoryCommands::Export { file } => export_history(&ledger, &file, output),
    }
}

fn list_history(ledger: &HistoryLedger, output: &Output) -> Result<()> {
    let entries = ledger.entries();

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "history": entries }));
        return Ok(());
    }

    if entries.is_empty() {
        output.info("Watch history is empty. Record something with 'anivault watch EPISODE_ID'.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Episode ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Progress").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Last Watched").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.episode_id),
            Cell::new(format!("{:.0}%", entry.progress() * 100.0)),
            Cell::new(
                entry
                    .last_watched_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            ),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(table.to_string());

    Ok(())
}

fn remove_entry(ledger: &HistoryLedger, episode_id: &str, output: &Output) -> Result<()> {
    let removed = ledger
        .remove(episode_id)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to update history: {}", e))?;

    if removed {
        output.success(format!("Removed '{}' from history", episode_id));
    } else {
        output.warn(format!("No history entry for '{}'", episode_id));
    }
    Ok(())
}

fn clear_history(ledger: &HistoryLedger, yes: bool, output: &Output) -> Result<()> {
    let count = ledger.entries().len();
    if count == 0 {
        output.info("Watch history is already empty");
        return Ok(());
    }

    if !yes {
        let confirmed = prompts::prompt_yes_no(
            &format!("Delete all {} history entries?", count),
            Some(false),
        )?;
        if !confirmed {
            output.info("Aborted");
            return Ok(());
        }
    }

    ledger
        .clear()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear history: {}", e))?;
    output.success(format!("Cleared {} history entries", count));
    Ok(())
}

fn export_history(ledger: &HistoryLedger, file: &Path, output: &Output) -> Result<()> {
    let entries = ledger.entries();
    if entries.is_empty() {
        output.warn("Watch history is empty; nothing to export");
        return Ok(());
    }

    let out = File::create(file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to create {}: {}", file.display(), e)
    })?;
    let mut wtr = Writer::from_writer(out);

    wtr.write_record([
        "episode_id",
        "title",
        "poster",
        "last_watched_at",
        "watched_seconds",
        "total_seconds",
        "progress_percent",
    ])?;

    for entry in &entries {
        wtr.write_record([
            entry.episode_id.clone(),
            entry.title.clone(),
            entry.poster.clone().unwrap_or_default(),
            entry.last_watched_at.to_rfc3339(),
            entry.watched_duration.to_string(),
            entry.total_duration.to_string(),
            format!("{:.0}", entry.progress() * 100.0),
        ])?;
    }

    wtr.flush()?;
    output.success(format!(
        "Exported {} entries to {}",
        entries.len(),
        file.display()
    ));
    Ok(())
}
