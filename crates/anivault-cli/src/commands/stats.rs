use super::config::load_runtime;
use crate::output::{Output, OutputFormat};
use anivault_core::{ProfileStats, ProfileStore};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_stats(output: &Output) -> Result<()> {
    let (paths, _config) = load_runtime()?;
    let store = ProfileStore::new(&paths)?;
    let stats = ProfileStats::collect(&store);

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "level": stats.level.label(),
            "lifetime_episodes": stats.lifetime_episodes,
            "time_watched": stats.time_watched(),
            "active_days": stats.active_days,
            "recent_history": stats.recent_history,
            "bookmarks": stats.bookmark_count,
            "reminders": stats.reminder_count,
            "next_level_at": stats.next_level_at,
            "progress_percent": stats.progress_percent,
        }));
        return Ok(());
    }

    output.println(format!(
        "{} {}",
        "Watcher level:".bold(),
        stats.level.label().cyan().bold()
    ));
    output.println(format!(
        "  {} {:.0}% towards the next milestone ({} episodes)",
        progress_bar(stats.progress_percent),
        stats.progress_percent,
        stats.next_level_at
    ));
    output.println(String::new());

    let mut table = Table::new();
    table.add_row(vec![Cell::new("Lifetime episodes"), Cell::new(stats.lifetime_episodes)]);
    table.add_row(vec![Cell::new("Time watched"), Cell::new(stats.time_watched())]);
    table.add_row(vec![Cell::new("Active days"), Cell::new(stats.active_days)]);
    table.add_row(vec![Cell::new("Recent history"), Cell::new(stats.recent_history)]);
    table.add_row(vec![Cell::new("Bookmarks"), Cell::new(stats.bookmark_count)]);
    table.add_row(vec![Cell::new("Reminders"), Cell::new(stats.reminder_count)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(table.to_string());

    Ok(())
}

fn progress_bar(percent: f32) -> String {
    let filled = (percent / 10.0).round().clamp(0.0, 10.0) as usize;
    format!(
        "[{}{}]",
        "■".repeat(filled).green(),
        "·".repeat(10 - filled).bright_black()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_fills_in_tenths() {
        // Strip the ANSI styling down to the glyphs for counting.
        let strip = |s: &str| {
            let mut out = String::new();
            let mut chars = s.chars();
            while let Some(c) = chars.next() {
                if c == '\u{1b}' {
                    for esc in chars.by_ref() {
                        if esc == 'm' {
                            break;
                        }
                    }
                } else {
                    out.push(c);
                }
            }
            out
        };

        assert_eq!(strip(&progress_bar(0.0)), format!("[{}]", "·".repeat(10)));
        assert_eq!(strip(&progress_bar(100.0)), format!("[{}]", "■".repeat(10)));
        assert_eq!(
            strip(&progress_bar(45.0)),
            format!("[{}{}]", "■".repeat(5), "·".repeat(5))
        );
    }
}
