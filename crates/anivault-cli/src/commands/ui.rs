use crate::output::{Output, OutputFormat};
use anivault_catalog::AnimeSummary;
use chrono::{NaiveDate, Utc};
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// History stamps watch days with `Utc::now`, so everything keyed by
/// calendar day (the activity grid, the daily draw) reads the UTC day too.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Spinner shown while a catalog request is in flight. Quiet mode, JSON
/// output, and non-terminal runs get a debug log line instead so piped
/// output stays clean.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(output: &Output, msg: &str) -> Self {
        if output.is_quiet() || output.format() != OutputFormat::Human || !is_interactive() {
            tracing::debug!("{}", msg);
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(msg.to_string());

        Self { bar: Some(bar) }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Listing table shared by search and browse. Sparse fields render as "-".
pub fn summary_table(entries: &[AnimeSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Anime ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Episodes").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Score").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Status").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.anime_id),
            Cell::new(entry.episodes.as_deref().unwrap_or("-")),
            Cell::new(entry.score.as_deref().unwrap_or("-")),
            Cell::new(entry.status.as_deref().unwrap_or("-")),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
