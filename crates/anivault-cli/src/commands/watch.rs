use super::config::{catalog_client, load_runtime};
use super::ui::Spinner;
use crate::output::{Output, OutputFormat};
use anivault_catalog::EpisodeStream;
use anivault_core::{HistoryLedger, ProfileStore, WatchEvent};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::sync::Arc;

/// Fallback episode length when neither --duration nor the catalog gives one.
const DEFAULT_TOTAL_SECONDS: u32 = 24 * 60;

pub async fn run_watch(
    episode_id: &str,
    progress: Option<u32>,
    duration: Option<u32>,
    offline: bool,
    title: Option<String>,
    poster: Option<String>,
    output: &Output,
) -> Result<()> {
    let (paths, config) = load_runtime()?;
    let store = Arc::new(ProfileStore::new(&paths)?);
    let ledger = HistoryLedger::new(store);

    let (event, stream) = if offline {
        // clap enforces --title alongside --offline
        let title = title.unwrap_or_else(|| episode_id.to_string());
        let event = WatchEvent {
            episode_id: episode_id.to_string(),
            title,
            poster,
            watched_duration: progress.unwrap_or(0),
            total_duration: duration.unwrap_or(DEFAULT_TOTAL_SECONDS),
        };
        (event, None)
    } else {
        let stream = fetch_stream(&config, episode_id, output).await?;
        let total = duration
            .or_else(|| {
                stream
                    .info
                    .duration
                    .as_deref()
                    .and_then(parse_minutes)
                    .map(|minutes| minutes * 60)
            })
            .unwrap_or(DEFAULT_TOTAL_SECONDS);

        let event = WatchEvent {
            episode_id: episode_id.to_string(),
            title: stream.title.clone(),
            poster: (!stream.poster.is_empty()).then(|| stream.poster.clone()),
            watched_duration: progress.unwrap_or(0),
            total_duration: total,
        };
        (event, Some(stream))
    };

    let entries = ledger
        .record(event)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to record watch: {}", e))?;
    let entry = &entries[0];

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "recorded": entry,
            "stream_url": stream.as_ref().map(|s| s.default_streaming_url.clone()),
            "next_episode": stream
                .as_ref()
                .and_then(|s| s.next_episode.as_ref())
                .map(|e| e.episode_id.clone()),
            "history_length": entries.len(),
        }));
        return Ok(());
    }

    output.success(format!("Recorded: {}", entry.title));
    if entry.watched_duration > 0 {
        output.println(format!(
            "  Progress: {} / {} ({:.0}%)",
            format_clock(entry.watched_duration),
            format_clock(entry.total_duration),
            entry.progress() * 100.0
        ));
    }
    if let Some(stream) = &stream {
        if !stream.default_streaming_url.is_empty() {
            output.println(format!("  Stream: {}", stream.default_streaming_url.cyan()));
        }
        if let Some(next) = &stream.next_episode {
            output.println(format!(
                "  Next episode: {} ({})",
                next.title,
                next.episode_id.bright_black()
            ));
        }
    }

    Ok(())
}

async fn fetch_stream(
    config: &anivault_config::Config,
    episode_id: &str,
    output: &Output,
) -> Result<EpisodeStream> {
    let client = catalog_client(config)?;
    let spinner = Spinner::start(output, &format!("Fetching episode {}...", episode_id));
    let result = client.episode(episode_id).await;
    spinner.finish();

    result.map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to fetch episode '{}': {}. Pass --offline --title to record without the catalog.",
            episode_id,
            e
        )
    })
}

/// The catalog reports durations as labels like "24 min".
fn parse_minutes(label: &str) -> Option<u32> {
    let digits: String = label
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_from_catalog_labels() {
        assert_eq!(parse_minutes("24 min"), Some(24));
        assert_eq!(parse_minutes(" 23 min. per ep."), Some(23));
        assert_eq!(parse_minutes("Unknown"), None);
        assert_eq!(parse_minutes(""), None);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(900), "15:00");
        assert_eq!(format_clock(1445), "24:05");
    }
}
