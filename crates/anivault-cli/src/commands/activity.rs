use super::config::load_runtime;
use super::ui::today;
use crate::output::{Output, OutputFormat};
use anivault_core::{ActivityTracker, ProfileStore};
use anivault_models::ActivityLog;
use chrono::{Datelike, Duration, NaiveDate};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::sync::Arc;

pub async fn run_activity(weeks: u32, output: &Output) -> Result<()> {
    let (paths, _config) = load_runtime()?;
    let store = Arc::new(ProfileStore::new(&paths)?);
    let log = ActivityTracker::new(store).snapshot();

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "activity": log,
            "total_episodes": log.total(),
            "active_days": log.active_days(),
        }));
        return Ok(());
    }

    let weeks = weeks.clamp(1, 104);
    let today = today();

    output.println(format!(
        "{} {}",
        "Watch Activity".bold(),
        format!("(last {} weeks)", weeks).bright_black()
    ));
    output.println(String::new());
    for line in render_grid(&log, today, weeks) {
        output.println(line);
    }
    output.println(String::new());
    output.println(format!(
        "  {} episodes over {} active days   Less {}{}{}{} More",
        log.total(),
        log.active_days(),
        cell(0),
        cell(1),
        cell(3),
        cell(5),
    ));
    if log.is_empty() {
        output.println(
            "  Nothing yet; watching episodes fills this in."
                .bright_black()
                .to_string(),
        );
    }

    Ok(())
}

/// Seven rows (Sunday-start weeks), one column per week, the current week
/// rightmost. Days after today stay blank.
fn render_grid(log: &ActivityLog, today: NaiveDate, weeks: u32) -> Vec<String> {
    let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    let first = week_start - Duration::weeks(i64::from(weeks) - 1);

    let mut lines = Vec::with_capacity(7);
    for row in 0..7 {
        let gutter = match row {
            1 => "Mon ",
            3 => "Wed ",
            5 => "Fri ",
            _ => "    ",
        };
        let mut line = String::from(gutter);
        for col in 0..weeks {
            let date = first + Duration::days(i64::from(col) * 7 + i64::from(row));
            if date > today {
                line.push(' ');
            } else {
                line.push_str(&cell(log.count_on(date)));
            }
        }
        lines.push(line);
    }
    lines
}

/// Intensity buckets: 0, 1–2, 3–4, 5+.
fn bucket(count: u32) -> usize {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        _ => 3,
    }
}

fn cell(count: u32) -> String {
    match bucket(count) {
        0 => "·".bright_black().to_string(),
        1 => "■".green().dimmed().to_string(),
        2 => "■".green().to_string(),
        _ => "■".bright_green().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Utc, Weekday};

    #[test]
    fn test_buckets_match_the_graph_thresholds() {
        assert_eq!(bucket(0), 0);
        assert_eq!(bucket(1), 1);
        assert_eq!(bucket(2), 1);
        assert_eq!(bucket(3), 2);
        assert_eq!(bucket(4), 2);
        assert_eq!(bucket(5), 3);
        assert_eq!(bucket(40), 3);
    }

    #[test]
    fn test_utc_stamped_bump_is_visible_in_the_grid() {
        let mut log = ActivityLog::new();
        // The same day stamp HistoryLedger::record writes.
        log.bump(Utc::now().date_naive());

        let lines = render_grid(&log, today(), 4);
        assert!(lines.iter().any(|line| line.contains('■')));
        assert_eq!(log.total(), 1);
    }

    #[test]
    fn test_grid_shape_and_future_blanks() {
        let log = ActivityLog::new();
        // 2026-08-25 is a Tuesday; its week has five future days.
        let today = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(today.weekday(), Weekday::Tue);

        let lines = render_grid(&log, today, 4);
        assert_eq!(lines.len(), 7);

        // Wednesday row of the current week is still blank.
        let wednesday_row = &lines[3];
        assert!(wednesday_row.starts_with("Wed "));
        assert!(wednesday_row.ends_with(' '));
        // The Tuesday row ends with a rendered (empty) cell, not a blank.
        assert!(!lines[2].ends_with(' '));
    }
}
