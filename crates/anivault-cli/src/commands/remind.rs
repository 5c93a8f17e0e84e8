use super::config::{catalog_client, load_runtime};
use super::prompts;
use super::ui::{self, Spinner};
use crate::notify::TerminalNotifier;
use crate::output::{Output, OutputFormat};
use crate::RemindCommands;
use anivault_catalog::{next_release_date, release_day_for};
use anivault_config::{Config, NotificationConsent, PathManager};
use anivault_core::{CheckCadence, Notifier, ProfileStore, ReminderScheduler};
use anivault_models::ReminderEntry;
use chrono::{DateTime, Local, Utc};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

pub async fn run_remind(command: RemindCommands, output: &Output) -> Result<()> {
    let (paths, mut config) = load_runtime()?;
    ensure_consent(&paths, &mut config, output)?;

    let store = Arc::new(ProfileStore::new(&paths)?);
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let scheduler = ReminderScheduler::new(store, notifier, config.notifications.consent);

    // Reminders that came due while nothing was running fire retroactively
    // here, before the subcommand itself does anything.
    let is_check_command = matches!(
        command,
        RemindCommands::Check | RemindCommands::Watch { .. }
    );
    if config.reminders.check_on_startup && !is_check_command {
        let fired = scheduler
            .check_due(Utc::now())
            .map_err(|e| color_eyre::eyre::eyre!("Reminder check failed: {}", e))?;
        if !fired.is_empty() {
            output.info(format!(
                "{} reminder(s) came due while anivault was not running",
                fired.len()
            ));
        }
    }

    match command {
        RemindCommands::Set {
            anime_id,
            at,
            title,
        } => set_reminder(&scheduler, &config, &anime_id, at, title, output).await,
        RemindCommands::Remove { anime_id } => remove_reminder(&scheduler, &anime_id, output),
        RemindCommands::List => list_reminders(&scheduler, output),
        RemindCommands::Check => check_now(&scheduler, output),
        RemindCommands::Watch { log_file: _ } => watch_loop(&scheduler, &config, output).await,
    }
}

/// Ask for notification permission exactly once, the first time a reminder
/// command runs somewhere a person can answer.
fn ensure_consent(paths: &PathManager, config: &mut Config, output: &Output) -> Result<()> {
    if !config.notifications.consent.is_unset() {
        return Ok(());
    }
    if output.format() != OutputFormat::Human || output.is_quiet() || !ui::is_interactive() {
        // Nobody to ask; unset behaves like not granted.
        return Ok(());
    }

    let granted = prompts::prompt_yes_no(
        "Show terminal notifications when reminded episodes are due?",
        Some(true),
    )?;
    config.notifications.consent = if granted {
        NotificationConsent::Granted
    } else {
        NotificationConsent::Denied
    };
    config
        .save_to_file(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config: {}", e))?;
    output.println("You can change this later with 'anivault config consent'.");
    Ok(())
}

async fn set_reminder(
    scheduler: &ReminderScheduler,
    config: &Config,
    anime_id: &str,
    at: Option<String>,
    title: Option<String>,
    output: &Output,
) -> Result<()> {
    if scheduler.is_reminded(anime_id) {
        output.info(format!("A reminder for '{}' is already set", anime_id));
        return Ok(());
    }

    let (title, target_date) = match at {
        Some(when) => {
            let parsed = DateTime::parse_from_rfc3339(&when).map_err(|e| {
                color_eyre::eyre::eyre!(
                    "Invalid --at value '{}': {} (expected RFC 3339, e.g. 2026-09-01T20:00:00+07:00)",
                    when,
                    e
                )
            })?;
            (
                title.unwrap_or_else(|| anime_id.to_string()),
                parsed.with_timezone(&Utc),
            )
        }
        None => derive_from_schedule(config, anime_id, output).await?,
    };

    let entry = ReminderEntry {
        anime_id: anime_id.to_string(),
        title: title.clone(),
        target_date,
    };
    let added = scheduler
        .add(entry)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save reminder: {}", e))?;

    if added {
        if output.format() != OutputFormat::Human {
            output.json(&json!({
                "anime_id": anime_id,
                "title": title,
                "target_date": target_date.to_rfc3339(),
            }));
            return Ok(());
        }
        output.success(format!(
            "Reminder set for {} at {}",
            title,
            target_date.with_timezone(&Local).format("%a %Y-%m-%d %H:%M")
        ));
        output.println(format!(
            "  Time until release: {}",
            format_countdown(target_date - Utc::now())
        ));
    } else {
        output.info(format!("A reminder for '{}' is already set", anime_id));
    }
    Ok(())
}

/// The next release moment, as the catalog schedule predicts it: the anime's
/// weekday column at 20:00 local, rolled to next week when that day is today.
async fn derive_from_schedule(
    config: &Config,
    anime_id: &str,
    output: &Output,
) -> Result<(String, DateTime<Utc>)> {
    let client = catalog_client(config)?;
    let spinner = Spinner::start(output, "Looking up the release schedule...");
    let (detail, schedule) = futures::join!(client.anime(anime_id), client.schedule());
    spinner.finish();

    let detail = detail.map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to fetch anime '{}': {}. Pass --at to set the time yourself.",
            anime_id,
            e
        )
    })?;
    let schedule = schedule.map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to fetch the release schedule: {}. Pass --at to set the time yourself.",
            e
        )
    })?;

    let day = release_day_for(&schedule, anime_id).ok_or_else(|| {
        color_eyre::eyre::eyre!(
            "'{}' is not on the weekly schedule (status: {}). Pass --at to set the time yourself.",
            anime_id,
            if detail.status.is_empty() {
                "unknown"
            } else {
                &detail.status
            }
        )
    })?;

    let target = next_release_date(day).ok_or_else(|| {
        color_eyre::eyre::eyre!("The schedule lists an unrecognized day name: {}", day)
    })?;

    Ok((detail.title, target.with_timezone(&Utc)))
}

fn remove_reminder(scheduler: &ReminderScheduler, anime_id: &str, output: &Output) -> Result<()> {
    let removed = scheduler
        .remove(anime_id)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to update reminders: {}", e))?;

    if removed {
        output.success(format!("Removed reminder for '{}'", anime_id));
    } else {
        output.warn(format!("No reminder for '{}'", anime_id));
    }
    Ok(())
}

fn list_reminders(scheduler: &ReminderScheduler, output: &Output) -> Result<()> {
    let entries = scheduler.entries();

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "reminders": entries }));
        return Ok(());
    }

    if entries.is_empty() {
        output.info("No pending reminders. Set one with 'anivault remind set ANIME_ID'.");
        return Ok(());
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Anime ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Fires At").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Countdown").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.anime_id),
            Cell::new(
                entry
                    .target_date
                    .with_timezone(&Local)
                    .format("%a %Y-%m-%d %H:%M")
                    .to_string(),
            ),
            Cell::new(format_countdown(entry.target_date - now)),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(table.to_string());

    Ok(())
}

fn check_now(scheduler: &ReminderScheduler, output: &Output) -> Result<()> {
    let fired = scheduler
        .check_due(Utc::now())
        .map_err(|e| color_eyre::eyre::eyre!("Reminder check failed: {}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "fired": fired }));
        return Ok(());
    }

    if fired.is_empty() {
        output.info("No reminders due.");
    } else {
        output.success(format!("{} reminder(s) fired", fired.len()));
    }
    Ok(())
}

async fn watch_loop(
    scheduler: &ReminderScheduler,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let minutes = config.reminders.check_interval_minutes;
    output.info(format!(
        "Watching {} pending reminder(s); checking every {}m. Stop with Ctrl-C.",
        scheduler.entries().len(),
        minutes
    ));

    tokio::select! {
        result = scheduler.run(CheckCadence::Every(Duration::from_secs(minutes * 60))) => {
            result.map_err(|e| color_eyre::eyre::eyre!("Reminder watch loop failed: {}", e))
        }
        _ = tokio::signal::ctrl_c() => {
            output.println("");
            output.info("Stopped");
            Ok(())
        }
    }
}

/// "2d 05:30:00" until the target; "due now" once it has passed.
fn format_countdown(until: chrono::Duration) -> String {
    let secs = until.num_seconds();
    if secs <= 0 {
        return "due now".to_string();
    }

    let days = secs / 86_400;
    let hours = (secs / 3_600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    if days > 0 {
        format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_formats() {
        assert_eq!(format_countdown(chrono::Duration::seconds(-5)), "due now");
        assert_eq!(format_countdown(chrono::Duration::seconds(0)), "due now");
        assert_eq!(format_countdown(chrono::Duration::seconds(59)), "00:00:59");
        assert_eq!(
            format_countdown(chrono::Duration::seconds(3 * 3600 + 2 * 60 + 1)),
            "03:02:01"
        );
        assert_eq!(
            format_countdown(chrono::Duration::seconds(2 * 86_400 + 19_800)),
            "2d 05:30:00"
        );
    }
}
