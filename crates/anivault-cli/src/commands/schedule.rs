use super::config::{catalog_client, load_runtime};
use super::ui::Spinner;
use crate::output::{Output, OutputFormat};
use anivault_catalog::{next_release_date, weekday_from_name, ScheduleDay};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_schedule(day: Option<String>, output: &Output) -> Result<()> {
    let (_paths, config) = load_runtime()?;
    let client = catalog_client(&config)?;

    let spinner = Spinner::start(output, "Fetching the release schedule...");
    let schedule = client.schedule().await;
    spinner.finish();
    let mut schedule =
        schedule.map_err(|e| color_eyre::eyre::eyre!("Failed to fetch the schedule: {}", e))?;

    if let Some(wanted) = &day {
        // Match the label as-is, or by weekday so 'monday' finds 'Senin'.
        let wanted_weekday = weekday_from_name(wanted);
        schedule.retain(|d| {
            d.day.eq_ignore_ascii_case(wanted)
                || (wanted_weekday.is_some() && weekday_from_name(&d.day) == wanted_weekday)
        });
        if schedule.is_empty() {
            output.warn(format!("No schedule entries for '{}'", wanted));
            return Ok(());
        }
    }

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "schedule": schedule }));
        return Ok(());
    }

    if schedule.is_empty() {
        output.info("The catalog published an empty schedule");
        return Ok(());
    }

    for entry in &schedule {
        print_day(entry, output);
    }
    Ok(())
}

fn print_day(day: &ScheduleDay, output: &Output) {
    let header = match next_release_date(&day.day) {
        Some(next) => format!(
            "{}  {}",
            day.day.bold(),
            format!("next: {}", next.format("%a %Y-%m-%d %H:%M")).bright_black()
        ),
        None => day.day.bold().to_string(),
    };
    output.println(header);

    if day.anime_list.is_empty() {
        output.println("  (nothing listed)".bright_black().to_string());
    }
    for entry in &day.anime_list {
        output.println(format!(
            "  {} {}",
            entry.title,
            format!("({})", entry.anime_id).bright_black()
        ));
    }
    output.println(String::new());
}
