use super::config::{catalog_client, load_runtime};
use super::ui::{today, Spinner};
use crate::output::{Output, OutputFormat};
use anivault_catalog::CatalogSource;
use anivault_core::{FortuneTeller, ProfileStore};
use anivault_models::FortuneGrade;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::sync::Arc;

pub async fn run_fortune(output: &Output) -> Result<()> {
    let (paths, config) = load_runtime()?;
    let store = Arc::new(ProfileStore::new(&paths)?);

    // The lucky pick is best-effort; a broken catalog config just means a
    // draw without one.
    let catalog: Option<Arc<dyn CatalogSource>> = match catalog_client(&config) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!("Catalog unavailable for the lucky pick: {}", e);
            None
        }
    };

    let teller = FortuneTeller::new(store, catalog);

    let spinner = Spinner::start(output, "Drawing today's omikuji...");
    let draw = teller.draw(today()).await;
    spinner.finish();
    let draw = draw.map_err(|e| color_eyre::eyre::eyre!("Failed to draw the fortune: {}", e))?;

    let result = &draw.result;

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "date": result.date.to_string(),
            "grade": result.grade.label(),
            "kanji": result.grade.kanji(),
            "blurb": result.grade.blurb(),
            "lucky_color": result.lucky_color,
            "lucky_anime": result.lucky_anime,
            "fresh": draw.fresh,
        }));
        return Ok(());
    }

    output.println(format!(
        "{} {}",
        "御神籤".bright_white().bold(),
        format!("Daily Omikuji ({})", result.date).bright_black()
    ));
    output.println(format!(
        "  {}  {}",
        colored_kanji(result.grade),
        result.grade.label().bold()
    ));
    output.println(format!("  \"{}\"", result.grade.blurb().italic()));
    output.println(format!("  Lucky color: {}", result.lucky_color));
    if let Some(lucky) = &result.lucky_anime {
        output.println(format!(
            "  Today's recommendation: {} ({})",
            lucky.title.bold(),
            lucky.anime_id.bright_black()
        ));
    }
    if !draw.fresh {
        output.println(
            "  Already drawn today; the result stays until the day rolls over."
                .bright_black()
                .to_string(),
        );
    }

    Ok(())
}

/// Warm colors for the blessings, muted gray for the curse.
fn colored_kanji(grade: FortuneGrade) -> String {
    let kanji = grade.kanji();
    match grade {
        FortuneGrade::GreatBlessing => kanji.red().to_string(),
        FortuneGrade::MiddleBlessing => kanji.yellow().to_string(),
        FortuneGrade::SmallBlessing => kanji.green().to_string(),
        FortuneGrade::Blessing => kanji.blue().to_string(),
        FortuneGrade::FutureBlessing => kanji.purple().to_string(),
        FortuneGrade::Curse => kanji.bright_black().to_string(),
    }
}
