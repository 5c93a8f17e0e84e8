use super::config::{catalog_client, load_runtime};
use super::ui::{summary_table, Spinner};
use crate::output::{Output, OutputFormat};
use crate::BrowseCommands;
use anivault_catalog::{AnimeSummary, CatalogClient};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_browse(command: BrowseCommands, output: &Output) -> Result<()> {
    let (_paths, config) = load_runtime()?;
    let client = catalog_client(&config)?;

    match command {
        BrowseCommands::Home => home(&client, output).await,
        BrowseCommands::Ongoing { page } => ongoing(&client, page, output).await,
        BrowseCommands::Completed { page } => completed(&client, page, output).await,
        BrowseCommands::Genres => genres(&client, output).await,
        BrowseCommands::Genre { genre_id, page } => genre(&client, &genre_id, page, output).await,
    }
}

async fn home(client: &CatalogClient, output: &Output) -> Result<()> {
    let spinner = Spinner::start(output, "Fetching the home rails...");
    let feed = client.home().await;
    spinner.finish();
    let feed = feed.map_err(|e| color_eyre::eyre::eyre!("Failed to fetch the home feed: {}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "ongoing": feed.ongoing,
            "completed": feed.completed,
        }));
        return Ok(());
    }

    print_rail("Latest ongoing", &feed.ongoing, output);
    print_rail("Latest completed", &feed.completed, output);
    Ok(())
}

async fn ongoing(client: &CatalogClient, page: u32, output: &Output) -> Result<()> {
    let spinner = Spinner::start(output, &format!("Fetching ongoing anime (page {})...", page));
    let list = client.ongoing(page).await;
    spinner.finish();
    let list =
        list.map_err(|e| color_eyre::eyre::eyre!("Failed to fetch the ongoing listing: {}", e))?;
    show_page("Ongoing", page, &list, output)
}

async fn completed(client: &CatalogClient, page: u32, output: &Output) -> Result<()> {
    let spinner = Spinner::start(output, &format!("Fetching completed anime (page {})...", page));
    let list = client.completed(page).await;
    spinner.finish();
    let list =
        list.map_err(|e| color_eyre::eyre::eyre!("Failed to fetch the completed listing: {}", e))?;
    show_page("Completed", page, &list, output)
}

async fn genres(client: &CatalogClient, output: &Output) -> Result<()> {
    let spinner = Spinner::start(output, "Fetching genres...");
    let list = client.genres().await;
    spinner.finish();
    let list = list.map_err(|e| color_eyre::eyre::eyre!("Failed to fetch genres: {}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "genres": list }));
        return Ok(());
    }

    if list.is_empty() {
        output.warn("The catalog published no genres");
        return Ok(());
    }

    output.println(format!("{} genres:", list.len()));
    for g in &list {
        output.println(format!(
            "  {} {}",
            g.title,
            format!("({})", g.genre_id.as_deref().unwrap_or("-")).bright_black()
        ));
    }
    Ok(())
}

async fn genre(client: &CatalogClient, genre_id: &str, page: u32, output: &Output) -> Result<()> {
    let spinner = Spinner::start(output, &format!("Fetching '{}' (page {})...", genre_id, page));
    let list = client.genre(genre_id, page).await;
    spinner.finish();
    let list = list
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch genre '{}': {}", genre_id, e))?;
    show_page(genre_id, page, &list, output)
}

fn show_page(label: &str, page: u32, entries: &[AnimeSummary], output: &Output) -> Result<()> {
    if output.format() != OutputFormat::Human {
        output.json(&json!({ "page": page, "anime": entries }));
        return Ok(());
    }

    if entries.is_empty() {
        output.warn(format!("Nothing on page {} of {}", page, label));
        return Ok(());
    }

    output.println(format!("{} {}", label.bold(), format!("(page {})", page).bright_black()));
    output.println(summary_table(entries).to_string());
    Ok(())
}

fn print_rail(label: &str, entries: &[AnimeSummary], output: &Output) {
    output.println(label.bold().to_string());
    if entries.is_empty() {
        output.println("  (nothing listed)".bright_black().to_string());
    } else {
        output.println(summary_table(entries).to_string());
    }
    output.println(String::new());
}
