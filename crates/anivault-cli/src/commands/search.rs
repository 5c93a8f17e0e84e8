use super::config::{catalog_client, load_runtime};
use super::ui::{summary_table, Spinner};
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use serde_json::json;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let (_paths, config) = load_runtime()?;
    let client = catalog_client(&config)?;

    let spinner = Spinner::start(output, &format!("Searching for '{}'...", query));
    let results = client.search(query).await;
    spinner.finish();
    let results =
        results.map_err(|e| color_eyre::eyre::eyre!("Search failed for '{}': {}", query, e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "query": query, "results": results }));
        return Ok(());
    }

    if results.is_empty() {
        output.warn(format!("No results for '{}'", query));
        return Ok(());
    }

    output.println(format!("{} result(s) for '{}':", results.len(), query));
    output.println(summary_table(&results).to_string());
    Ok(())
}
