use super::prompts;
use crate::output::{Output, OutputFormat};
use anivault_catalog::CatalogClient;
use anivault_config::{Config, NotificationConsent, PathManager};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::time::Duration;

/// Path layout plus configuration; every command starts from this pair.
/// A missing config file falls back to defaults, a malformed one is an error.
pub fn load_runtime() -> Result<(PathManager, Config)> {
    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file()).map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to load config from {}: {}",
            paths.config_file().display(),
            e
        )
    })?;
    Ok((paths, config))
}

pub fn catalog_client(config: &Config) -> Result<CatalogClient> {
    CatalogClient::new(
        &config.catalog.base_url,
        Duration::from_secs(config.catalog.timeout_seconds),
    )
    .map_err(|e| color_eyre::eyre::eyre!("Failed to build catalog client: {}", e))
}

pub fn consent_label(consent: NotificationConsent) -> &'static str {
    match consent {
        NotificationConsent::Granted => "granted",
        NotificationConsent::Denied => "denied",
        NotificationConsent::Unset => "unset",
    }
}

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(output),
        crate::ConfigCommands::Init => init_config(output),
        crate::ConfigCommands::Consent { value } => set_consent(value, output),
    }
}

fn show_config(output: &Output) -> Result<()> {
    let (paths, config) = load_runtime()?;
    let config_file = paths.config_file();

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "catalog": {
                "base_url": config.catalog.base_url,
                "timeout_seconds": config.catalog.timeout_seconds,
            },
            "notifications": {
                "consent": consent_label(config.notifications.consent),
            },
            "reminders": {
                "check_on_startup": config.reminders.check_on_startup,
                "check_interval_minutes": config.reminders.check_interval_minutes,
            },
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.info(format!(
            "No config file at {} yet; showing defaults. Run 'anivault config init' to create one.",
            config_file.display()
        ));
    }

    let mut info_table = Table::new();
    info_table.set_header(vec![
        Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    info_table.load_preset(comfy_table::presets::UTF8_FULL);
    info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(info_table.to_string());

    let mut catalog_table = Table::new();
    catalog_table.set_header(vec![
        Cell::new("Catalog")
            .fg(comfy_table::Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    catalog_table.add_row(vec![
        Cell::new("Base URL"),
        Cell::new(&config.catalog.base_url),
    ]);
    catalog_table.add_row(vec![
        Cell::new("Timeout"),
        Cell::new(format!("{}s", config.catalog.timeout_seconds)),
    ]);
    catalog_table.load_preset(comfy_table::presets::UTF8_FULL);
    catalog_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(catalog_table.to_string());

    let consent_display = match config.notifications.consent {
        NotificationConsent::Granted => "granted".green().to_string(),
        NotificationConsent::Denied => "denied".red().to_string(),
        NotificationConsent::Unset => "not asked yet".yellow().to_string(),
    };

    let mut reminder_table = Table::new();
    reminder_table.set_header(vec![
        Cell::new("Reminders")
            .fg(comfy_table::Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    reminder_table.add_row(vec![Cell::new("Notifications"), Cell::new(consent_display)]);
    reminder_table.add_row(vec![
        Cell::new("Check on startup"),
        Cell::new(if config.reminders.check_on_startup {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        }),
    ]);
    reminder_table.add_row(vec![
        Cell::new("Check interval"),
        Cell::new(format!("{}m", config.reminders.check_interval_minutes)),
    ]);
    reminder_table.load_preset(comfy_table::presets::UTF8_FULL);
    reminder_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(reminder_table.to_string());

    Ok(())
}

fn init_config(output: &Output) -> Result<()> {
    let (paths, mut config) = load_runtime()?;

    output.println(format!("{}", "AniVault configuration".bright_white().bold()));
    output.println(format!(
        "Settings are written to {}\n",
        paths.config_file().display()
    ));

    let base_url = prompts::prompt_string("Catalog API base URL", Some(&config.catalog.base_url))?;
    if !base_url.trim().is_empty() {
        config.catalog.base_url = base_url.trim().trim_end_matches('/').to_string();
    }

    config.catalog.timeout_seconds = prompts::prompt_number(
        "Request timeout (seconds)",
        Some(config.catalog.timeout_seconds as u32),
    )? as u64;

    let notify = prompts::prompt_yes_no(
        "Notify in the terminal when reminded episodes are due?",
        Some(config.notifications.consent.is_granted()),
    )?;
    config.notifications.consent = if notify {
        NotificationConsent::Granted
    } else {
        NotificationConsent::Denied
    };

    config.reminders.check_on_startup = prompts::prompt_yes_no(
        "Check due reminders whenever a reminder command starts?",
        Some(config.reminders.check_on_startup),
    )?;
    config.reminders.check_interval_minutes = prompts::prompt_number(
        "Polling interval for 'remind watch' (minutes)",
        Some(config.reminders.check_interval_minutes as u32),
    )? as u64;

    if let Err(e) = config.validate() {
        output.error(format!("Validation error: {}", e));
        output.info("Nothing was saved; run 'anivault config init' again.");
        return Ok(());
    }
    config
        .save_to_file(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config: {}", e))?;

    output.success(format!(
        "Configuration saved to {}",
        paths.config_file().display()
    ));
    Ok(())
}

fn set_consent(value: crate::ConsentArg, output: &Output) -> Result<()> {
    let (paths, mut config) = load_runtime()?;

    config.notifications.consent = match value {
        crate::ConsentArg::Granted => NotificationConsent::Granted,
        crate::ConsentArg::Denied => NotificationConsent::Denied,
        crate::ConsentArg::Unset => NotificationConsent::Unset,
    };

    config
        .save_to_file(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config: {}", e))?;

    output.success(format!(
        "Notification consent set to {}",
        consent_label(config.notifications.consent)
    ));
    Ok(())
}
