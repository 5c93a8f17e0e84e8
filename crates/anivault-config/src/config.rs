use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Whether the user has agreed to terminal notifications. `Unset` means we
/// have never asked; the first reminder command prompts once and records the
/// answer here.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationConsent {
    Unset,
    Granted,
    Denied,
}

impl NotificationConsent {
    pub fn is_granted(&self) -> bool {
        matches!(self, NotificationConsent::Granted)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, NotificationConsent::Unset)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotificationConfig {
    #[serde(default = "default_consent")]
    pub consent: NotificationConsent,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReminderConfig {
    /// Run a due-check pass when any reminder command starts.
    #[serde(default = "default_true")]
    pub check_on_startup: bool,
    /// Polling period for `remind watch`.
    #[serde(default = "default_check_interval_minutes")]
    pub check_interval_minutes: u64,
}

fn default_base_url() -> String {
    "http://localhost:3001/otakudesu".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_consent() -> NotificationConsent {
    NotificationConsent::Unset
}

fn default_true() -> bool {
    true
}

fn default_check_interval_minutes() -> u64 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            consent: default_consent(),
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            check_on_startup: default_true(),
            check_interval_minutes: default_check_interval_minutes(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist.
    /// A file that exists but fails to parse is still an error; silently
    /// ignoring it would drop a recorded notification consent.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog.base_url.is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }
        if !self.catalog.base_url.starts_with("http://")
            && !self.catalog.base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "catalog.base_url must start with http:// or https://: {}",
                self.catalog.base_url
            ));
        }
        if self.catalog.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("catalog.timeout_seconds must be positive"));
        }
        if self.reminders.check_interval_minutes == 0 {
            return Err(anyhow::anyhow!(
                "reminders.check_interval_minutes must be positive"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            catalog: CatalogConfig {
                base_url: "https://api.example.net/otakudesu".to_string(),
                timeout_seconds: 10,
            },
            notifications: NotificationConfig {
                consent: NotificationConsent::Granted,
            },
            reminders: ReminderConfig {
                check_on_startup: false,
                check_interval_minutes: 5,
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.base_url, "https://api.example.net/otakudesu");
        assert_eq!(loaded.catalog.timeout_seconds, 10);
        assert_eq!(loaded.notifications.consent, NotificationConsent::Granted);
        assert_eq!(loaded.reminders.check_on_startup, false);
        assert_eq!(loaded.reminders.check_interval_minutes, 5);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:3001/otakudesu");
        assert_eq!(config.catalog.timeout_seconds, 30);
        assert_eq!(config.notifications.consent, NotificationConsent::Unset);
        assert_eq!(config.reminders.check_on_startup, true);
        assert_eq!(config.reminders.check_interval_minutes, 30);
    }

    #[test]
    fn test_consent_round_trips_as_lowercase() {
        let config: Config = toml::from_str("[notifications]\nconsent = \"denied\"\n").unwrap();
        assert_eq!(config.notifications.consent, NotificationConsent::Denied);

        let written = toml::to_string_pretty(&config).unwrap();
        assert!(written.contains("consent = \"denied\""));
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.catalog.base_url = "ftp://example.net".to_string();
        assert!(config.validate().is_err());

        config.catalog.base_url = default_base_url();
        config.reminders.check_interval_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.notifications.consent, NotificationConsent::Unset);

        std::fs::write(&path, "this is not toml {").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }
}
