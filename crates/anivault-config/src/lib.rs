pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, NotificationConfig, NotificationConsent, ReminderConfig};
pub use paths::{env_base_path, PathManager};
