//! Handles settings for the application. Configuration is written in
//! `settings.toml`.

use config::{Config, ConfigError, File};
use serde::Deserialize;

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
    /// Chat allowed to run the export/import maintenance commands.
    pub private_chat: i64,
    /// Telegram user ids allowed to use the bot. Empty means everyone.
    #[serde(default)]
    pub allowed_users: Vec<u64>,
    /// Path of the ledger snapshot file.
    pub state_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub telegram: Telegram,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .build()?;

        settings.try_deserialize()
    }
}
