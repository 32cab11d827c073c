use serde::{Deserialize, Serialize};
use std::path::Path;
use std::fs;
use std::time::Duration;
use log::{info, warn};
use crate::error::{Error, Result};
use crate::validation;

/// Environment variables consulted for the bot token, in order.
pub const BOT_TOKEN_ENV_VARS: [&str; 2] = ["TGBOT_TOKEN", "TGbot_token"];
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const DEXSCREENER_BASE_URL_ENV: &str = "DEXSCREENER_BASE_URL";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub dexscreener: DexScreenerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TelegramConfig {
    pub bot_token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DexScreenerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dexscreener.com".to_string(),
            timeout_secs: 10,
        }
    }
}

impl DexScreenerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://messages.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    /// Loads the file if it exists, otherwise starts from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            Self::load(path)
        } else {
            warn!("Config file {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = BOT_TOKEN_ENV_VARS.iter().find_map(|key| lookup(key)) {
            self.telegram.bot_token = token;
        }
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database.url = url;
        }
        if let Some(url) = lookup(DEXSCREENER_BASE_URL_ENV) {
            self.dexscreener.base_url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_bot_token(&self.telegram.bot_token)?;
        if self.dexscreener.timeout_secs == 0 {
            return Err(Error::ConfigError("dexscreener.timeout_secs must be positive".to_string()));
        }
        if self.dexscreener.base_url.trim().is_empty() {
            return Err(Error::ConfigError("dexscreener.base_url cannot be empty".to_string()));
        }
        if self.database.url.trim().is_empty() {
            return Err(Error::ConfigError("database.url cannot be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(Error::ConfigError("database.max_connections must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    const TOKEN: &str = "123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[telegram]\nbot_token = \"{}\"\n\n[dexscreener]\ntimeout_secs = 3", TOKEN)?;

        let config = Config::load(file.path())?;
        assert_eq!(config.telegram.bot_token, TOKEN);
        assert_eq!(config.dexscreener.timeout(), Duration::from_secs(3));
        assert_eq!(config.dexscreener.base_url, "https://api.dexscreener.com");
        assert_eq!(config.database.url, "sqlite://messages.db");
        assert!(config.logging.file.is_none());
        Ok(())
    }

    #[test]
    fn test_missing_file_uses_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::load_or_default(&dir.path().join("absent.toml"))?;
        assert_eq!(config.database.max_connections, 5);
        assert!(config.telegram.bot_token.is_empty());
        Ok(())
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let mut config = Config::default();
        config.telegram.bot_token = "1:from-file".to_string();

        let env: HashMap<&str, &str> = [
            ("TGbot_token", TOKEN),
            ("DATABASE_URL", "sqlite::memory:"),
        ]
        .into_iter()
        .collect();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.telegram.bot_token, TOKEN);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.dexscreener.base_url, "https://api.dexscreener.com");
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.telegram.bot_token = TOKEN.to_string();
        assert!(config.validate().is_ok());

        config.dexscreener.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_logging_file_from_toml() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nfile = \"bot.log\"\n")?;

        let loaded = Config::load(&path)?;
        assert_eq!(loaded.logging.file.as_deref(), Some("bot.log"));
        assert_eq!(loaded.dexscreener.timeout_secs, 10);
        Ok(())
    }
}
