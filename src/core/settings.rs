use crate::core::credentials::Credentials;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const RETRY_PERIOD_SECS: u64 = 600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub telegram: TelegramSettings,
    pub polling: PollingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub endpoint: String,
    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    pub api_url: String,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    pub retry_period_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            retry_period_secs: RETRY_PERIOD_SECS,
        }
    }
}

impl PollingSettings {
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("homework-bot").join("config.toml"))
    }

    /// Reads `explicit` if given, otherwise the default config file when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::info!("Config file not found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(?path, "Loaded config");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.api.endpoint) {
            anyhow::bail!(
                "api.endpoint must be an http(s) URL, got {:?}",
                self.api.endpoint
            );
        }
        if self.api.request_timeout_secs == Some(0) {
            anyhow::bail!("api.request_timeout_secs must be greater than 0");
        }
        if !is_http_url(&self.telegram.api_url) {
            anyhow::bail!(
                "telegram.api_url must be an http(s) URL, got {:?}",
                self.telegram.api_url
            );
        }
        if self.polling.retry_period_secs == 0 {
            anyhow::bail!("polling.retry_period_secs must be greater than 0");
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Everything the bot needs, built once before the loop and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub credentials: Credentials,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api.endpoint, DEFAULT_ENDPOINT);
        assert!(settings.api.request_timeout().is_none());
        assert_eq!(settings.telegram.api_url, "https://api.telegram.org");
        assert_eq!(settings.polling.retry_period(), Duration::from_secs(600));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.polling.retry_period_secs = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.api.request_timeout_secs = Some(0);
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.api.endpoint = "practicum.yandex.ru".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.telegram.api_url = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [api]
            endpoint = "http://localhost:8080/homework_statuses/"
            request_timeout_secs = 30

            [polling]
            retry_period_secs = 120
        "#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(
            settings.api.endpoint,
            "http://localhost:8080/homework_statuses/"
        );
        assert_eq!(settings.api.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(settings.telegram.api_url, DEFAULT_TELEGRAM_API_URL);
        assert_eq!(settings.polling.retry_period_secs, 120);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[polling]\nretry_period_secs = 5").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.polling.retry_period_secs, 5);
        assert_eq!(settings.api.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(Some(dir.path().join("absent.toml").as_path()));
        assert!(result.is_err());
    }
}
