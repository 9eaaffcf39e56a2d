//! Configuration system for FRIDAY LITE.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{FridayError, FridayResult};

/// Persistence backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory only; nothing survives a restart.
    Memory,
    /// One JSON file per key inside a directory.
    #[default]
    Json,
    /// A single SQLite key-value table.
    Sqlite,
}

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend type.
    pub backend: StoreBackend,
    /// Directory for the JSON backend, database file for SQLite.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Json,
            path: data_dir().join("store"),
        }
    }
}

/// Intent relay provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelayProvider {
    /// Built-in small-talk table, no network.
    #[default]
    Local,
    /// Dialogflow ES `detectIntent` over REST.
    Dialogflow,
}

/// Intent relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Provider type.
    pub provider: RelayProvider,
    /// Google Cloud project hosting the agent.
    pub project_id: String,
    /// Query language.
    pub language_code: String,
    /// OAuth bearer token (if not using environment variable).
    #[serde(skip_serializing)]
    pub access_token: Option<SecretString>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            provider: RelayProvider::Local,
            project_id: "small-talk-ufll".to_string(),
            language_code: "en".to_string(),
            access_token: None,
            base_url: "https://dialogflow.googleapis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RelayConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Artificial latency before fallback replies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyDelayConfig {
    /// Lower bound in milliseconds.
    pub min_ms: u64,
    /// Upper bound in milliseconds (exclusive unless equal to `min_ms`).
    pub max_ms: u64,
}

impl Default for ReplyDelayConfig {
    fn default() -> Self {
        Self {
            min_ms: 1000,
            max_ms: 2000,
        }
    }
}

impl ReplyDelayConfig {
    /// No artificial latency.
    pub fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    /// A fixed delay.
    pub fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }
}

/// Due-task reminder configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Whether the periodic check runs.
    pub enabled: bool,
    /// Seconds between checks.
    pub interval_secs: u64,
    /// How far ahead a due date counts as "due soon", in minutes.
    pub window_minutes: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 300,
            window_minutes: 60,
        }
    }
}

impl ReminderConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.window_minutes)
    }
}

/// Main FRIDAY LITE configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FridayConfig {
    /// Persistence configuration.
    pub store: StoreConfig,
    /// Intent relay configuration.
    pub relay: RelayConfig,
    /// Fallback reply latency.
    pub reply_delay: ReplyDelayConfig,
    /// Reminder configuration.
    pub reminders: ReminderConfig,
}

fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".friday-lite"))
        .unwrap_or_else(|| PathBuf::from(".friday-lite"))
}

impl FridayConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> FridayResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| FridayError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| FridayError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| FridayError::Configuration(e.to_string())),
            _ => Err(FridayError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Persistence
        if let Ok(backend) = std::env::var("FRIDAY_STORE_BACKEND") {
            config.store.backend = match backend.to_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                "sqlite" => StoreBackend::Sqlite,
                _ => StoreBackend::Json,
            };
        }
        if let Ok(path) = std::env::var("FRIDAY_STORE_PATH") {
            config.store.path = PathBuf::from(path);
        }

        // Relay
        if let Ok(provider) = std::env::var("FRIDAY_RELAY_PROVIDER") {
            config.relay.provider = match provider.to_lowercase().as_str() {
                "dialogflow" => RelayProvider::Dialogflow,
                _ => RelayProvider::Local,
            };
        }
        if let Ok(project) = std::env::var("DIALOGFLOW_PROJECT_ID") {
            config.relay.project_id = project;
        }
        if let Ok(token) = std::env::var("DIALOGFLOW_ACCESS_TOKEN") {
            config.relay.access_token = Some(SecretString::new(token));
        }
        if let Ok(url) = std::env::var("DIALOGFLOW_BASE_URL") {
            config.relay.base_url = url;
        }

        // Latency
        if let Some(ms) = env_u64("FRIDAY_REPLY_DELAY_MIN_MS") {
            config.reply_delay.min_ms = ms;
        }
        if let Some(ms) = env_u64("FRIDAY_REPLY_DELAY_MAX_MS") {
            config.reply_delay.max_ms = ms;
        }

        // Reminders
        if let Ok(enabled) = std::env::var("FRIDAY_REMINDERS_ENABLED") {
            config.reminders.enabled = !matches!(enabled.as_str(), "0" | "false" | "off");
        }
        if let Some(secs) = env_u64("FRIDAY_REMINDER_INTERVAL_SECS") {
            config.reminders.interval_secs = secs;
        }

        config
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> FridayConfigBuilder {
        FridayConfigBuilder::default()
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Builder for FridayConfig.
#[derive(Default)]
pub struct FridayConfigBuilder {
    config: FridayConfig,
}

impl FridayConfigBuilder {
    /// Set persistence configuration.
    pub fn store(mut self, config: StoreConfig) -> Self {
        self.config.store = config;
        self
    }

    /// Set relay configuration.
    pub fn relay(mut self, config: RelayConfig) -> Self {
        self.config.relay = config;
        self
    }

    /// Set fallback reply latency.
    pub fn reply_delay(mut self, config: ReplyDelayConfig) -> Self {
        self.config.reply_delay = config;
        self
    }

    /// Set reminder configuration.
    pub fn reminders(mut self, config: ReminderConfig) -> Self {
        self.config.reminders = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> FridayConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FridayConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Json);
        assert_eq!(config.relay.provider, RelayProvider::Local);
        assert_eq!(config.relay.language_code, "en");
        assert_eq!(config.reply_delay.min_ms, 1000);
        assert_eq!(config.reminders.interval(), Duration::from_secs(300));
        assert_eq!(config.reminders.window(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[store]
backend = "sqlite"
path = "/tmp/friday.db"

[relay]
provider = "dialogflow"
project_id = "my-agent"
access_token = "secret"

[reply_delay]
min_ms = 0
max_ms = 0
"#
        )
        .unwrap();

        let config = FridayConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.relay.provider, RelayProvider::Dialogflow);
        assert_eq!(config.relay.project_id, "my-agent");
        assert!(config.relay.access_token.is_some());
        assert_eq!(config.relay.language_code, "en");
        assert_eq!(config.reply_delay.max_ms, 0);
        assert!(config.reminders.enabled);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = FridayConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, FridayError::Configuration(_)));
    }

    #[test]
    fn test_builder() {
        let config = FridayConfig::builder()
            .reply_delay(ReplyDelayConfig::none())
            .store(StoreConfig {
                backend: StoreBackend::Memory,
                path: PathBuf::new(),
            })
            .build();
        assert_eq!(config.reply_delay.max_ms, 0);
        assert_eq!(config.store.backend, StoreBackend::Memory);
    }
}
