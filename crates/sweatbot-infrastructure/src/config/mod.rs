use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

const APP_DIR: &str = "sweatbot";
const CONFIG_ENV: &str = "SWEATBOT_CONFIG";

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => match other.parse::<u8>() {
                Ok(n @ 1..=5) => Ok(LogLevel::from_u8(n)),
                _ => Err(format!("unknown log level '{}'", s)),
            },
        }
    }
}

/// Bot configuration, read from a JSON file and then overridden by
/// `SWEATBOT_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub sqlite_path: PathBuf,
    /// Only messages from this chat are handled. `None` accepts every chat.
    pub group_id: Option<String>,
    /// Replies are POSTed here when set, otherwise written to stdout
    pub reply_webhook: Option<Url>,
    pub reply_delay_min_ms: u64,
    /// At or below the minimum, the minimum is used as a fixed delay
    pub reply_delay_max_ms: u64,
    pub show_typing: bool,
    /// Offset calendar days are counted in. `None` uses the host's local offset.
    pub utc_offset_minutes: Option<i32>,
    pub log_level: LogLevel,
    pub log_dir: Option<PathBuf>,
    pub log_to_stdout: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            sqlite_path: default_data_dir().join("sweatbot.db"),
            group_id: None,
            reply_webhook: None,
            reply_delay_min_ms: 0,
            reply_delay_max_ms: 0,
            show_typing: false,
            utc_offset_minutes: None,
            log_level: LogLevel::Info,
            log_dir: None,
            log_to_stdout: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

impl BotConfig {
    /// Load from `$SWEATBOT_CONFIG` (or the per-user config dir), then apply
    /// the process environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.json")
    }

    /// A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `SWEATBOT_*` overrides read through `lookup`. Values that fail to
    /// parse keep the current setting.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SWEATBOT_SQLITE_PATH") {
            self.sqlite_path = PathBuf::from(path);
        }
        if let Some(group) = lookup("SWEATBOT_GROUP_ID") {
            let group = group.trim();
            self.group_id = (!group.is_empty()).then(|| group.to_string());
        }
        if let Some(log_dir) = lookup("SWEATBOT_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(log_dir));
        }

        override_parsed(&lookup, "SWEATBOT_REPLY_WEBHOOK", |v: Url| {
            self.reply_webhook = Some(v)
        });
        override_parsed(&lookup, "SWEATBOT_REPLY_DELAY_MIN_MS", |v: u64| {
            self.reply_delay_min_ms = v
        });
        override_parsed(&lookup, "SWEATBOT_REPLY_DELAY_MAX_MS", |v: u64| {
            self.reply_delay_max_ms = v
        });
        override_parsed(&lookup, "SWEATBOT_SHOW_TYPING", |v: bool| self.show_typing = v);
        override_parsed(&lookup, "SWEATBOT_UTC_OFFSET_MINUTES", |v: i32| {
            self.utc_offset_minutes = Some(v)
        });
        override_parsed(&lookup, "SWEATBOT_LOG_LEVEL", |v: LogLevel| self.log_level = v);
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(minutes) = self.utc_offset_minutes {
            if self.utc_offset().is_none() {
                anyhow::bail!("utc_offset_minutes {} is out of range", minutes);
            }
        }
        Ok(())
    }

    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes.checked_mul(60)?))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| default_data_dir().join("logs"))
    }
}

fn override_parsed<T, F, S>(lookup: &F, key: &str, mut apply: S)
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
    S: FnMut(T),
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => apply(value),
        Err(e) => log::warn!("Ignoring {}={:?}: {}", key, raw, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BotConfig::from_file(&dir.path().join("absent.json")).unwrap();

        assert_eq!(config, BotConfig::default());
        assert!(config.sqlite_path.ends_with("sweatbot/sweatbot.db"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"group_id": "120363@g.us", "log_level": "debug", "show_typing": true}"#,
        )
        .unwrap();

        let config = BotConfig::from_file(&path).unwrap();
        assert_eq!(config.group_id.as_deref(), Some("120363@g.us"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.show_typing);
        assert_eq!(config.reply_delay_min_ms, 0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(BotConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BotConfig::default();
        config.apply_env_overrides(env(&[
            ("SWEATBOT_SQLITE_PATH", "/tmp/bot.db"),
            ("SWEATBOT_GROUP_ID", " 42@g.us "),
            ("SWEATBOT_REPLY_WEBHOOK", "http://localhost:3000/send"),
            ("SWEATBOT_REPLY_DELAY_MIN_MS", "0"),
            ("SWEATBOT_REPLY_DELAY_MAX_MS", "10"),
            ("SWEATBOT_SHOW_TYPING", "true"),
            ("SWEATBOT_UTC_OFFSET_MINUTES", "420"),
            ("SWEATBOT_LOG_LEVEL", "WARN"),
        ]));

        assert_eq!(config.sqlite_path, PathBuf::from("/tmp/bot.db"));
        assert_eq!(config.group_id.as_deref(), Some("42@g.us"));
        assert_eq!(
            config.reply_webhook.as_ref().map(Url::as_str),
            Some("http://localhost:3000/send")
        );
        assert_eq!((config.reply_delay_min_ms, config.reply_delay_max_ms), (0, 10));
        assert!(config.show_typing);
        assert_eq!(config.utc_offset(), FixedOffset::east_opt(7 * 3600));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparsable_env_values_keep_current_setting() {
        let mut config = BotConfig::default();
        config.apply_env_overrides(env(&[
            ("SWEATBOT_REPLY_DELAY_MIN_MS", "soon"),
            ("SWEATBOT_SHOW_TYPING", "maybe"),
            ("SWEATBOT_REPLY_WEBHOOK", "not a url"),
            ("SWEATBOT_LOG_LEVEL", "loud"),
        ]));

        assert_eq!(config, BotConfig::default());
    }

    #[test]
    fn test_blank_group_id_accepts_every_chat() {
        let mut config = BotConfig {
            group_id: Some("42@g.us".to_string()),
            ..BotConfig::default()
        };
        config.apply_env_overrides(env(&[("SWEATBOT_GROUP_ID", "  ")]));

        assert_eq!(config.group_id, None);
    }

    #[test]
    fn test_max_delay_below_min_is_allowed() {
        let config = BotConfig {
            reply_delay_min_ms: 500,
            reply_delay_max_ms: 0,
            ..BotConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_offset() {
        let config = BotConfig {
            utc_offset_minutes: Some(24 * 60),
            ..BotConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.utc_offset(), None);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("2".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("9".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.as_str(), "trace");
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
