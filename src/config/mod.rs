//! Configuration management and account loading
//!
//! This module handles loading and validating configuration from a TOML
//! file: fetch tuning, schedule clock times, push delivery, and the account
//! list with per-account mission overrides and settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{AccountContext, JobKind};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fetch tuning
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Schedule clock times
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Report delivery
    #[serde(default)]
    pub push: PushConfig,

    /// Account list, processed in file order
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// Fetch-layer configuration
///
/// The retry constants are operational tuning, not semantic contracts; the
/// defaults are the values the gateway has tolerated for years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Game gateway URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Body substring that marks a transient-busy response
    #[serde(default = "default_busy_marker")]
    pub busy_marker: String,

    /// Total request attempts per logical fetch
    #[serde(default = "default_busy_attempts")]
    pub busy_retry_attempts: u32,

    /// Delay between busy retries in milliseconds
    #[serde(default = "default_busy_delay_ms")]
    pub busy_retry_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    crate::client::GAME_URL.to_string()
}

fn default_busy_marker() -> String {
    crate::client::BUSY_MARKER.to_string()
}

fn default_busy_attempts() -> u32 {
    3
}

fn default_busy_delay_ms() -> u64 {
    200
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            busy_marker: default_busy_marker(),
            busy_retry_attempts: default_busy_attempts(),
            busy_retry_delay_ms: default_busy_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FetchConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get busy-retry delay as Duration
    #[must_use]
    pub fn busy_retry_delay(&self) -> Duration {
        Duration::from_millis(self.busy_retry_delay_ms)
    }
}

/// Schedule configuration (local clock times, `HH:MM`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// First daily round
    #[serde(default = "default_first_round")]
    pub first_round: String,

    /// Second daily round
    #[serde(default = "default_second_round")]
    pub second_round: String,

    /// Hours between cookie-validity checks
    #[serde(default = "default_check_interval")]
    pub check_interval_hours: i64,
}

fn default_first_round() -> String {
    "13:10".to_string()
}

fn default_second_round() -> String {
    "20:01".to_string()
}

fn default_check_interval() -> i64 {
    2
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            first_round: default_first_round(),
            second_round: default_second_round(),
            check_interval_hours: default_check_interval(),
        }
    }
}

fn parse_clock(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .with_context(|| format!("invalid time '{value}', expected HH:MM"))
}

impl ScheduleConfig {
    pub fn first_round_time(&self) -> Result<NaiveTime> {
        parse_clock(&self.first_round)
    }

    pub fn second_round_time(&self) -> Result<NaiveTime> {
        parse_clock(&self.second_round)
    }
}

/// Report delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Push relay endpoint; reports print to stdout when unset
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Delivery timeout in seconds
    #[serde(default = "default_push_timeout")]
    pub timeout_secs: u64,
}

fn default_push_timeout() -> u64 {
    10
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: default_push_timeout(),
        }
    }
}

/// One account entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Account identity
    pub qq: String,

    /// Session cookie
    pub cookie: String,

    /// Per-kind mission list overrides, keyed `one`/`two`; an absent key
    /// means the registry's built-in round list
    #[serde(default)]
    pub missions: HashMap<String, Vec<String>>,

    /// Per-account settings tree consumed by missions
    #[serde(default)]
    pub settings: toml::value::Table,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.schedule.first_round_time()?;
        self.schedule.second_round_time()?;

        if self.schedule.check_interval_hours <= 0 {
            anyhow::bail!("check_interval_hours must be positive");
        }
        if self.fetch.busy_retry_attempts == 0 {
            anyhow::bail!("busy_retry_attempts must be greater than 0");
        }

        for account in &self.accounts {
            if account.qq.is_empty() {
                anyhow::bail!("account qq must not be empty");
            }
            if account.cookie.is_empty() {
                anyhow::bail!("account {} has an empty cookie", account.qq);
            }
            for key in account.missions.keys() {
                let kind: JobKind = key
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!("account {}: {e}", account.qq))?;
                if kind.is_check() {
                    anyhow::bail!("account {}: the check kind has no mission list", account.qq);
                }
            }
        }

        Ok(())
    }

    /// Build the immutable per-account contexts the runner consumes
    pub fn account_contexts(&self) -> Result<Vec<AccountContext>> {
        let mut contexts = Vec::with_capacity(self.accounts.len());

        for account in &self.accounts {
            let mut ctx = AccountContext::new(account.qq.clone(), account.cookie.clone())
                .with_settings(account.settings.clone());
            for (key, ids) in &account.missions {
                let kind: JobKind = key.parse().map_err(anyhow::Error::msg)?;
                ctx = ctx.with_missions(kind, ids.clone());
            }
            contexts.push(ctx);
        }

        Ok(contexts)
    }
}

/// Supplies the account list at the start of every run
///
/// The file-backed source re-reads the configuration on each call, so
/// cookie updates take effect without a restart.
pub trait AccountSource: Send + Sync {
    fn load(&self) -> crate::error::Result<Vec<AccountContext>>;
}

/// Account source backed by the TOML configuration file
pub struct FileAccountSource {
    path: PathBuf,
}

impl FileAccountSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountSource for FileAccountSource {
    fn load(&self) -> crate::error::Result<Vec<AccountContext>> {
        let config = Config::from_file(&self.path).map_err(crate::error::Error::from)?;
        config.validate().map_err(crate::error::Error::from)?;
        let contexts = config
            .account_contexts()
            .map_err(crate::error::Error::from)?;
        Ok(contexts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [schedule]
        first_round = "13:10"
        second_round = "20:01"

        [[accounts]]
        qq = "10001"
        cookie = "uin=o10001; skey=abc"

        [accounts.missions]
        one = ["wish", "arena"]

        [accounts.settings]
        zodiac = 3

        [accounts.settings.mine]
        floor = 1
        mode = 0
    "#;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sample() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert!(config.validate().is_ok());

        // untouched sections fall back to defaults
        assert_eq!(config.fetch.busy_retry_attempts, 3);
        assert_eq!(config.fetch.busy_retry_delay(), Duration::from_millis(200));
        assert_eq!(config.schedule.check_interval_hours, 2);
        assert_eq!(config.accounts.len(), 1);
    }

    #[test]
    fn test_account_contexts_carry_overrides() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let contexts = config.account_contexts().unwrap();

        let account = &contexts[0];
        assert_eq!(account.qq, "10001");
        assert_eq!(
            account.missions_for(JobKind::One).unwrap(),
            ["wish".to_string(), "arena".to_string()]
        );
        assert!(account.missions_for(JobKind::Two).is_none());
        assert_eq!(
            account.setting("mine.floor").and_then(|v| v.as_integer()),
            Some(1)
        );
    }

    #[test]
    fn test_invalid_clock_time_rejected() {
        let config = Config {
            schedule: ScheduleConfig {
                first_round: "13h10".to_string(),
                ..ScheduleConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_check_mission_list_rejected() {
        let mut config: Config = toml::from_str(SAMPLE).unwrap();
        config.accounts[0]
            .missions
            .insert("check".to_string(), vec!["wish".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_cookie_rejected() {
        let mut config: Config = toml::from_str(SAMPLE).unwrap();
        config.accounts[0].cookie.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daledou.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.accounts[0].qq, "10001");

        let source = FileAccountSource::new(&path);
        let accounts = source.load().unwrap();
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = Config::from_file(Path::new("/nonexistent/daledou.toml"));
        assert!(result.is_err());
    }
}
