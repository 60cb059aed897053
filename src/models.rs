//! Core data structures shared across the crate

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named category selecting which ordered mission list runs.
///
/// `One` and `Two` are the two user-visible daily rounds; `Check` is the
/// maintenance cookie probe that never produces a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// First daily round (default 13:10)
    One,
    /// Second daily round (default 20:01)
    Two,
    /// Cookie-validity probe, no report
    Check,
}

impl JobKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
            Self::Check => "check",
        }
    }

    /// Whether this kind is the maintenance probe
    pub fn is_check(&self) -> bool {
        matches!(self, Self::Check)
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one" => Ok(Self::One),
            "two" => Ok(Self::Two),
            "check" => Ok(Self::Check),
            other => Err(format!("unknown job kind `{other}` (expected one, two or check)")),
        }
    }
}

/// Per-account state read by the core for the duration of a run.
///
/// Owned by the configuration layer; the core never mutates it. The
/// `settings` table carries per-account tunables consumed by missions,
/// addressed with dotted keys (`mine.floor`).
#[derive(Debug, Clone)]
pub struct AccountContext {
    /// Account identity, used for log attribution and report routing
    pub qq: String,

    /// Session credential sent as the Cookie header on every request
    pub cookie: String,

    settings: toml::value::Table,

    missions: HashMap<JobKind, Vec<String>>,
}

impl AccountContext {
    /// Create an account context with empty settings and default mission lists
    pub fn new(qq: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            qq: qq.into(),
            cookie: cookie.into(),
            settings: toml::value::Table::new(),
            missions: HashMap::new(),
        }
    }

    /// Attach the per-account settings table
    pub fn with_settings(mut self, settings: toml::value::Table) -> Self {
        self.settings = settings;
        self
    }

    /// Override the mission list for a job kind
    pub fn with_missions(mut self, kind: JobKind, ids: Vec<String>) -> Self {
        self.missions.insert(kind, ids);
        self
    }

    /// Mission ids enabled for a job kind; `None` means the registry's
    /// built-in round list applies.
    pub fn missions_for(&self, kind: JobKind) -> Option<&[String]> {
        self.missions.get(&kind).map(|ids| ids.as_slice())
    }

    /// Look up a settings value by dotted key path
    pub fn setting(&self, key: &str) -> Option<&toml::Value> {
        let mut parts = key.split('.');
        let mut value = self.settings.get(parts.next()?)?;
        for part in parts {
            value = value.as_table()?.get(part)?;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_kind_roundtrip() {
        for kind in [JobKind::One, JobKind::Two, JobKind::Check] {
            assert_eq!(kind.as_str().parse::<JobKind>().unwrap(), kind);
        }
        assert!("three".parse::<JobKind>().is_err());
    }

    #[test]
    fn test_job_kind_is_check() {
        assert!(JobKind::Check.is_check());
        assert!(!JobKind::One.is_check());
    }

    #[test]
    fn test_setting_dotted_lookup() {
        let table: toml::value::Table = toml::from_str(
            r#"
            zodiac = 3

            [mine]
            floor = 1
            mode = 0
            "#,
        )
        .unwrap();

        let account = AccountContext::new("10001", "uin=test").with_settings(table);

        assert_eq!(account.setting("zodiac").and_then(|v| v.as_integer()), Some(3));
        assert_eq!(
            account.setting("mine.floor").and_then(|v| v.as_integer()),
            Some(1)
        );
        assert!(account.setting("mine.depth").is_none());
        assert!(account.setting("arena").is_none());
    }

    #[test]
    fn test_missions_for_falls_back_to_none() {
        let account = AccountContext::new("10001", "uin=test")
            .with_missions(JobKind::One, vec!["wish".to_string()]);

        assert_eq!(account.missions_for(JobKind::One).unwrap(), ["wish".to_string()]);
        assert!(account.missions_for(JobKind::Two).is_none());
    }
}
