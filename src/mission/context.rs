//! Per-(account, job-kind) execution state

use chrono::{DateTime, Datelike, Local};
use tracing::info;

use super::{MissionError, MissionResult};
use crate::client::{FetchError, Fetcher};
use crate::extract;
use crate::models::AccountContext;

/// Mutable state threaded through one account's run of one job kind
///
/// Carries the latest payload, the current mission tag, the ordered report
/// buffer and the run start time. One instance exists per (account,
/// job-kind) execution and is discarded once the report is emitted; nothing
/// survives across runs.
pub struct MissionContext<'a> {
    account: &'a AccountContext,
    fetcher: &'a Fetcher,
    payload: String,
    current_mission: String,
    buffer: Vec<String>,
    started_at: DateTime<Local>,
}

impl<'a> MissionContext<'a> {
    pub fn new(account: &'a AccountContext, fetcher: &'a Fetcher) -> Self {
        Self {
            account,
            fetcher,
            payload: String::new(),
            current_mission: String::new(),
            buffer: Vec::new(),
            started_at: Local::now(),
        }
    }

    pub fn account(&self) -> &AccountContext {
        self.account
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Day of month at run start; missions gate monthly behavior on it
    pub fn day_of_month(&self) -> u32 {
        self.started_at.day()
    }

    /// ISO weekday (1 = Monday .. 7 = Sunday) at run start
    pub fn weekday(&self) -> u32 {
        self.started_at.weekday().number_from_monday()
    }

    /// Set by the runner immediately before each mission invocation so
    /// extraction audit lines carry the right tag
    pub fn set_current_mission(&mut self, id: &str) {
        self.current_mission = id.to_string();
    }

    pub fn current_mission(&self) -> &str {
        &self.current_mission
    }

    /// Issue one logical GET; the active payload is overwritten with the
    /// returned body before control comes back to the mission.
    pub async fn fetch(&mut self, params: &str) -> Result<&str, FetchError> {
        let fetcher = self.fetcher;
        let account = self.account;
        let body = fetcher.get(&account.cookie, params).await?;
        self.payload = body;
        Ok(&self.payload)
    }

    /// Latest response body
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Whether the payload contains a substring
    pub fn has(&self, needle: &str) -> bool {
        self.payload.contains(needle)
    }

    /// First capture group in the payload, audit-logged under the current
    /// mission tag. Every call logs, match or not; this is the run's only
    /// execution trace.
    pub fn extract_first(&self, pattern: &str) -> Option<String> {
        let result = extract::first_capture(pattern, &self.payload);
        self.audit(&self.current_mission, result.as_deref());
        result
    }

    /// Like [`extract_first`](Self::extract_first) with an explicit label
    /// for sub-steps inside one mission
    pub fn extract_first_as(&self, pattern: &str, label: &str) -> Option<String> {
        let result = extract::first_capture(pattern, &self.payload);
        self.audit(label, result.as_deref());
        result
    }

    /// Every capture-group match in document order; bulk scans are not
    /// mission milestones and are not logged
    pub fn extract_all(&self, pattern: &str) -> Vec<String> {
        extract::all_captures(pattern, &self.payload)
    }

    fn audit(&self, label: &str, result: Option<&str>) {
        info!("{} | {}: {}", self.account.qq, label, result.unwrap_or("null"));
    }

    /// Append a report line; empty lines are dropped
    pub fn append(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !line.is_empty() {
            self.buffer.push(line);
        }
    }

    /// Append an extraction result when it matched
    pub fn append_opt(&mut self, line: Option<String>) {
        if let Some(line) = line {
            self.append(line);
        }
    }

    pub fn buffer(&self) -> &[String] {
        &self.buffer
    }

    /// Consume the context, yielding the ordered report lines
    pub fn into_buffer(self) -> Vec<String> {
        self.buffer
    }

    /// Settings value for this account by dotted key path
    pub fn setting(&self, key: &str) -> Option<&toml::Value> {
        self.account.setting(key)
    }

    pub fn setting_i64(&self, key: &str) -> Option<i64> {
        self.setting(key).and_then(|v| v.as_integer())
    }

    /// Integer setting a mission cannot run without
    pub fn require_i64(&self, key: &str) -> MissionResult<i64> {
        self.setting_i64(key).ok_or_else(|| {
            MissionError::Setting(format!(
                "missing integer setting `{key}` for account {}",
                self.account.qq
            ))
        })
    }
}
