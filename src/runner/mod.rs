//! Per-account job execution
//!
//! The runner iterates accounts strictly sequentially: concurrent requests
//! under sibling sessions look like automation to the game's own defenses.
//! A failure inside one mission aborts only the remaining missions of that
//! account's current run; the next account always starts with a fresh
//! context, and nothing propagates up to the scheduler.

pub mod report;

pub use report::Report;

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, info_span, warn, Instrument};

use crate::client::Fetcher;
use crate::config::AccountSource;
use crate::mission::{MissionContext, MissionRegistry};
use crate::models::{AccountContext, JobKind};
use crate::notify::Notifier;

/// Relogin prompt present in the index payload once the cookie has expired
const RELOGIN_MARKER: &str = "重新登录";

/// Executes one job kind across every account
pub struct JobRunner {
    fetcher: Fetcher,
    registry: MissionRegistry,
    notifier: Arc<dyn Notifier>,
}

impl JobRunner {
    pub fn new(fetcher: Fetcher, registry: MissionRegistry, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            fetcher,
            registry,
            notifier,
        }
    }

    /// Run one job kind for every account, in order
    ///
    /// For the check kind each account gets a lightweight cookie probe and
    /// no report. For every other kind the account's mission list runs
    /// against a fresh context, the report is assembled, and the notifier
    /// is invoked exactly once per account.
    ///
    /// # Errors
    ///
    /// Only an account-source failure surfaces here; per-account and
    /// per-mission failures are contained inside the loop.
    pub async fn run(&self, kind: JobKind, source: &dyn AccountSource) -> crate::error::Result<()> {
        let accounts = source.load()?;
        info!(kind = %kind, accounts = accounts.len(), "job starting");

        for account in &accounts {
            if kind.is_check() {
                self.check_account(account).await;
            } else {
                self.run_account(kind, account).await;
            }
        }
        Ok(())
    }

    /// Run an explicit mission list once per account, returning the
    /// rendered report per account instead of notifying
    pub async fn run_adhoc(
        &self,
        ids: &[String],
        source: &dyn AccountSource,
    ) -> crate::error::Result<Vec<(String, String)>> {
        let accounts = source.load()?;
        let mut reports = Vec::with_capacity(accounts.len());

        for account in &accounts {
            let span = info_span!("job", account = %account.qq, kind = "dev");
            let report = self.execute(account, ids).instrument(span).await;
            reports.push((account.qq.clone(), report.render()));
        }
        Ok(reports)
    }

    async fn run_account(&self, kind: JobKind, account: &AccountContext) {
        let ids: Vec<String> = match account.missions_for(kind) {
            Some(ids) => ids.to_vec(),
            None => MissionRegistry::default_round(kind)
                .iter()
                .map(|id| id.to_string())
                .collect(),
        };

        let span = info_span!("job", account = %account.qq, kind = %kind);
        let report = self.execute(account, &ids).instrument(span).await;

        // Delivery failures are logged, never retried.
        if let Err(e) = self.notifier.send(&account.qq, kind, &report.render()).await {
            error!(account = %account.qq, kind = %kind, error = %e, "report delivery failed");
        }
    }

    /// Execute an ordered mission list against a fresh context
    async fn execute(&self, account: &AccountContext, ids: &[String]) -> Report {
        let clock = Instant::now();
        let mut ctx = MissionContext::new(account, &self.fetcher);

        for id in ids {
            let Some(mission) = self.registry.get(id) else {
                warn!(mission = %id, "unknown mission id, skipping");
                continue;
            };

            ctx.set_current_mission(mission.id());
            ctx.append(format!("【{}】", mission.title()));
            info!(mission = mission.id(), "mission starting");

            if let Err(e) = mission.run(&mut ctx).await {
                warn!(
                    mission = mission.id(),
                    error = %e,
                    "mission failed, aborting the rest of this account's run"
                );
                ctx.append(format!("任务中断：{e}"));
                break;
            }
        }

        let started_at = ctx.started_at();
        Report::new(started_at, clock.elapsed().as_secs(), ctx.into_buffer())
    }

    /// Cookie-validity probe: fetch the index page and look for the relogin
    /// prompt. Logs only; no report, no notification.
    async fn check_account(&self, account: &AccountContext) {
        match self.fetcher.get(&account.cookie, "cmd=index").await {
            Ok(body) if body.contains(RELOGIN_MARKER) => {
                warn!(account = %account.qq, "cookie expired");
            }
            Ok(_) => {
                info!(account = %account.qq, "cookie valid");
            }
            Err(e) => {
                warn!(account = %account.qq, error = %e, "cookie check failed");
            }
        }
    }
}
