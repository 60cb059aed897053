//! Cooperative tick-loop scheduler
//!
//! One logical thread of control: the loop sleeps for a tick, evaluates
//! every trigger against the wall clock, and runs a fired job synchronously
//! before the next tick. Job errors are logged and never abort the loop;
//! the loop itself runs until the process receives ctrl-c.

pub mod trigger;

pub use trigger::Trigger;

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::config::{AccountSource, ScheduleConfig};
use crate::models::JobKind;
use crate::runner::JobRunner;

const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Tick-driven trigger evaluation and job dispatch
pub struct Scheduler {
    entries: Vec<(Trigger, JobKind)>,
    tick: Duration,
}

impl Scheduler {
    pub fn new(entries: Vec<(Trigger, JobKind)>) -> Self {
        Self {
            entries,
            tick: DEFAULT_TICK,
        }
    }

    /// Build the standard schedule: interval cookie checks plus the two
    /// fixed-time daily rounds, anchored to the current clock
    ///
    /// # Errors
    ///
    /// Fails when a configured clock time does not parse as `HH:MM`.
    pub fn from_config(config: &ScheduleConfig) -> anyhow::Result<Self> {
        let now = Local::now();
        let entries = vec![
            (
                Trigger::every(chrono::Duration::hours(config.check_interval_hours), now),
                JobKind::Check,
            ),
            (Trigger::daily(config.first_round_time()?, now), JobKind::One),
            (Trigger::daily(config.second_round_time()?, now), JobKind::Two),
        ];
        Ok(Self::new(entries))
    }

    /// Override the tick period (tests)
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Job kinds whose trigger fired at `now`; each satisfied trigger is
    /// consumed for its current period
    pub fn due(&mut self, now: DateTime<Local>) -> Vec<JobKind> {
        self.entries
            .iter_mut()
            .filter_map(|(trigger, kind)| trigger.poll(now).then_some(*kind))
            .collect()
    }

    /// Startup check, then tick until ctrl-c
    ///
    /// A fired trigger blocks the loop until its job completes; triggers
    /// that become satisfied meanwhile fire on the next tick.
    pub async fn run(&mut self, runner: &JobRunner, source: &dyn AccountSource) {
        info!("running startup cookie check");
        if let Err(e) = runner.run(JobKind::Check, source).await {
            error!(error = %e, "startup check failed");
        }

        info!("entering tick loop");
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.tick) => {
                    for kind in self.due(Local::now()) {
                        info!(kind = %kind, "trigger fired");
                        if let Err(e) = runner.run(kind, source).await {
                            error!(kind = %kind, error = %e, "job run failed");
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }
    }
}
