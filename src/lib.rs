//! daledou - scheduled daily-mission automation for the DaLeDou web game
//!
//! Runs an ordered set of missions for every configured account on a fixed
//! daily schedule and pushes one consolidated report per account per run.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - TOML configuration and account loading
//! - [`client`] - HTTP fetch primitive with transient-busy retry
//! - [`extract`] - capture-group extraction over game payloads
//! - [`mission`] - mission contract, execution context and registry
//! - [`runner`] - per-account job execution and report assembly
//! - [`scheduler`] - tick loop with daily and interval triggers
//! - [`notify`] - report delivery channels
//! - [`models`] - core data structures and types
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use daledou::client::Fetcher;
//! use daledou::config::{Config, FileAccountSource};
//! use daledou::mission::MissionRegistry;
//! use daledou::models::JobKind;
//! use daledou::notify::ConsoleNotifier;
//! use daledou::runner::JobRunner;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_file("daledou.toml".as_ref())?;
//!     config.validate()?;
//!
//!     let runner = JobRunner::new(
//!         Fetcher::new(&config.fetch)?,
//!         MissionRegistry::builtin(),
//!         Arc::new(ConsoleNotifier),
//!     );
//!     let source = FileAccountSource::new("daledou.toml");
//!     runner.run(JobKind::One, &source).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod mission;
pub mod models;
pub mod notify;
pub mod runner;
pub mod scheduler;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::Fetcher;
    pub use crate::config::{AccountSource, Config, FileAccountSource};
    pub use crate::error::{Error, Result};
    pub use crate::mission::{Mission, MissionContext, MissionError, MissionRegistry};
    pub use crate::models::{AccountContext, JobKind};
    pub use crate::notify::Notifier;
    pub use crate::runner::{JobRunner, Report};
    pub use crate::scheduler::{Scheduler, Trigger};
}

// Direct re-exports for convenience
pub use models::{AccountContext, JobKind};
