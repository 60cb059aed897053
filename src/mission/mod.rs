//! Mission contract, execution context and registry
//!
//! A mission is one unit of domain logic executed against a
//! [`MissionContext`]: it fetches game pages, branches on payload
//! substrings, extracts outcome lines and appends them to the report
//! buffer. Missions are resolved by id through the [`MissionRegistry`] and
//! invoked in the fixed order registered for the job kind.
//!
//! Payload substring branching is intrinsic to the domain (the game is only
//! knowable through its rendered text) and stays inside mission
//! implementations; the core primitives never interpret payload content
//! beyond the transient-busy marker.

pub mod context;
pub mod daily;
pub mod registry;
pub mod second;

pub use context::MissionContext;
pub use registry::MissionRegistry;

use async_trait::async_trait;
use thiserror::Error;

use crate::client::FetchError;

/// Errors a mission can raise; all of them abort only the remaining
/// missions of the current account's run.
#[derive(Error, Debug)]
pub enum MissionError {
    /// The mission cannot usefully continue for this account
    #[error("mission aborted: {0}")]
    Fatal(String),

    /// A required per-account setting is missing or has the wrong shape
    #[error("account setting invalid: {0}")]
    Setting(String),

    /// Transport failure below the mission layer
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Result type alias for mission execution
pub type MissionResult<T> = Result<T, MissionError>;

/// One externally-registered unit of game logic
///
/// Implementations append human-readable outcome lines via the context;
/// "nothing to do" is expressed by appending an explanatory line, not by an
/// error. The runner sets the context's current mission tag before `run` so
/// extraction audit lines are attributed correctly.
#[async_trait]
pub trait Mission: Send + Sync {
    /// Registry key, also the audit-log tag
    fn id(&self) -> &'static str;

    /// In-game feature title used as the report section header
    fn title(&self) -> &'static str;

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()>;
}
