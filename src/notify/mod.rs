//! Run-report delivery channels
//!
//! A notifier receives one finished report per (account, job-kind) run.
//! Delivery failures are the caller's to log; the core never retries them.

pub mod webhook;

pub use webhook::WebhookNotifier;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::JobKind;

/// Errors that can occur while delivering a report
#[derive(Error, Debug)]
pub enum NotifyError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("push endpoint returned status {0}")]
    Status(u16),

    /// Invalid notifier configuration
    #[error("invalid notifier configuration: {0}")]
    Config(String),
}

/// Delivers one finished run report
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, account: &str, kind: JobKind, text: &str) -> Result<(), NotifyError>;
}

/// Prints reports to stdout; used by webhook-less configurations
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, account: &str, kind: JobKind, text: &str) -> Result<(), NotifyError> {
        println!("------------ {account} {kind} ------------");
        println!("{text}");
        Ok(())
    }
}
