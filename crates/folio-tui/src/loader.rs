//! Background gallery loading
//!
//! Stands in for a network fetch of the gallery's page list: a task sleeps
//! for the configured delay and reports the page count over a channel.

use std::time::Duration;

use tokio::sync::mpsc;

/// Result of an async gallery load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// Page count is known
    Ready { pages: usize },
    /// Load failed
    Failure { error: String },
}

/// Spawn a load that reports `pages` after `delay_ms`.
/// A zero page count still succeeds; the gallery shows its empty message.
pub fn spawn_gallery_load(
    pages: usize,
    delay_ms: u64,
    tx: mpsc::UnboundedSender<LoadResult>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        tracing::debug!(pages, "Gallery loaded");
        let _ = tx.send(LoadResult::Ready { pages });
    })
}

/// Spawn a load that fails with `error` after `delay_ms`
pub fn spawn_failing_load(
    error: String,
    delay_ms: u64,
    tx: mpsc::UnboundedSender<LoadResult>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        tracing::warn!(%error, "Gallery load failed");
        let _ = tx.send(LoadResult::Failure { error });
    })
}
