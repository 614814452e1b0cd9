// src/poller.rs — Refresh the document list while indexing is in flight

use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::infra::errors::ClientError;
use crate::services::DocumentService;
use crate::types::{Document, DocumentStatus};

/// Shortest gap between listings; `tokio::time::interval` rejects zero.
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

pub fn any_processing(documents: &[Document]) -> bool {
    documents
        .iter()
        .any(|d| d.status == DocumentStatus::Processing)
}

/// List documents now, then again every `interval` for as long as any of
/// them is `processing`. Each listing goes to `on_update`; the last one is
/// returned. The first failed listing ends the watch. Intervals below
/// [`MIN_INTERVAL`] are raised to it.
pub async fn watch_processing<F>(
    documents: &DocumentService,
    interval: Duration,
    mut on_update: F,
) -> Result<Vec<Document>, ClientError>
where
    F: FnMut(&[Document]),
{
    let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let mut rounds = 0u32;
    loop {
        let listing = documents.list().await?;
        rounds += 1;
        on_update(&listing);

        if !any_processing(&listing) {
            tracing::debug!("Nothing processing after {rounds} listing(s); stopping watch");
            return Ok(listing);
        }
        ticker.tick().await;
    }
}
