use chrono::Utc;
use readiness_consensus::{Report, SnapshotProcessor};
use readiness_core::SnapshotError;
use reqwest::blocking::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Fetch one snapshot from the feed and turn it into a report
pub fn fetch_report(
    client: &Client,
    feed_url: &str,
    processor: &SnapshotProcessor,
) -> Result<Report, FeedError> {
    let body = client.get(feed_url).send()?.error_for_status()?.text()?;
    log::debug!("Fetched {} bytes from {}", body.len(), feed_url);

    let report = processor.process_json(&body, Utc::now())?;
    Ok(report)
}
