//! Download of remote workbooks over HTTP.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Downloads `url` and returns the response body.
///
/// # Errors
///
/// Fails on transport errors and on non-success HTTP status codes.
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let fetch_start = std::time::Instant::now();
    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();

    let elapsed = fetch_start.elapsed();
    if elapsed.as_secs() > 15 {
        warn!(elapsed_secs = elapsed.as_secs(), "Workbook download was slow");
    }
    debug!(bytes = bytes.len(), "Workbook downloaded");
    Ok(bytes)
}
