mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode, Url};
use tracing::debug;

/// Raised when the upstream answers with anything other than 2xx.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream {url} returned status {status}")]
    Status { status: StatusCode, url: Url },
}

/// Body and status of a successful upstream GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamDocument {
    pub status: StatusCode,
    pub body: String,
}

/// Issues a GET for `url` and returns the body as text.
///
/// # Errors
///
/// Fails on transport errors, on a non-2xx status ([`UpstreamError::Status`])
/// and when the body cannot be read.
#[tracing::instrument(skip_all, fields(url = %url))]
pub async fn fetch_document<C: HttpClient>(client: &C, url: &Url) -> Result<UpstreamDocument> {
    let req = reqwest::Request::new(Method::GET, url.clone());

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("GET {url} failed"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(UpstreamError::Status {
            status,
            url: url.clone(),
        }
        .into());
    }

    let body = resp
        .text()
        .await
        .with_context(|| format!("failed to read body from {url}"))?;
    debug!(%status, bytes = body.len(), "Upstream document received");

    Ok(UpstreamDocument { status, body })
}
