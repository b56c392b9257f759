//! The per-invocation pipeline: fetch credentials, sign, send the request,
//! relay the document.

use anyhow::{Context, Result};
use reqwest::{Method, Url};
use tracing::{Instrument, Span, info};

use crate::fetch::auth::{Signer, WithAuthorization};
use crate::fetch::{HttpClient, fetch_document};
use crate::infra::keys::{CredentialProvider, KeyStore};
use crate::response::ProxyResponse;

/// Per-invocation context. Every log line emitted while forwarding is
/// recorded inside `span`.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub request_id: String,
    pub span: Span,
}

impl Invocation {
    pub fn new(request_id: impl Into<String>) -> Self {
        let request_id = request_id.into();
        let span = tracing::info_span!("invocation", request_id = %request_id);
        Self { request_id, span }
    }
}

pub struct Forwarder<K, S, C> {
    credentials: CredentialProvider<K>,
    signer: S,
    client: C,
    upstream_url: Url,
}

impl<K, S, C> Forwarder<K, S, C>
where
    K: KeyStore,
    S: Signer,
    C: HttpClient,
{
    pub fn new(credentials: CredentialProvider<K>, signer: S, client: C, upstream_url: Url) -> Self {
        Self {
            credentials,
            signer,
            client,
            upstream_url,
        }
    }

    pub fn upstream_url(&self) -> &Url {
        &self.upstream_url
    }

    /// Runs one invocation end to end. Any stage failing aborts the whole
    /// invocation; there are no retries.
    pub async fn forward(&self, invocation: &Invocation) -> Result<ProxyResponse> {
        self.run().instrument(invocation.span.clone()).await
    }

    async fn run(&self) -> Result<ProxyResponse> {
        let credentials = self
            .credentials
            .fetch()
            .await
            .context("failed to fetch API credentials")?;

        let authorization = self
            .signer
            .authorization(&credentials, &Method::GET, &self.upstream_url)
            .context("failed to sign upstream request")?;
        drop(credentials);

        let client = WithAuthorization::new(&self.client, &authorization)
            .context("failed to sign upstream request")?;

        info!(url = %self.upstream_url, "Sending upstream request");
        let document = fetch_document(&client, &self.upstream_url).await?;
        info!(status = %document.status, bytes = document.body.len(), "Upstream request returned");

        Ok(ProxyResponse::yaml(document.body))
    }
}
