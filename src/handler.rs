//! Lambda entry point glue.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::error;

use crate::fetch::HttpClient;
use crate::fetch::auth::Signer;
use crate::forwarder::{Forwarder, Invocation};
use crate::infra::keys::KeyStore;
use crate::response::ProxyResponse;

/// Handles one Lambda event. The payload is not inspected.
pub async fn handle<K, S, C>(
    forwarder: &Forwarder<K, S, C>,
    event: LambdaEvent<Value>,
) -> Result<ProxyResponse, Error>
where
    K: KeyStore,
    S: Signer,
    C: HttpClient,
{
    let invocation = Invocation::new(event.context.request_id);
    invoke(forwarder, &invocation).await
}

/// Forwards once and converts a failure into a Lambda invocation error.
pub async fn invoke<K, S, C>(
    forwarder: &Forwarder<K, S, C>,
    invocation: &Invocation,
) -> Result<ProxyResponse, Error>
where
    K: KeyStore,
    S: Signer,
    C: HttpClient,
{
    match forwarder.forward(invocation).await {
        Ok(response) => Ok(response),
        Err(e) => {
            let message = format!("{e:#}");
            invocation.span.in_scope(|| {
                error!(
                    request_id = %invocation.request_id,
                    error = %message,
                    "Invocation failed"
                )
            });
            Err(e.into())
        }
    }
}
