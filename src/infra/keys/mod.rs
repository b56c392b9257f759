//! API credential management.
//!
//! [`CredentialNames`] holds the SSM parameter paths of the API key and secret.
//! [`KeyStore`] is the async trait for resolving a reference into its plaintext value.
//! [`SsmKeyStore`] implements [`KeyStore`] using AWS SSM Parameter Store.
//! [`CredentialProvider`] combines the two into a [`Credentials`] pair.

mod config;
mod ssm;

pub use config::CredentialNames;
pub use ssm::SsmKeyStore;

use anyhow::{Context, Result, bail};
use std::fmt;
use tracing::info;

/// Resolves a vault reference (e.g. an SSM parameter path) into a plaintext secret.
#[async_trait::async_trait]
pub trait KeyStore: Send + Sync {
    async fn get(&self, reference: &str) -> Result<String>;
}

/// The API key and secret used to sign upstream requests.
///
/// Lives only for the duration of one invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Fetches a fresh [`Credentials`] pair from a [`KeyStore`] on every call.
pub struct CredentialProvider<K> {
    store: K,
    names: CredentialNames,
}

impl<K: KeyStore> CredentialProvider<K> {
    pub fn new(store: K, names: CredentialNames) -> Self {
        Self { store, names }
    }

    /// Looks up the key, then the secret. Nothing is cached between calls.
    pub async fn fetch(&self) -> Result<Credentials> {
        let key = self.resolve(&self.names.key).await?;
        info!(parameter = %self.names.key, "Found API key");

        let secret = self.resolve(&self.names.secret).await?;
        info!(parameter = %self.names.secret, "Found API secret");

        Ok(Credentials { key, secret })
    }

    async fn resolve(&self, reference: &str) -> Result<String> {
        let value = self
            .store
            .get(reference)
            .await
            .with_context(|| format!("failed to resolve credential '{reference}'"))?;

        if value.is_empty() {
            bail!("credential '{reference}' is empty");
        }
        Ok(value)
    }
}
