//! Runtime configuration read from the environment.

use anyhow::{Context, Result};
use reqwest::Url;

use crate::infra::keys::CredentialNames;

/// Used when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://api.colourbox.com/docs-internal.yml";

pub const API_URL_VAR: &str = "API_URL";
pub const KEY_PARAMETER_VAR: &str = "API_KEY_PARAMETER";
pub const SECRET_PARAMETER_VAR: &str = "API_SECRET_PARAMETER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub upstream_url: Url,
    pub credentials: CredentialNames,
}

impl ProxyConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first for local runs.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let raw_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let upstream_url = raw_url
            .trim()
            .parse::<Url>()
            .with_context(|| format!("{API_URL_VAR} is not a valid URL: '{raw_url}'"))?;

        let defaults = CredentialNames::default();
        let credentials = CredentialNames::new(
            get(KEY_PARAMETER_VAR).unwrap_or(defaults.key),
            get(SECRET_PARAMETER_VAR).unwrap_or(defaults.secret),
        );

        Ok(Self {
            upstream_url,
            credentials,
        })
    }

    pub fn with_upstream_url(mut self, url: Url) -> Self {
        self.upstream_url = url;
        self
    }
}
