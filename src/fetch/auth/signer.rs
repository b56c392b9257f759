use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Method, Url};
use sha2::Sha256;
use std::sync::Arc;

use super::{SignError, Signer};
use crate::infra::keys::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// Source of the signing timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// HMAC-SHA256 request signer.
///
/// The canonical string is `"{METHOD}\n{URL}\n{unix_seconds}"`, keyed with the
/// API secret. The resulting header reads:
///
/// ```text
/// HMAC-SHA256 Credential=<key>, Timestamp=<unix_seconds>, Signature=<hex>
/// ```
///
/// Output only varies with the clock, so a [`FixedClock`] makes it fully
/// deterministic.
#[derive(Clone)]
pub struct HmacSigner {
    clock: Arc<dyn Clock>,
}

impl HmacSigner {
    pub const SCHEME: &'static str = "HMAC-SHA256";

    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    fn canonical_request(method: &Method, url: &Url, timestamp: i64) -> String {
        format!("{}\n{}\n{}", method.as_str(), url.as_str(), timestamp)
    }
}

impl Default for HmacSigner {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(credentials: &Credentials) -> Result<(), SignError> {
    if credentials.key.is_empty() {
        return Err(SignError::EmptyKey);
    }
    if credentials.secret.is_empty() {
        return Err(SignError::EmptySecret);
    }
    // The key is written verbatim into the header's parameter list.
    let bad_char = |c: char| !c.is_ascii_graphic() || c == ',' || c == '=';
    if credentials.key.chars().any(bad_char) {
        return Err(SignError::MalformedKey);
    }
    Ok(())
}

impl Signer for HmacSigner {
    fn authorization(
        &self,
        credentials: &Credentials,
        method: &Method,
        url: &Url,
    ) -> Result<String, SignError> {
        validate(credentials)?;

        let timestamp = self.clock.now().timestamp();
        let canonical = Self::canonical_request(method, url, timestamp);

        let mut mac = HmacSha256::new_from_slice(credentials.secret.as_bytes())
            .map_err(|_| SignError::EmptySecret)?;
        mac.update(canonical.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!(
            "{} Credential={}, Timestamp={}, Signature={}",
            Self::SCHEME,
            credentials.key,
            timestamp,
            signature
        ))
    }
}
