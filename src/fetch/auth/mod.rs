//! Request authorization.
//!
//! A [`Signer`] turns [`Credentials`] plus the request target into the value
//! of the `Authorization` header. [`WithAuthorization`] attaches that value to
//! every request sent through an inner [`HttpClient`](super::HttpClient).

mod header;
mod signer;

pub use header::WithAuthorization;
pub use signer::{Clock, FixedClock, HmacSigner, SystemClock};

use crate::infra::keys::Credentials;
use reqwest::{Method, Url};

/// Authentication-configuration errors. A signer never produces a header it
/// could not build correctly.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignError {
    #[error("API key is empty")]
    EmptyKey,
    #[error("API secret is empty")]
    EmptySecret,
    #[error("API key contains characters not allowed in an Authorization header")]
    MalformedKey,
    #[error("Authorization value is not a valid header value")]
    InvalidHeaderValue,
}

/// Computes the `Authorization` header value for a request.
pub trait Signer: Send + Sync {
    fn authorization(
        &self,
        credentials: &Credentials,
        method: &Method,
        url: &Url,
    ) -> Result<String, SignError>;
}
