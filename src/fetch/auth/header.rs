use super::SignError;
use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};

/// An [`HttpClient`] wrapper that sets a precomputed `Authorization` header on
/// every request it forwards to `inner`.
///
/// The value is validated once in [`WithAuthorization::new`], so executing a
/// request cannot fail on a bad header.
pub struct WithAuthorization<'a, C> {
    inner: &'a C,
    value: HeaderValue,
}

impl<'a, C> WithAuthorization<'a, C> {
    pub fn new(inner: &'a C, authorization: &str) -> Result<Self, SignError> {
        let mut value =
            HeaderValue::from_str(authorization).map_err(|_| SignError::InvalidHeaderValue)?;
        value.set_sensitive(true);
        Ok(Self { inner, value })
    }
}

#[async_trait]
impl<'a, C: HttpClient> HttpClient for WithAuthorization<'a, C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(AUTHORIZATION, self.value.clone());
        self.inner.execute(req).await
    }
}
