//! The structured object returned to API Gateway.

use serde::Serialize;
use std::collections::BTreeMap;

/// Headers attached to every successful response. Upstream headers are never
/// copied through.
pub const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/x-yaml"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET"),
    ("Access-Control-Allow-Headers", "Content-type, api_key, Authorization"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl ProxyResponse {
    /// A 200 response carrying `body` verbatim with the fixed header set.
    pub fn yaml(body: String) -> Self {
        Self {
            status_code: 200,
            body,
            headers: RESPONSE_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
