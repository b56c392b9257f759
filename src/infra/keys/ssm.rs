use anyhow::{Result, anyhow};
use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use tracing::debug;

use super::KeyStore;

/// [`KeyStore`] backed by SSM Parameter Store.
///
/// Every lookup asks for decryption, so `SecureString` parameters come back as
/// plaintext. The function role needs `ssm:GetParameter` and `kms:Decrypt`.
pub struct SsmKeyStore {
    client: aws_sdk_ssm::Client,
}

impl SsmKeyStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self::from_client(aws_sdk_ssm::Client::new(config))
    }

    pub fn from_client(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl KeyStore for SsmKeyStore {
    async fn get(&self, reference: &str) -> Result<String> {
        let output = self
            .client
            .get_parameter()
            .name(reference)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                GetParameterError::ParameterNotFound(_) => {
                    anyhow!("SSM parameter '{reference}' does not exist")
                }
                other => anyhow::Error::new(other)
                    .context(format!("SSM GetParameter '{reference}' failed")),
            })?;

        let parameter = output
            .parameter
            .ok_or_else(|| anyhow!("SSM GetParameter '{reference}' returned no parameter"))?;
        debug!(parameter = %reference, kind = ?parameter.r#type, "SSM parameter resolved");

        parameter
            .value
            .ok_or_else(|| anyhow!("SSM parameter '{reference}' has no value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ssm::config::{BehaviorVersion, Credentials, Region};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const AMZ_JSON: &str = "application/x-amz-json-1.1";

    fn store(server: &MockServer) -> SsmKeyStore {
        let creds = Credentials::new("test", "test", None, None, "unit-test");

        let config = aws_sdk_ssm::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(creds)
            .endpoint_url(server.uri())
            .build();

        SsmKeyStore::from_client(aws_sdk_ssm::Client::from_conf(config))
    }

    fn ssm_json(status: u16, body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_raw(body.to_string(), AMZ_JSON)
    }

    #[tokio::test]
    async fn test_get_requests_decryption() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", "AmazonSSM.GetParameter"))
            .and(body_partial_json(json!({
                "Name": "/config/api/root/secret",
                "WithDecryption": true
            })))
            .respond_with(ssm_json(
                200,
                json!({
                    "Parameter": {
                        "Name": "/config/api/root/secret",
                        "Type": "SecureString",
                        "Value": "plaintext",
                        "Version": 3
                    }
                }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let value = store(&server).get("/config/api/root/secret").await.unwrap();
        assert_eq!(value, "plaintext");
    }

    #[tokio::test]
    async fn test_parameter_without_value_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ssm_json(
                200,
                json!({ "Parameter": { "Name": "/config/api/root/key", "Type": "String" } }),
            ))
            .mount(&server)
            .await;

        let err = store(&server).get("/config/api/root/key").await.unwrap_err();
        assert!(err.to_string().contains("has no value"));
    }

    #[tokio::test]
    async fn test_missing_parameter_names_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ssm_json(
                400,
                json!({ "__type": "ParameterNotFound", "message": "not found" }),
            ))
            .mount(&server)
            .await;

        let err = store(&server).get("/config/api/root/key").await.unwrap_err();
        assert!(err.to_string().contains("'/config/api/root/key' does not exist"));
    }

    #[tokio::test]
    async fn test_service_error_keeps_parameter_context() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ssm_json(
                400,
                json!({ "__type": "AccessDeniedException", "message": "not authorized" }),
            ))
            .mount(&server)
            .await;

        let err = store(&server).get("/config/api/root/secret").await.unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.contains("'/config/api/root/secret'"));
        assert!(err.downcast_ref::<GetParameterError>().is_some());
    }
}
