/// SSM parameter paths of the API key and secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialNames {
    pub key: String,
    pub secret: String,
}

impl CredentialNames {
    pub const DEFAULT_KEY: &'static str = "/config/api/root/key";
    pub const DEFAULT_SECRET: &'static str = "/config/api/root/secret";

    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl Default for CredentialNames {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY, Self::DEFAULT_SECRET)
    }
}
