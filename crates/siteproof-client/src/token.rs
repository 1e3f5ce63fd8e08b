//! The authenticated-identity seam.

use async_trait::async_trait;

/// Where live-mode calls get their bearer token. The identity provider
/// behind this trait refreshes tokens as it sees fit; the client asks for
/// a fresh one on every call and attaches whatever comes back.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// A fixed token, for operator use and tests (e.g. an ID token exported to
/// the environment).
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn bearer_token(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.token.clone())
    }
}
