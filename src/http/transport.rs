use anyhow::Result;
use async_trait::async_trait;

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs single requests against the registry.
///
/// `label` describes the request ("Listing nodes", "Creating class web") and is
/// only used for logging and error messages. Any status code is a successful
/// transport outcome; interpreting it is up to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, label: &str) -> Result<HttpResponse>;
    async fn post(&self, path: &str, label: &str, body: &serde_json::Value)
    -> Result<HttpResponse>;
}
