//! HTTP client for the research service.
//!
//! One POST per question, JSON in and out. No retries, no streaming.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;

use super::{AnsweringService, ResearchError, ResearchRequest, ResearchResponse};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/research";

/// Research service reached over HTTP.
pub struct HttpResearchClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpResearchClient {
    /// Builds a client for `endpoint`. `timeout` of `None` waits indefinitely.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ResearchError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ResearchError::Config(format!("invalid endpoint '{endpoint}': {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ResearchError::Config(e.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl AnsweringService for HttpResearchClient {
    fn name(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn ask(&self, question: &str) -> Result<String, ResearchError> {
        let request = ResearchRequest::new(question);

        info!(
            "Research request: endpoint={}, question_len={}, max_iteration={}",
            self.endpoint,
            question.len(),
            request.max_iteration
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| ResearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Research service returned HTTP {}: {}", status, message);
            return Err(ResearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ResearchError::Network(e.to_string()))?;
        debug!("Research response body: {} bytes", body.len());

        let parsed = ResearchResponse::from_body(&body)?;
        info!("Research answer received: {} bytes", parsed.answer.len());
        Ok(parsed.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_endpoint() {
        let result = HttpResearchClient::new("not a url", None);
        assert!(matches!(result, Err(ResearchError::Config(_))));
    }

    #[test]
    fn default_endpoint_parses() {
        let client = HttpResearchClient::new(DEFAULT_ENDPOINT, None).unwrap();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(client.name(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn accepts_timeout() {
        let client =
            HttpResearchClient::new("http://127.0.0.1:9/ask", Some(Duration::from_secs(5)));
        assert!(client.is_ok());
    }
}
