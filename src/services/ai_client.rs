//! Client for the generative text service (Ollama `/api/generate`).
//!
//! The service is optional. Callers get a typed [`GenerationError`] and are
//! expected to substitute their own fallback; nothing here retries.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generative service is disabled")]
    Disabled,

    #[error("generative service timed out after {0:?}")]
    Timeout(Duration),

    #[error("generative service unreachable: {0}")]
    Unavailable(String),

    #[error("generative service returned {0}")]
    Status(StatusCode),

    #[error("invalid generative service response: {0}")]
    Decode(String),
}

/// Client for the generative text service.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    api_url: String,
    model: String,
    enabled: bool,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl AiClient {
    /// Create a new client. Timeouts are chosen per call.
    pub fn new(api_url: &str, model: &str, enabled: bool) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(api_url = api_url, model = model, enabled, "AI client initialized");

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            model: model.to_string(),
            enabled,
        })
    }

    /// Run one non-streaming generation.
    ///
    /// Returns `Ok(None)` when the service answered 200 without a `response` field.
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    pub async fn generate(&self, prompt: &str, timeout: Duration) -> Result<Option<String>, GenerationError> {
        if !self.enabled {
            return Err(GenerationError::Disabled);
        }

        debug!(url = %self.api_url, "Generative service request");

        let response = self
            .client
            .post(&self.api_url)
            .timeout(timeout)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GenerationError::Status(status));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(timeout)
            } else {
                GenerationError::Decode(e.to_string())
            }
        })?;

        Ok(body.response)
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout(timeout)
    } else {
        GenerationError::Unavailable(err.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{spawn_generator, Behaviour, UNREACHABLE_URL};
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn returns_generated_text() {
        let url = spawn_generator(Behaviour::Reply("Three risks...")).await;
        let client = AiClient::new(&url, "granite3.3:2b", true).unwrap();
        let text = client.generate("Analyze", TIMEOUT).await.unwrap();
        assert_eq!(text.as_deref(), Some("Three risks..."));
    }

    #[tokio::test]
    async fn missing_text_is_not_an_error() {
        let url = spawn_generator(Behaviour::ReplyWithoutText).await;
        let client = AiClient::new(&url, "granite3.3:2b", true).unwrap();
        assert_eq!(client.generate("Analyze", TIMEOUT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn non_200_is_reported() {
        let url = spawn_generator(Behaviour::Fail(StatusCode::SERVICE_UNAVAILABLE)).await;
        let client = AiClient::new(&url, "granite3.3:2b", true).unwrap();
        let err = client.generate("Analyze", TIMEOUT).await.unwrap_err();
        assert!(matches!(err, GenerationError::Status(StatusCode::SERVICE_UNAVAILABLE)));
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let url = spawn_generator(Behaviour::Stall(Duration::from_secs(3))).await;
        let client = AiClient::new(&url, "granite3.3:2b", true).unwrap();
        let err = client
            .generate("Analyze", Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_unavailable() {
        let client = AiClient::new(UNREACHABLE_URL, "granite3.3:2b", true).unwrap();
        let err = client.generate("Analyze", TIMEOUT).await.unwrap_err();
        assert!(matches!(err, GenerationError::Unavailable(_) | GenerationError::Timeout(_)));
    }

    #[tokio::test]
    async fn disabled_client_makes_no_call() {
        let client = AiClient::new(UNREACHABLE_URL, "granite3.3:2b", false).unwrap();
        let err = client.generate("Analyze", TIMEOUT).await.unwrap_err();
        assert!(matches!(err, GenerationError::Disabled));
    }
}
