//! REST client for the upstream generation endpoint.
//!
//! The endpoint speaks a chat-completions shaped protocol: the composed
//! prompt is sent as a single user message. Only the response status is
//! inspected; the body is not part of the contract.

use serde::Serialize;

use crate::config::UpstreamConfig;

/// HTTP client for the upstream generation endpoint.
pub struct UpstreamApi {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request body posted to the upstream endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

/// Errors from the upstream REST layer.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("API request failed: {status} {reason}")]
    Status {
        status: u16,
        /// Canonical reason phrase for `status`.
        reason: String,
    },
}

impl UpstreamApi {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            customer_id: config.customer_id.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `prompt` to the model.
    pub async fn submit_prompt(&self, prompt: &str) -> Result<(), UpstreamError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(customer_id) = &self.customer_id {
            request = request.header("customerId", customer_id);
        }

        let response = request.send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an
    /// [`UpstreamError::Status`] on failure. The failed body is logged, not
    /// returned.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), body = %body, "Upstream rejected request");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        Ok(response)
    }
}
