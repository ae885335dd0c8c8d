//! HTTP client for the calculation service.
//!
//! The client treats the server as untrusted: every response body is passed
//! through `validate_output` before anything is handed to a caller, so a
//! misbehaving or tampered-with service surfaces as `UntrustedResponse`
//! instead of leaking a malformed result into presentation code.

use crate::contract::{validate_output, CalculationInput};
use crate::engine::EconomicsResult;
use crate::visibility::{CalculationView, ViewMode};
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Errors from the calculation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineClientError {
    /// Network or transport failure.
    Network(String),
    /// Non-success HTTP response that was not a structured rejection.
    Http { status: u16, message: String },
    /// The service rejected the request (4xx) with a message of its own.
    Rejected(String),
    /// The service answered 2xx but the body failed output validation.
    UntrustedResponse(String),
}

impl fmt::Display for EngineClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineClientError::Network(msg) => write!(f, "Network error: {}", msg),
            EngineClientError::Http { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            EngineClientError::Rejected(msg) => write!(f, "Request rejected: {}", msg),
            EngineClientError::UntrustedResponse(detail) => {
                write!(f, "Untrusted response: {}", detail)
            }
        }
    }
}

impl std::error::Error for EngineClientError {}

impl EngineClientError {
    /// Message safe to show an end user.
    ///
    /// Rejections carry the service's own user-facing message. Everything
    /// else collapses to a generic sentence; in particular the detail of an
    /// `UntrustedResponse` describes what was wrong with the payload and is
    /// for logs, not for users.
    pub fn user_message(&self) -> String {
        match self {
            EngineClientError::Rejected(msg) => msg.clone(),
            EngineClientError::UntrustedResponse(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
            EngineClientError::Network(_) | EngineClientError::Http { .. } => {
                "The calculation service is currently unavailable.".to_string()
            }
        }
    }
}

/// Client for the margin calculation endpoint.
#[derive(Debug, Clone)]
pub struct EngineClient {
    client: Client,
    base_url: String,
}

impl EngineClient {
    /// Create a client for a service at the given base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Run a calculation and return the validated result.
    ///
    /// Retries transient failures (network errors and 5xx) with exponential
    /// backoff for up to 30 seconds. 4xx responses are not retried; their
    /// `error` message comes back as `Rejected`.
    ///
    /// # Errors
    /// Returns `UntrustedResponse` when a 2xx body is missing the `data`
    /// envelope or fails output validation.
    pub async fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<EconomicsResult, EngineClientError> {
        debug!(
            "Requesting calculation for product={}, volume={}",
            input.product_id, input.volume
        );

        let body = self.post_calculate(input).await?;

        let payload = body.get("data").ok_or_else(|| {
            EngineClientError::UntrustedResponse("Missing data envelope".to_string())
        })?;

        validate_output(payload)
            .map_err(|errors| EngineClientError::UntrustedResponse(errors.to_string()))
    }

    /// Run a calculation and shape the result for the given view.
    ///
    /// # Errors
    /// Same as [`EngineClient::calculate`].
    pub async fn calculate_view(
        &self,
        input: &CalculationInput,
        mode: ViewMode,
    ) -> Result<CalculationView, EngineClientError> {
        let result = self.calculate(input).await?;
        Ok(CalculationView::present(&result, mode))
    }

    async fn post_calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<serde_json::Value, EngineClientError> {
        let url = format!("{}/v1/calculate", self.base_url);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .post(&url)
                .json(input)
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(EngineClientError::Network(e.to_string()))
                })?;

            let status = response.status();
            if status.is_server_error() {
                return Err(backoff::Error::transient(EngineClientError::Http {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                let message = response
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|body| {
                        body.get("error")
                            .and_then(|v| v.as_str())
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| "Client error".to_string());
                return Err(backoff::Error::permanent(EngineClientError::Rejected(
                    message,
                )));
            }

            response.json::<serde_json::Value>().await.map_err(|e| {
                backoff::Error::permanent(EngineClientError::UntrustedResponse(format!(
                    "Body is not JSON: {}",
                    e
                )))
            })
        })
        .await
    }
}
