//! HTTP client for posting the form to the backend
//!
//! The form travels as a `multipart/form-data` body with the anti-forgery
//! token repeated in the `X-CSRF-Token` header. The backend answers with a
//! small JSON document carrying either a `message` or an `error`.

use super::traits::SubmitClientTrait;
use crate::config::TuiConfig;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Errors that keep a submission from producing a decoded response
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The request could not be completed
    #[error("Failed to reach the server: {0}")]
    Transport(String),

    /// The server answered with a body that is not the expected JSON
    #[error("Failed to decode the server response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SubmitError::InvalidResponse(error.to_string())
        } else {
            SubmitError::Transport(error.to_string())
        }
    }
}

/// Snapshot of the form taken when a submission starts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    /// Field name/value pairs in form order
    pub fields: Vec<(String, String)>,
    pub csrf_token: String,
}

/// String members of a submission response's JSON body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ResponseBody {
    /// Members that are missing or not strings stay unset, as does
    /// everything when the document is not an object.
    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            message: text("message"),
            error: text("error"),
        }
    }
}

/// Status code plus decoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl SubmitResponse {
    /// True for 2xx status codes
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for posting the form to the backend
pub struct SubmitClient {
    client: reqwest::Client,
    url: String,
}

impl SubmitClient {
    /// Create a new client for the configured endpoint
    pub fn new(config: &TuiConfig) -> Result<Self, SubmitError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: config.submit_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn multipart_form(payload: &SubmissionPayload) -> reqwest::multipart::Form {
        payload
            .fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            })
    }
}

#[async_trait]
impl SubmitClientTrait for SubmitClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, SubmitError> {
        let response = self
            .client
            .post(&self.url)
            .header(CSRF_HEADER, payload.csrf_token.as_str())
            .multipart(Self::multipart_form(payload))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error posting to {}: {e}", self.url);
                SubmitError::from(e)
            })?;

        let status = response.status().as_u16();
        tracing::info!(status, "Submission response received");

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(status, "Failed to read response body: {e}");
            SubmitError::from(e)
        })?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(status, "Response body was not valid JSON: {e}");
            SubmitError::InvalidResponse(e.to_string())
        })?;

        Ok(SubmitResponse {
            status,
            body: ResponseBody::from_json(&value),
        })
    }
}
