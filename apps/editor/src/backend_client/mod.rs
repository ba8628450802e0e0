/// Backend client: the single point of entry for every call to the resume
/// parsing / suggestion / chat backend.
///
/// No other module talks HTTP to the backend. Calls are made once: there is no
/// retry, and a request that exceeds its timeout is reported as a failure.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::chat::{ChatReply, ChatRequest};
use crate::models::resume::{ParsedResume, ResumeDocument, ResumeEnvelope};
use crate::suggestions::field_path::FieldPath;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    /// The backend understood the request and refused it (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, BackendError::Status { status, .. } if (400..500).contains(status))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Http(e) if e.is_timeout())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    pub service: String,
}

/// The operations the editor needs from the backend.
///
/// Carried in `AppState` as `Arc<dyn ResumeBackend>` so tests can swap in a fake.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    /// `Ok(None)` when the backend holds no resume yet.
    async fn fetch_resume(&self) -> Result<Option<ResumeDocument>, BackendError>;

    async fn parse_resume(&self, raw_text: &str) -> Result<ParsedResume, BackendError>;

    /// Returns the complete updated document.
    async fn accept_suggestion(
        &self,
        field: &FieldPath,
        suggested: &str,
    ) -> Result<ResumeDocument, BackendError>;

    async fn save_resume(&self, resume: &ResumeDocument) -> Result<(), BackendError>;

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError>;

    async fn health(&self) -> Result<BackendHealth, BackendError>;
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: serde_json::Value,
}

/// reqwest-backed implementation talking to the backend's JSON API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    parse_timeout: Duration,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        parse_timeout: Duration,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(request_timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            parse_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fails on non-2xx, then decodes the body as `T`.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // FastAPI wraps errors as {"detail": ...}
            let message = serde_json::from_str::<ErrorDetail>(&body)
                .map(|e| match e.detail {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or(body);
            warn!("Backend returned {status}: {message}");
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ResumeBackend for HttpBackend {
    async fn fetch_resume(&self) -> Result<Option<ResumeDocument>, BackendError> {
        let response = self.client.get(self.url("/api/resume")).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Backend holds no resume yet");
            return Ok(None);
        }
        let envelope: ResumeEnvelope = Self::decode(response).await?;
        Ok(Some(envelope.resume))
    }

    async fn parse_resume(&self, raw_text: &str) -> Result<ParsedResume, BackendError> {
        let response = self
            .client
            .post(self.url("/api/parse_resume"))
            .timeout(self.parse_timeout)
            .json(&json!({ "text": raw_text }))
            .send()
            .await?;
        let parsed: ParsedResume = Self::decode(response).await?;
        debug!(
            "Backend parsed resume: {} top-level suggestions",
            parsed.suggestions.len()
        );
        Ok(parsed)
    }

    async fn accept_suggestion(
        &self,
        field: &FieldPath,
        suggested: &str,
    ) -> Result<ResumeDocument, BackendError> {
        let response = self
            .client
            .post(self.url("/api/accept_suggestion"))
            .json(&json!({ "field": field, "suggested": suggested }))
            .send()
            .await?;
        let envelope: ResumeEnvelope = Self::decode(response).await?;
        Ok(envelope.resume)
    }

    async fn save_resume(&self, resume: &ResumeDocument) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/api/resume"))
            .json(&json!({ "resume": resume }))
            .send()
            .await?;
        let _: serde_json::Value = Self::decode(response).await?;
        Ok(())
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn health(&self) -> Result<BackendHealth, BackendError> {
        let response = self.client.get(self.url("/healthz")).send().await?;
        Self::decode(response).await
    }
}
