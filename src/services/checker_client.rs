//! Client for the external checking API
//!
//! One multipart POST per document. Non-2xx responses and bodies that do not
//! parse as a [`CheckResult`] are turned into localized messages here so every
//! surface shows the same text.

use crate::models::{CheckResult, DocCheckConfig};
use crate::services::document_file::DocumentFile;
use crate::services::messages::{Locale, Message};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

/// Anything that can turn a document into a check result
#[async_trait]
pub trait DocumentChecker: Send + Sync {
    async fn check(&self, file: &DocumentFile) -> Result<CheckResult, CheckError>;
}

/// Failure of a single check request. The display text is the localized user message.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The API answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The API answered 2xx but the body was not a check result
    #[error("{message}")]
    MalformedResponse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request never completed (connect failure, timeout, broken body)
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
}

impl CheckError {
    /// Message to show in `locale`. A `detail` passed through from the API is
    /// returned as sent.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            CheckError::Rejected { status, message } => match *status {
                400 => Message::BadRequest.text(locale),
                422 => Message::Unprocessable.text(locale),
                500 => Message::InternalServerError.text(locale),
                _ => message.clone(),
            },
            CheckError::MalformedResponse { .. } => Message::MalformedResponse.text(locale),
            CheckError::Transport { .. } => Message::Unreachable.text(locale),
        }
    }

    /// HTTP status reported by the API, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            CheckError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Map a non-2xx response to the message shown to the user.
///
/// 400, 422 and 500 have fixed messages. Any other status uses the body's
/// `detail` field when present.
pub fn rejection_message(status: StatusCode, body: &[u8], locale: Locale) -> String {
    match status.as_u16() {
        400 => Message::BadRequest.text(locale),
        422 => Message::Unprocessable.text(locale),
        500 => Message::InternalServerError.text(locale),
        code => serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .filter(|detail| !detail.trim().is_empty())
            .unwrap_or_else(|| Message::ServerError(code).text(locale)),
    }
}

/// HTTP implementation of [`DocumentChecker`]
#[derive(Debug, Clone)]
pub struct CheckerClient {
    http: reqwest::Client,
    endpoint: String,
    locale: Locale,
}

impl CheckerClient {
    pub fn new(endpoint: impl Into<String>, locale: Locale, timeout: Duration) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("doccheck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            locale,
        })
    }

    pub fn from_config(config: &DocCheckConfig) -> crate::Result<Self> {
        Self::new(
            config.endpoint.clone(),
            config.locale,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn transport(&self, source: reqwest::Error) -> CheckError {
        CheckError::Transport {
            message: Message::Unreachable.text(self.locale),
            source,
        }
    }

    async fn send(&self, file: &DocumentFile) -> Result<CheckResult, CheckError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| self.transport(e))?;
        let form = Form::new().part("file", part);

        info!(file = %file.name, size = file.len(), "uploading document");

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "request to checking API failed");
                self.transport(e)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport(e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "checking API responded");

        if !status.is_success() {
            let message = rejection_message(status, &body, self.locale);
            warn!(status = status.as_u16(), %message, "checking API rejected document");
            return Err(CheckError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let result: CheckResult = serde_json::from_slice(&body).map_err(|source| {
            warn!(error = %source, "checking API returned an unexpected body");
            CheckError::MalformedResponse {
                message: Message::MalformedResponse.text(self.locale),
                source,
            }
        })?;

        let summary = result.summary();
        info!(
            paragraphs = summary.paragraphs,
            errors = summary.total_errors,
            suggestions = summary.suggestions,
            "check complete"
        );
        Ok(result)
    }
}

#[async_trait]
impl DocumentChecker for CheckerClient {
    async fn check(&self, file: &DocumentFile) -> Result<CheckResult, CheckError> {
        let span = tracing::info_span!("check", request_id = %Uuid::new_v4(), endpoint = %self.endpoint);
        self.send(file).instrument(span).await
    }
}
