//! # Translation Service
//!
//! Language detection and translation behind the [`Translator`] trait.
//! [`LibreTranslateClient`] talks to a LibreTranslate-compatible server.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from the translation service
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("translation service not configured")]
    Disabled,

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("translation service error: {0}")]
    Service(String),

    #[error("language could not be detected")]
    NoDetection,
}

/// Language detection and translation
pub trait Translator {
    /// Detect the language code (ISO 639-1) of `text`
    fn detect(&self, text: &str) -> Result<String, TranslateError>;

    /// Translate `text` from `source` into `target`
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn detect(&self, text: &str) -> Result<String, TranslateError> {
        (**self).detect(text)
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        (**self).translate(text, source, target)
    }
}

/// Translator used when no service is configured; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

impl Translator for DisabledTranslator {
    fn detect(&self, _text: &str) -> Result<String, TranslateError> {
        Err(TranslateError::Disabled)
    }

    fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String, TranslateError> {
        Err(TranslateError::Disabled)
    }
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct Detection {
    language: String,
    confidence: f64,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}

/// LibreTranslate HTTP client
pub struct LibreTranslateClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    /// Create a client for the server at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn post(&self, path: &str, body: &impl Serialize) -> Result<String, TranslateError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "calling translation service");

        let response = self.client.post(&url).json(body).send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServiceError>(&text)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
            return Err(TranslateError::Service(message));
        }
        Ok(text)
    }
}

impl Translator for LibreTranslateClient {
    fn detect(&self, text: &str) -> Result<String, TranslateError> {
        let body = self.post(
            "detect",
            &DetectRequest {
                q: text,
                api_key: self.api_key.as_deref(),
            },
        )?;
        best_detection(&body)
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        let body = self.post(
            "translate",
            &TranslateRequest {
                q: text,
                source,
                target,
                format: "text",
                api_key: self.api_key.as_deref(),
            },
        )?;
        translated_text(&body)
    }
}

/// Pick the most confident language from a `/detect` response
fn best_detection(body: &str) -> Result<String, TranslateError> {
    let detections: Vec<Detection> =
        serde_json::from_str(body).map_err(|e| TranslateError::Service(e.to_string()))?;

    detections
        .into_iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .map(|d| d.language)
        .ok_or(TranslateError::NoDetection)
}

/// Extract the text from a `/translate` response
fn translated_text(body: &str) -> Result<String, TranslateError> {
    let response: TranslateResponse =
        serde_json::from_str(body).map_err(|e| TranslateError::Service(e.to_string()))?;

    match (response.translated_text, response.error) {
        (_, Some(error)) => Err(TranslateError::Service(error)),
        (Some(text), None) => Ok(text),
        (None, None) => Err(TranslateError::Service(
            "response has no translatedText".to_string(),
        )),
    }
}
