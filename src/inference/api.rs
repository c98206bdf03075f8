//! Hosted inference API client for zero-shot classification.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::classify::{ClassificationResult, LineClassifier};
use crate::http_client;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/valhalla/distilbart-mnli-12-3";

const MAX_RESPONSE_BYTES: usize = 256 * 1024;

/// Request body for one phrase.
#[derive(Clone, Debug, Serialize)]
pub struct ZeroShotRequest<'a> {
    pub inputs: &'a str,
    pub parameters: ZeroShotParameters<'a>,
    pub options: RequestOptions,
}

#[derive(Clone, Debug, Serialize)]
pub struct ZeroShotParameters<'a> {
    pub candidate_labels: &'a [String],
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct RequestOptions {
    /// Block until a cold model is loaded instead of failing fast.
    pub wait_for_model: bool,
}

impl<'a> ZeroShotRequest<'a> {
    pub fn new(line: &'a str, labels: &'a [String]) -> Self {
        Self {
            inputs: line,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        }
    }
}

/// Failures talking to the hosted endpoint.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("API token rejected")]
    Unauthorized,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Rate limited; try again later")]
    RateLimited,
    #[error("Model is not ready: {0}")]
    ModelLoading(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Inference service error: {0}")]
    Service(String),
    #[error("Unexpected response: {0}")]
    Malformed(String),
    #[error("HTTP error: {0}")]
    Transport(String),
}

/// Classifies phrases through the hosted inference endpoint.
#[derive(Clone)]
pub struct HostedClassifier {
    endpoint: Url,
    credential: String,
}

impl HostedClassifier {
    pub fn new(endpoint: Url, credential: impl Into<String>) -> Self {
        Self {
            endpoint,
            credential: credential.into(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for HostedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedClassifier")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl LineClassifier for HostedClassifier {
    fn classify_line(
        &self,
        line: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, RemoteError> {
        let request = ZeroShotRequest::new(line, labels);
        let req = http_client::agent()
            .post(self.endpoint.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json")
            .set(
                "Authorization",
                &format!("Bearer {}", self.credential.trim()),
            );

        let response = match req.send_json(&request) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = http_client::read_body_text(response, MAX_RESPONSE_BYTES)
                    .unwrap_or_else(|err| err.to_string());
                return Err(map_status_error(code, &body));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(RemoteError::Transport(err.to_string()));
            }
        };

        let body = http_client::read_body_text(response, MAX_RESPONSE_BYTES)
            .map_err(|err| RemoteError::Malformed(err.to_string()))?;
        parse_classification_response(&body)
    }
}

fn map_status_error(code: u16, body: &str) -> RemoteError {
    let message = error_message(body);
    match code {
        400 | 422 => RemoteError::BadRequest(message),
        401 | 403 => RemoteError::Unauthorized,
        429 => RemoteError::RateLimited,
        503 => RemoteError::ModelLoading(message),
        500..=599 => RemoteError::Server(message),
        _ => RemoteError::Transport(format!("HTTP {code}: {message}")),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: serde_json::Value,
}

/// Pull the service's `error` field out of a body, falling back to the raw text.
fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<ErrorEnvelope>(trimmed) {
        Ok(envelope) => describe_error_value(&envelope.error),
        Err(_) if trimmed.is_empty() => "empty response body".to_string(),
        Err(_) => trimmed.to_string(),
    }
}

fn describe_error_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(describe_error_value)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseWire {
    Single(ResultWire),
    Batch(Vec<ResultWire>),
}

#[derive(Debug, Deserialize)]
struct ResultWire {
    sequence: Option<String>,
    labels: Option<Vec<String>>,
    scores: Option<Vec<f64>>,
    error: Option<serde_json::Value>,
}

fn parse_classification_response(body: &str) -> Result<ClassificationResult, RemoteError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(RemoteError::Malformed("Empty response body".to_string()));
    }
    let parsed: ResponseWire = serde_json::from_str(trimmed)
        .map_err(|err| RemoteError::Malformed(format!("{err}: {trimmed}")))?;
    let wire = match parsed {
        ResponseWire::Single(wire) => wire,
        ResponseWire::Batch(mut items) if items.len() == 1 => items.remove(0),
        ResponseWire::Batch(items) => {
            return Err(RemoteError::Malformed(format!(
                "Expected one result, got {}",
                items.len()
            )));
        }
    };
    if let Some(error) = wire.error {
        return Err(RemoteError::Service(describe_error_value(&error)));
    }
    let (Some(sequence), Some(labels), Some(scores)) = (wire.sequence, wire.labels, wire.scores)
    else {
        return Err(RemoteError::Malformed(
            "Missing sequence/labels/scores in response".to_string(),
        ));
    };
    if labels.len() != scores.len() {
        return Err(RemoteError::Malformed(format!(
            "{} labels but {} scores",
            labels.len(),
            scores.len()
        )));
    }
    if let Some(bad) = scores
        .iter()
        .find(|score| !score.is_finite() || !(0.0..=1.0).contains(*score))
    {
        return Err(RemoteError::Malformed(format!("Score out of range: {bad}")));
    }
    Ok(ClassificationResult {
        sequence,
        labels,
        scores,
    })
}
