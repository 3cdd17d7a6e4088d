//! Client for the hosted generative completion service.
//!
//! [`ExamGenerator`] is the seam the rest of the service depends on;
//! [`GeminiGenerator`] talks to the `generateContent` REST endpoint with a
//! JSON response schema derived from [`GenerationResult`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::constants::prompts::build_exam_prompt;
use crate::models::dto::exam_dto::GenerationResult;
use crate::models::dto::request::GenerationRequest;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Transport(String),

    #[error("Generation request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Generation service returned no candidates")]
    EmptyResponse,

    #[error("Generation response is not valid JSON: {0}")]
    MalformedJson(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExamGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
        -> Result<GenerationResult, GenerationError>;
}

pub struct GeminiGenerator {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiGenerator {
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.generation_timeout())
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            timeout: config.generation_timeout(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ExamGenerator for GeminiGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let body = build_request_body(&build_exam_prompt(request));
        log::info!(
            "Requesting exam generation from model {} for subject '{}'",
            self.model,
            request.subject
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.timeout.as_secs(),
                    }
                } else {
                    GenerationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedJson(e.to_string()))?;

        parse_generation_result(payload)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_json_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn response_schema() -> serde_json::Value {
    let mut schema = serde_json::to_value(schemars::schema_for!(GenerationResult))
        .unwrap_or_else(|_| serde_json::json!({}));
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    schema
}

fn build_request_body(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_json_schema: response_schema(),
        },
    }
}

/// Joins the first candidate's text parts; a candidate with no text parses as `{}`.
fn parse_generation_result(
    payload: GenerateContentResponse,
) -> Result<GenerationResult, GenerationError> {
    let candidate = payload
        .candidates
        .into_iter()
        .next()
        .ok_or(GenerationError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = if text.trim().is_empty() {
        "{}"
    } else {
        text.as_str()
    };

    serde_json::from_str(text).map_err(|e| GenerationError::MalformedJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn request_body_uses_json_response_schema() {
        let body = serde_json::to_value(build_request_body("soạn đề")).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "soạn đề");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        let schema = &body["generationConfig"]["responseJsonSchema"];
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["specTable"].is_object());
        assert!(schema.get("$schema").is_none());
    }

    #[test]
    fn parses_text_split_across_parts() {
        let result = parse_generation_result(payload(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "{\"matrix\":\"<table></table>\",\"specTable\":\"\"," },
                        { "text": "\"examPaper\":\"ĐỀ\",\"answerKey\":\"ĐÁP ÁN\"}" }
                    ]
                }
            }]
        })))
        .unwrap();

        assert_eq!(result.matrix, "<table></table>");
        assert_eq!(result.answer_key, "ĐÁP ÁN");
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let err = parse_generation_result(payload(serde_json::json!({}))).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[test]
    fn missing_text_is_malformed() {
        let err = parse_generation_result(payload(serde_json::json!({
            "candidates": [{ "content": { "parts": [] } }]
        })))
        .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedJson(_)));
    }

    #[test]
    fn non_json_text_is_malformed() {
        let err = parse_generation_result(payload(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Xin lỗi, tôi không thể" }] } }]
        })))
        .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedJson(_)));
    }

    #[test]
    fn endpoint_includes_model() {
        let generator = GeminiGenerator::new(&Config::test_config()).unwrap();
        assert_eq!(
            generator.endpoint(),
            "http://127.0.0.1:9/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[actix_web::test]
    async fn unreachable_service_is_transport_error() {
        let generator = GeminiGenerator::new(&Config::test_config()).unwrap();
        let err = generator
            .generate(&GenerationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Transport(_) | GenerationError::Timeout { .. }
        ));
    }
}
