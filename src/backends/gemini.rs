//! Google Gemini generateContent API

use super::{check_status, BackendFailure, CompletionRequest};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: String,
}

pub(crate) fn complete(client: &Client, request: &CompletionRequest<'_>) -> Result<String, BackendFailure> {
    let url = format!(
        "{}/models/{}:generateContent",
        request.base_url, request.model
    );

    let body = GeminiRequest {
        contents: vec![GeminiContent {
            parts: vec![GeminiPart {
                text: request.prompt,
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.0,
            max_output_tokens: request.max_tokens,
        },
    };

    let response = client
        .post(&url)
        .header("x-goog-api-key", request.api_key)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .map_err(|e| BackendFailure::RequestFailed(e.without_url().to_string()))?;

    let parsed: GeminiResponse = check_status(response)?
        .json()
        .map_err(|e| BackendFailure::InvalidResponse(e.without_url().to_string()))?;

    candidate_text(parsed)
}

/// Concatenated text parts of the first candidate
fn candidate_text(response: GeminiResponse) -> Result<String, BackendFailure> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(BackendFailure::InvalidResponse(
            "No candidates in response".to_string(),
        ));
    }
    Ok(text)
}
