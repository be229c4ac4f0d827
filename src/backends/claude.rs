//! Anthropic Messages API

use super::{check_status, BackendFailure, CompletionRequest};
use reqwest::blocking::Client;
use serde_json::json;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub(crate) fn complete(client: &Client, request: &CompletionRequest<'_>) -> Result<String, BackendFailure> {
    let body = json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "temperature": 0.0,
        "messages": [
            {
                "role": "user",
                "content": request.prompt
            }
        ]
    });

    let response = client
        .post(format!("{}/messages", request.base_url))
        .header("Content-Type", "application/json")
        .header("x-api-key", request.api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .map_err(|e| BackendFailure::RequestFailed(e.without_url().to_string()))?;

    let json: serde_json::Value = check_status(response)?
        .json()
        .map_err(|e| BackendFailure::InvalidResponse(e.without_url().to_string()))?;

    message_text(&json)
}

/// Text of the first content block
fn message_text(json: &serde_json::Value) -> Result<String, BackendFailure> {
    json["content"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|item| item["text"].as_str())
        .map(str::to_string)
        .ok_or_else(|| BackendFailure::InvalidResponse("No content in response".to_string()))
}
