//! OpenAI chat completions API

use super::{check_status, BackendFailure, CompletionRequest};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

pub(crate) fn complete(client: &Client, request: &CompletionRequest<'_>) -> Result<String, BackendFailure> {
    let body = json!({
        "model": request.model,
        "messages": [
            {
                "role": "user",
                "content": request.prompt
            }
        ],
        "max_tokens": request.max_tokens,
        "temperature": 0.0,
    });

    let response = client
        .post(format!("{}/chat/completions", request.base_url))
        .bearer_auth(request.api_key)
        .json(&body)
        .send()
        .map_err(|e| BackendFailure::RequestFailed(e.without_url().to_string()))?;

    let parsed: ChatResponse = check_status(response)?
        .json()
        .map_err(|e| BackendFailure::InvalidResponse(e.without_url().to_string()))?;

    first_choice(parsed)
}

fn first_choice(response: ChatResponse) -> Result<String, BackendFailure> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| BackendFailure::InvalidResponse("No choices in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_choice_content() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"hello"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(parsed).unwrap(), "hello");
    }

    #[test]
    fn test_null_content_is_invalid() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(first_choice(parsed).is_err());
    }
}
