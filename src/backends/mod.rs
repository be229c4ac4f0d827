//! LLM backends used to score articles
//!
//! The supported providers form a closed set. Each one is reached through the
//! same [`Completer::complete`] capability, and the HTTP implementation
//! dispatches on the [`Backend`] variant.

mod claude;
mod gemini;
mod openai;

use crate::config::{Credentials, PerBackend, Settings};
use crate::error::EvalError;
use reqwest::blocking::{Client, Response};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A supported LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    OpenAi,
    Claude,
    Gemini,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::OpenAi, Backend::Claude, Backend::Gemini];

    /// Name used on the command line and in the `model` output column
    pub fn name(self) -> &'static str {
        match self {
            Backend::OpenAi => "openai",
            Backend::Claude => "claude",
            Backend::Gemini => "gemini",
        }
    }

    /// Environment variable holding this backend's API key
    pub fn api_key_var(self) -> &'static str {
        match self {
            Backend::OpenAi => "OPENAI_API_KEY",
            Backend::Claude => "ANTHROPIC_API_KEY",
            Backend::Gemini => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Backend {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Backend::OpenAi),
            "claude" | "anthropic" => Ok(Backend::Claude),
            "gemini" | "google" => Ok(Backend::Gemini),
            other => Err(EvalError::Config(format!(
                "unknown backend '{}'. Choose from: openai, claude, gemini, all",
                other
            ))),
        }
    }
}

/// Which backends a run should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendSelection {
    One(Backend),
    All,
}

impl BackendSelection {
    /// Backends in evaluation order
    pub fn backends(self) -> Vec<Backend> {
        match self {
            BackendSelection::One(backend) => vec![backend],
            BackendSelection::All => Backend::ALL.to_vec(),
        }
    }
}

impl FromStr for BackendSelection {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(BackendSelection::All)
        } else {
            s.parse().map(BackendSelection::One)
        }
    }
}

/// Failure reported by a provider call
#[derive(Debug, Error)]
pub enum BackendFailure {
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("rate limited - try again later")]
    RateLimited,
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Sends a prompt to a backend and returns the raw text it produced
pub trait Completer {
    fn complete(&self, backend: Backend, prompt: &str) -> Result<String, BackendFailure>;
}

/// Parameters shared by every provider request
pub(crate) struct CompletionRequest<'a> {
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub model: &'a str,
    pub max_tokens: u32,
    pub prompt: &'a str,
}

/// Completer backed by the providers' HTTP APIs
pub struct HttpCompleter {
    client: Client,
    credentials: Credentials,
    models: PerBackend,
    base_urls: PerBackend,
    max_tokens: u32,
}

impl HttpCompleter {
    pub fn new(settings: &Settings, credentials: Credentials) -> Result<Self, EvalError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| EvalError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            models: settings.models.clone(),
            base_urls: settings.base_urls.clone(),
            max_tokens: settings.max_tokens,
        })
    }
}

impl Completer for HttpCompleter {
    fn complete(&self, backend: Backend, prompt: &str) -> Result<String, BackendFailure> {
        let api_key = self
            .credentials
            .get(backend)
            .ok_or(BackendFailure::MissingApiKey(backend.api_key_var()))?;

        let request = CompletionRequest {
            base_url: self.base_urls.get(backend).trim_end_matches('/'),
            api_key,
            model: self.models.get(backend),
            max_tokens: self.max_tokens,
            prompt,
        };

        match backend {
            Backend::OpenAi => openai::complete(&self.client, &request),
            Backend::Claude => claude::complete(&self.client, &request),
            Backend::Gemini => gemini::complete(&self.client, &request),
        }
    }
}

/// Map rate limits and non-success statuses to failures
pub(crate) fn check_status(response: Response) -> Result<Response, BackendFailure> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(BackendFailure::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(BackendFailure::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}
