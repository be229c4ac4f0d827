//! Tolerant recovery of rubric JSON from raw LLM output
//!
//! Backends do not reliably answer with bare JSON. [`parse_rubric`] tries, in
//! this order, and returns the first success:
//!
//! 1. Strip a surrounding fenced code block (optional language tag) and parse
//!    the result strictly.
//! 2. Take the span from the first `{` to the last `}`, drop trailing commas
//!    before `}` or `]`, turn every `'` into `"`, and parse again.
//!
//! Reordering these steps changes which malformed responses are recoverable.
//! Missing rubric keys are never filled in; they fail deserialization.

use crate::Rubric;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no JSON object found in response")]
    NoJsonObject,
    #[error("{0}")]
    Invalid(#[from] serde_json::Error),
}

fn leading_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^```[A-Za-z0-9_-]*[ \t]*\r?\n?").expect("valid regex"))
}

fn trailing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n?```\s*$").expect("valid regex"))
}

fn object_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[\s\S]+\}").expect("valid regex"))
}

fn trailing_comma() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",(\s*[}\]])").expect("valid regex"))
}

/// Remove a fenced code block wrapper if present
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let without_open = leading_fence().replace(trimmed, "");
    trailing_fence().replace(&without_open, "").into_owned()
}

/// Greedy `{...}` span with trailing commas removed and single quotes normalized
pub fn repair_json_span(text: &str) -> Option<String> {
    let span = object_span().find(text)?.as_str();
    let without_commas = trailing_comma().replace_all(span, "$1");
    Some(without_commas.replace('\'', "\""))
}

/// Parse raw LLM output into a [`Rubric`]
pub fn parse_rubric(raw: &str) -> Result<Rubric, NormalizeError> {
    let text = strip_code_fence(raw);

    if let Ok(rubric) = serde_json::from_str::<Rubric>(&text) {
        return Ok(rubric);
    }

    let candidate = repair_json_span(&text).ok_or(NormalizeError::NoJsonObject)?;
    Ok(serde_json::from_str(&candidate)?)
}
