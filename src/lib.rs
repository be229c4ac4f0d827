//! blogeval: LLM-backed writing quality evaluation for blog articles
//!
//! Fetches an article, extracts its main text, asks one or more LLM backends to
//! score it against a fixed five-dimension rubric, computes a Flesch-Kincaid
//! grade level, and persists the results as CSV rows and an HTML report.

pub mod backends;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod fetcher;
pub mod readability;
pub mod reporter;
pub mod runner;

pub use backends::{Backend, BackendSelection};
pub use error::{EvalError, Result};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One of the five fixed writing-quality categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    ToneOfVoice,
    Style,
    StructureReadability,
    Format,
    Flow,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::ToneOfVoice,
        Dimension::Style,
        Dimension::StructureReadability,
        Dimension::Format,
        Dimension::Flow,
    ];

    /// Key used in the LLM response contract
    pub fn key(self) -> &'static str {
        match self {
            Dimension::ToneOfVoice => "Tone of Voice",
            Dimension::Style => "Style",
            Dimension::StructureReadability => "Structure & Readability",
            Dimension::Format => "Format",
            Dimension::Flow => "Flow",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Score and justification for a single rubric dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Nominally 0.0-5.0; not range-checked
    pub score: f64,
    pub reason: String,
}

/// The complete rubric returned by one LLM call.
///
/// Every dimension is a required field, so a response missing any of them
/// fails to deserialize instead of being filled with a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    #[serde(rename = "Tone of Voice")]
    pub tone_of_voice: Criterion,
    #[serde(rename = "Style")]
    pub style: Criterion,
    #[serde(rename = "Structure & Readability")]
    pub structure_readability: Criterion,
    #[serde(rename = "Format")]
    pub format: Criterion,
    #[serde(rename = "Flow")]
    pub flow: Criterion,
}

impl Rubric {
    pub fn get(&self, dimension: Dimension) -> &Criterion {
        match dimension {
            Dimension::ToneOfVoice => &self.tone_of_voice,
            Dimension::Style => &self.style,
            Dimension::StructureReadability => &self.structure_readability,
            Dimension::Format => &self.format,
            Dimension::Flow => &self.flow,
        }
    }

    /// Criteria in rubric order
    pub fn criteria(&self) -> impl Iterator<Item = (Dimension, &Criterion)> {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// A fetched article and where its text was saved
#[derive(Debug, Clone)]
pub struct Article {
    pub url: String,
    pub text: String,
    pub path: PathBuf,
}

/// Result of evaluating one article with one backend
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    /// Local time the article was processed (`%Y-%m-%d %H:%M:%S`)
    pub date: String,
    pub url: String,
    pub filename: PathBuf,
    pub backend: Backend,
    pub rubric: Rubric,
    pub flesch_kincaid_grade: f64,
}

impl EvaluationResult {
    /// Flatten into the 15-column row shared by the CSV and HTML outputs
    pub fn row(&self) -> ResultRow {
        ResultRow {
            date: self.date.clone(),
            url: self.url.clone(),
            filename: self.filename.display().to_string(),
            model: self.backend.name().to_string(),
            tone_of_voice_score: self.rubric.tone_of_voice.score,
            tone_of_voice_reason: self.rubric.tone_of_voice.reason.clone(),
            style_score: self.rubric.style.score,
            style_reason: self.rubric.style.reason.clone(),
            structure_readability_score: self.rubric.structure_readability.score,
            structure_readability_reason: self.rubric.structure_readability.reason.clone(),
            format_score: self.rubric.format.score,
            format_reason: self.rubric.format.reason.clone(),
            flow_score: self.rubric.flow.score,
            flow_reason: self.rubric.flow.reason.clone(),
            flesch_kincaid_grade: self.flesch_kincaid_grade,
        }
    }
}

/// Flat result record. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub date: String,
    pub url: String,
    pub filename: String,
    pub model: String,
    pub tone_of_voice_score: f64,
    pub tone_of_voice_reason: String,
    pub style_score: f64,
    pub style_reason: String,
    pub structure_readability_score: f64,
    pub structure_readability_reason: String,
    pub format_score: f64,
    pub format_reason: String,
    pub flow_score: f64,
    pub flow_reason: String,
    pub flesch_kincaid_grade: f64,
}
