//! Rubric evaluation: prompt a backend and normalize its answer

pub mod normalize;
pub mod prompt;

pub use normalize::{parse_rubric, NormalizeError};
pub use prompt::build_prompt;

use crate::backends::{Backend, Completer};
use crate::error::{EvalError, Result};
use crate::Rubric;

/// Scores article text with a [`Completer`]
pub struct Evaluator<C> {
    completer: C,
}

impl<C: Completer> Evaluator<C> {
    pub fn new(completer: C) -> Self {
        Self { completer }
    }

    /// Raw backend output for an article, before normalization
    pub fn raw_response(&self, text: &str, backend: Backend) -> Result<String> {
        let prompt = build_prompt(text);
        self.completer
            .complete(backend, &prompt)
            .map_err(|source| EvalError::Backend { backend, source })
    }

    /// Evaluate an article with one backend
    pub fn evaluate(&self, text: &str, backend: Backend) -> Result<Rubric> {
        let raw = self.raw_response(text, backend)?;
        parse_rubric(&raw).map_err(|source| EvalError::Parse { backend, source })
    }
}
