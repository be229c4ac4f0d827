//! Error taxonomy for fetching, evaluating, and persisting articles

use crate::backends::{Backend, BackendFailure};
use crate::evaluator::normalize::NormalizeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Error)]
pub enum EvalError {
    /// HTTP failure fetching the source page. `status` is absent for transport errors.
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("extracted content from {url} is too short ({length} < {minimum} characters)")]
    ContentTooShort {
        url: String,
        length: usize,
        minimum: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{backend} request failed: {source}")]
    Backend {
        backend: Backend,
        #[source]
        source: BackendFailure,
    },

    #[error("could not parse {backend} response as rubric JSON: {source}")]
    Parse {
        backend: Backend,
        #[source]
        source: NormalizeError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EvalError {
    /// Backend this error is attributed to, if any
    pub fn backend(&self) -> Option<Backend> {
        match self {
            EvalError::Backend { backend, .. } | EvalError::Parse { backend, .. } => Some(*backend),
            _ => None,
        }
    }
}
