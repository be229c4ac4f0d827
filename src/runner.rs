//! Run orchestration: fetch, evaluate, score readability, persist
//!
//! Processing is strictly sequential. A failure for one URL or one
//! (URL, backend) pair is logged and recorded, and the run moves on.

use crate::backends::{Backend, Completer};
use crate::config::Settings;
use crate::error::{EvalError, Result};
use crate::evaluator::Evaluator;
use crate::fetcher::{fetch_article_content, save_article, PageSource};
use crate::readability::flesch_kincaid_grade;
use crate::reporter::{append_rows, ConsoleReporter, HtmlReporter};
use crate::{Article, EvaluationResult, ResultRow};
use chrono::{DateTime, Local};
use std::path::PathBuf;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A URL or (URL, backend) pair that did not produce a result
#[derive(Debug)]
pub struct Failure {
    pub url: String,
    pub backend: Option<Backend>,
    pub error: EvalError,
}

/// Everything a run produced
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub results: Vec<EvaluationResult>,
    pub failures: Vec<Failure>,
}

impl RunOutcome {
    pub fn rows(&self) -> Vec<ResultRow> {
        self.results.iter().map(EvaluationResult::row).collect()
    }

    /// True when work was attempted and nothing succeeded
    pub fn all_failed(&self) -> bool {
        self.results.is_empty() && !self.failures.is_empty()
    }
}

/// Files written by [`Runner::persist`]
#[derive(Debug)]
pub struct Persisted {
    pub html: PathBuf,
    /// Absent when the run produced no results
    pub csv: Option<PathBuf>,
}

/// Human-readable description of a failure, naming the URL and backend involved
pub fn failure_message(url: &str, backend: Option<Backend>, error: &EvalError) -> String {
    match (error, backend) {
        (EvalError::ContentTooShort { .. }, _) => format!("Skipping {}: {}", url, error),
        (_, Some(backend)) => format!("Error evaluating {} with {}: {}", url, backend, error),
        (EvalError::Fetch { .. }, None) => error.to_string(),
        (_, None) => format!("Error processing {}: {}", url, error),
    }
}

/// Drives a batch evaluation run
pub struct Runner<'a, C> {
    source: &'a dyn PageSource,
    evaluator: Evaluator<C>,
    settings: &'a Settings,
    console: ConsoleReporter,
    quiet: bool,
}

impl<'a, C: Completer> Runner<'a, C> {
    pub fn new(source: &'a dyn PageSource, evaluator: Evaluator<C>, settings: &'a Settings) -> Self {
        Self {
            source,
            evaluator,
            settings,
            console: ConsoleReporter::new(),
            quiet: false,
        }
    }

    /// Suppress progress and score output (failures are still reported)
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn without_colors(mut self) -> Self {
        self.console = self.console.without_colors();
        self
    }

    /// Evaluate every URL with every backend, in order
    pub fn run(&self, urls: &[String], backends: &[Backend]) -> RunOutcome {
        let mut outcome = RunOutcome::default();

        for url in urls {
            let article = match self.prepare_article(url) {
                Ok(article) => article,
                Err(error) => {
                    self.report_failure(url, None, &error);
                    outcome.failures.push(Failure {
                        url: url.clone(),
                        backend: None,
                        error,
                    });
                    continue;
                }
            };

            let date = Local::now().format(DATE_FORMAT).to_string();
            if !self.quiet {
                self.console.print_article_header(&article, &date);
            }

            for &backend in backends {
                match self.evaluate(&article, backend, &date) {
                    Ok(result) => {
                        if !self.quiet {
                            self.console.print_evaluation(&result);
                        }
                        outcome.results.push(result);
                    }
                    Err(error) => {
                        self.report_failure(url, Some(backend), &error);
                        outcome.failures.push(Failure {
                            url: url.clone(),
                            backend: Some(backend),
                            error,
                        });
                    }
                }
            }
        }

        outcome
    }

    /// Fetch, check length, and save one article
    pub fn prepare_article(&self, url: &str) -> Result<Article> {
        if !self.quiet {
            eprintln!("{}", self.console.info(&format!("Fetching article from {}", url)));
        }
        let text = fetch_article_content(self.source, url)?;

        let length = text.trim().chars().count();
        if length < self.settings.min_content_length {
            return Err(EvalError::ContentTooShort {
                url: url.to_string(),
                length,
                minimum: self.settings.min_content_length,
            });
        }

        let path = save_article(&text, url, &self.settings.articles_dir)?;
        Ok(Article {
            url: url.to_string(),
            text,
            path,
        })
    }

    fn evaluate(&self, article: &Article, backend: Backend, date: &str) -> Result<EvaluationResult> {
        if !self.quiet {
            self.console.print_evaluating(backend);
        }
        let rubric = self.evaluator.evaluate(&article.text, backend)?;

        Ok(EvaluationResult {
            date: date.to_string(),
            url: article.url.clone(),
            filename: article.path.clone(),
            backend,
            rubric,
            flesch_kincaid_grade: flesch_kincaid_grade(&article.text),
        })
    }

    fn report_failure(&self, url: &str, backend: Option<Backend>, error: &EvalError) {
        let message = failure_message(url, backend, error);
        match error {
            EvalError::ContentTooShort { .. } => eprintln!("{}", self.console.warning(&message)),
            _ => eprintln!("{}", self.console.error(&message)),
        }
    }

    /// Write the HTML report and append results to the CSV log
    pub fn persist(&self, outcome: &RunOutcome, generated_at: &DateTime<Local>) -> Result<Persisted> {
        let rows = outcome.rows();

        let html = HtmlReporter::from_template_file(&self.settings.template)?.write(
            &rows,
            &self.settings.html_dir,
            generated_at,
        )?;
        if !self.quiet {
            eprintln!(
                "{}",
                self.console
                    .info(&format!("HTML visualization written to {}", html.display()))
            );
        }

        let csv = if rows.is_empty() {
            None
        } else {
            append_rows(&self.settings.csv_file, &rows)?;
            if !self.quiet {
                eprintln!(
                    "{}",
                    self.console.info(&format!(
                        "Results appended to {}",
                        self.settings.csv_file.display()
                    ))
                );
            }
            Some(self.settings.csv_file.clone())
        };

        Ok(Persisted { html, csv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::BackendFailure;
    use std::io;

    const URL: &str = "https://example.com/post";

    #[test]
    fn test_io_failure_names_url() {
        let error = EvalError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"));
        let message = failure_message(URL, None, &error);
        assert!(message.contains(URL), "{}", message);
        assert!(message.contains("Permission denied"));
    }

    #[test]
    fn test_backend_failure_names_url_and_backend() {
        let error = EvalError::Backend {
            backend: Backend::Gemini,
            source: BackendFailure::RateLimited,
        };
        let message = failure_message(URL, Some(Backend::Gemini), &error);
        assert!(message.starts_with("Error evaluating https://example.com/post with gemini"));
    }

    #[test]
    fn test_fetch_failure_is_not_repeated() {
        let error = EvalError::Fetch {
            url: URL.to_string(),
            status: Some(404),
            message: "HTTP 404 Not Found".to_string(),
        };
        let message = failure_message(URL, None, &error);
        assert_eq!(message.matches(URL).count(), 1);
    }

    #[test]
    fn test_short_content_is_a_skip() {
        let error = EvalError::ContentTooShort {
            url: URL.to_string(),
            length: 6,
            minimum: 100,
        };
        assert!(failure_message(URL, None, &error).starts_with("Skipping https://example.com/post"));
    }
}
