//! Console reporter with colored output

use crate::{Article, Backend, EvaluationResult};
use colored::{Color, Colorize};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn bold(&self, s: &str) -> String {
        if self.use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    /// Banner printed once per article before its evaluations
    pub fn article_header(&self, article: &Article, date: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", self.bold(&format!("{:=^width$}", " BLOG ARTICLE EVALUATION ", width = RULE_WIDTH)));
        let _ = writeln!(out, "Date: {}", date);
        let _ = writeln!(out, "Source URL: {}", article.url);
        let _ = writeln!(out, "Saved as: {}", article.path.display());
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        out
    }

    /// Scores, reasons, and readability for one backend
    pub fn evaluation(&self, result: &EvaluationResult) -> String {
        let label = result.backend.name().to_uppercase();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{}",
            self.bold(&format!("{:-^width$}", format!(" SCORES & REASONING ({}) ", label), width = RULE_WIDTH))
        );
        for (dimension, criterion) in result.rubric.criteria() {
            let _ = writeln!(out, "\n{}:", dimension.key().to_uppercase());
            let _ = writeln!(out, "  Score   : {}/5", self.colorize_score(criterion.score));
            let _ = writeln!(out, "  Reason  : {}", criterion.reason);
        }
        let _ = writeln!(out, "{}\n", "-".repeat(RULE_WIDTH));

        let _ = writeln!(
            out,
            "{}",
            self.bold(&format!("{:-^width$}", format!(" READABILITY ({}) ", label), width = RULE_WIDTH))
        );
        let _ = writeln!(out, "Flesch-Kincaid Grade Level: {:.2}", result.flesch_kincaid_grade);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        out
    }

    /// `Info: <message>` with a blue label
    pub fn info(&self, message: &str) -> String {
        self.labelled("Info", Color::Blue, message)
    }

    /// `Warning: <message>` with a yellow label
    pub fn warning(&self, message: &str) -> String {
        self.labelled("Warning", Color::Yellow, message)
    }

    /// `Error: <message>` with a red label
    pub fn error(&self, message: &str) -> String {
        self.labelled("Error", Color::Red, message)
    }

    fn labelled(&self, label: &str, color: Color, message: &str) -> String {
        if self.use_colors {
            format!("{}: {}", label.color(color), message)
        } else {
            format!("{}: {}", label, message)
        }
    }

    pub fn print_article_header(&self, article: &Article, date: &str) {
        print!("{}", self.article_header(article, date));
    }

    pub fn print_evaluation(&self, result: &EvaluationResult) {
        print!("{}", self.evaluation(result));
    }

    pub fn print_evaluating(&self, backend: Backend) {
        println!("\nEvaluating with {}...", backend);
    }

    fn colorize_score(&self, score: f64) -> String {
        let text = format!("{}", score);
        if !self.use_colors {
            return text;
        }
        if score >= 4.1 {
            text.green().to_string()
        } else if score >= 3.1 {
            text.bright_green().to_string()
        } else if score >= 2.1 {
            text.yellow().to_string()
        } else if score >= 1.1 {
            text.bright_red().to_string()
        } else {
            text.red().to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
