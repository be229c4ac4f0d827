//! HTML reporter: fills a static template with the run's results
//!
//! The template carries a `__HTML_RESULTS_JSON__` placeholder which is replaced
//! by the JSON array of result rows; all rendering happens client-side.

use crate::error::Result;
use crate::ResultRow;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

pub const PLACEHOLDER: &str = "__HTML_RESULTS_JSON__";

/// Template used when no template file is present
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/eval_results_template.html");

/// Escapes serialized JSON for embedding inside a `<script>` block
fn escape_json_for_script(s: &str) -> String {
    // `<`, `>` and `&` only occur inside JSON strings, where the unicode
    // escapes decode to the same text; no tag of any case can close the block.
    s.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Reporter that renders the per-run HTML file
pub struct HtmlReporter {
    template: String,
}

impl HtmlReporter {
    /// Reporter using the built-in template
    pub fn new() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(template: String) -> Self {
        Self { template }
    }

    /// Load the template at `path`, falling back to the built-in one if it does not exist
    pub fn from_template_file(path: &Path) -> Result<Self> {
        if path.exists() {
            Ok(Self::with_template(fs::read_to_string(path)?))
        } else {
            Ok(Self::new())
        }
    }

    /// Substitute the rows into the template
    pub fn render(&self, rows: &[ResultRow]) -> Result<String> {
        let json = serde_json::to_string_pretty(rows)?;
        Ok(self
            .template
            .replace(PLACEHOLDER, &escape_json_for_script(&json)))
    }

    /// Write `eval_results_graphs_<timestamp>.html` into `dir`
    pub fn write<Tz>(&self, rows: &[ResultRow], dir: &Path, generated_at: &DateTime<Tz>) -> Result<PathBuf>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        fs::create_dir_all(dir)?;
        let path = dir.join(report_filename(generated_at));
        fs::write(&path, self.render(rows)?)?;
        Ok(path)
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn report_filename<Tz>(generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "eval_results_graphs_{}.html",
        generated_at.format("%Y-%m-%d_%H-%M-%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_result;
    use crate::Backend;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_render_replaces_placeholder() {
        let reporter = HtmlReporter::with_template("<script>const DATA = __HTML_RESULTS_JSON__;</script>".into());
        let rows = vec![sample_result("https://example.com/a", Backend::OpenAi).row()];
        let html = reporter.render(&rows).unwrap();
        assert!(!html.contains(PLACEHOLDER));
        assert!(html.contains("\"tone_of_voice_score\": 4.0"));
        assert!(html.contains("\"model\": \"openai\""));
    }

    #[test]
    fn test_render_escapes_script_close_in_any_case() {
        let mut result = sample_result("https://example.com/a?x=1&y=2", Backend::Claude);
        result.rubric.flow.reason = "x </SCRIPT><img src=x onerror=alert(1)> </script>".to_string();
        let reporter = HtmlReporter::with_template("<script>const DATA = __HTML_RESULTS_JSON__;</script>".into());
        let html = reporter.render(&[result.row()]).unwrap();

        assert_eq!(html.to_lowercase().matches("</script>").count(), 1);
        assert!(!html.contains("<img"));
        assert!(html.contains("\\u003c/SCRIPT\\u003e\\u003cimg"));
    }

    #[test]
    fn test_escaped_json_decodes_to_original_text() {
        let mut result = sample_result("https://example.com/a?x=1&y=2", Backend::Claude);
        result.rubric.flow.reason = "a < b && c > d </Script>".to_string();
        let rows = vec![result.row()];
        let json = escape_json_for_script(&serde_json::to_string(&rows).unwrap());
        let decoded: Vec<ResultRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded[0].flow_reason, "a < b && c > d </Script>");
        assert_eq!(decoded[0].url, "https://example.com/a?x=1&y=2");
    }

    #[test]
    fn test_default_template_has_placeholder() {
        assert!(DEFAULT_TEMPLATE.contains(PLACEHOLDER));
        let html = HtmlReporter::new().render(&[]).unwrap();
        assert!(html.contains("const DATA = [];"));
    }

    #[test]
    fn test_missing_template_file_uses_default() {
        let dir = TempDir::new().unwrap();
        let reporter = HtmlReporter::from_template_file(&dir.path().join("missing.html")).unwrap();
        assert_eq!(reporter.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_write_uses_timestamped_name() {
        let dir = TempDir::new().unwrap();
        let at = Utc.with_ymd_and_hms(2026, 10, 15, 9, 5, 7).unwrap();
        let path = HtmlReporter::new()
            .write(&[], &dir.path().join("html"), &at)
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "eval_results_graphs_2026-10-15_09-05-07.html"
        );
        assert!(path.exists());
    }
}
