//! Append-only CSV log of evaluation results

use crate::error::Result;
use crate::ResultRow;
use csv::WriterBuilder;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Column names, in order
pub const COLUMNS: [&str; 15] = [
    "date",
    "url",
    "filename",
    "model",
    "tone_of_voice_score",
    "tone_of_voice_reason",
    "style_score",
    "style_reason",
    "structure_readability_score",
    "structure_readability_reason",
    "format_score",
    "format_reason",
    "flow_score",
    "flow_reason",
    "flesch_kincaid_grade",
];

/// Whether the file exists and its first line starts with the header
pub fn has_header(path: &Path) -> Result<bool> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    let mut first = String::new();
    BufReader::new(file).read_line(&mut first)?;
    Ok(first.trim().starts_with(COLUMNS[0]))
}

/// Append rows to the CSV at `path`, writing the header only if it is missing
pub fn append_rows(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let write_header = !has_header(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_result;
    use crate::Backend;
    use tempfile::TempDir;

    fn read_records(path: &Path) -> Vec<ResultRow> {
        csv::Reader::from_path(path)
            .unwrap()
            .deserialize::<ResultRow>()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_header_written_on_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eval_results.csv");
        let rows = vec![sample_result("https://example.com/a", Backend::OpenAi).row()];
        append_rows(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let first_line = content.lines().next().unwrap();
        assert_eq!(first_line, COLUMNS.join(","));
        assert_eq!(read_records(&path), rows);
    }

    #[test]
    fn test_second_append_keeps_single_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eval_results.csv");
        let first = vec![sample_result("https://example.com/a", Backend::OpenAi).row()];
        let second = vec![
            sample_result("https://example.com/b", Backend::Claude).row(),
            sample_result("https://example.com/b", Backend::Gemini).row(),
        ];
        append_rows(&path, &first).unwrap();
        append_rows(&path, &second).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("date,url,filename").count(), 1);
        let records = read_records(&path);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].model, "gemini");
    }

    #[test]
    fn test_reasons_with_commas_are_quoted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("eval_results.csv");
        let mut result = sample_result("https://example.com/a", Backend::Claude);
        result.rubric.style.reason = "Clear, \"punchy\", varied".to_string();
        append_rows(&path, &[result.row()]).unwrap();
        assert_eq!(read_records(&path)[0].style_reason, "Clear, \"punchy\", varied");
    }

    #[test]
    fn test_has_header_on_missing_and_headerless_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.csv");
        assert!(!has_header(&path).unwrap());
        fs::write(&path, "2026-01-01,https://a\n").unwrap();
        assert!(!has_header(&path).unwrap());
    }
}
