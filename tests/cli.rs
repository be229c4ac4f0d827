//! CLI behavior tests: usage errors, exit codes, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn blogeval_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_blogeval"));
    for var in ["OPENAI_API_KEY", "ANTHROPIC_API_KEY", "GOOGLE_API_KEY", "GEMINI_API_KEY"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn no_args_is_usage_error() {
    let mut cmd = blogeval_cmd();
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_backend_is_usage_error() {
    let mut cmd = blogeval_cmd();
    cmd.arg("https://example.com/post");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("BACKEND"));
}

#[test]
fn too_many_args_is_usage_error() {
    let mut cmd = blogeval_cmd();
    cmd.args(["https://example.com/post", "openai", "extra"]);
    cmd.assert().failure().code(2);
}

#[test]
fn unknown_backend_is_usage_error() {
    let mut cmd = blogeval_cmd();
    cmd.args(["https://example.com/post", "llama"]);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown backend 'llama'"));
}

#[test]
fn blank_url_list_is_usage_error() {
    let mut cmd = blogeval_cmd();
    cmd.args([" , ", "all"]);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no article URLs"));
}

#[test]
fn unreachable_url_fails_run_but_writes_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = blogeval_cmd();
    cmd.current_dir(dir.path())
        .args(["http://127.0.0.1:9/post", "openai"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to fetch http://127.0.0.1:9/post"));

    let html_dir = dir.path().join("eval_results_html");
    let reports: Vec<_> = fs::read_dir(&html_dir).unwrap().collect();
    assert_eq!(reports.len(), 1);
    assert!(!dir.path().join("eval_results.csv").exists());
}

#[test]
fn init_creates_config_and_template() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = blogeval_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert().success();

    let config = fs::read_to_string(dir.path().join(".blogevalrc.json")).unwrap();
    assert!(config.contains("\"models\""));
    assert!(config.contains("minContentLength"));
    let template = fs::read_to_string(dir.path().join("eval_results_template.html")).unwrap();
    assert!(template.contains("__HTML_RESULTS_JSON__"));
}

#[test]
fn init_does_not_overwrite() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".blogevalrc.json");
    fs::write(&config_path, "{}").unwrap();

    let mut cmd = blogeval_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "{}");
}
