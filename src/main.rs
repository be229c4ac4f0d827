//! blogeval: Blog Article Writing-Quality Evaluator CLI

use anyhow::{Context, Result};
use blogeval::backends::HttpCompleter;
use blogeval::config::{default_config_json, load_config, CliOverrides, Credentials, CONFIG_FILENAME};
use blogeval::evaluator::Evaluator;
use blogeval::fetcher::HttpPageSource;
use blogeval::reporter::html::DEFAULT_TEMPLATE;
use blogeval::runner::Runner;
use blogeval::BackendSelection;
use chrono::Local;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Score blog articles for writing quality with LLM backends
#[derive(Parser, Debug)]
#[command(name = "blogeval")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Comma-separated article URLs
    #[arg(required = true)]
    urls: Option<String>,

    /// Backend to use: openai, claude, gemini, or all
    #[arg(required = true, value_parser = parse_selection)]
    backend: Option<BackendSelection>,

    /// Path to config file (default: search .blogevalrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for saved article text
    #[arg(long)]
    articles_dir: Option<PathBuf>,

    /// CSV file results are appended to
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Directory for per-run HTML reports
    #[arg(long)]
    html_dir: Option<PathBuf>,

    /// HTML template containing __HTML_RESULTS_JSON__
    #[arg(long)]
    template: Option<PathBuf>,

    /// Minimum extracted text length (characters) required to evaluate an article
    #[arg(long, value_name = "CHARS")]
    min_length: Option<usize>,

    /// Quiet mode (only failures and the final summary)
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .blogevalrc.json and the default HTML template
    Init {
        /// Directory in which to create the files (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn parse_selection(s: &str) -> Result<BackendSelection, String> {
    s.parse().map_err(|e: blogeval::EvalError| e.to_string())
}

/// Split a comma-separated URL list, dropping empty entries
fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(Commands::Init { dir }) = args.command {
        return run_init(dir.as_deref());
    }

    let urls = split_urls(args.urls.as_deref().unwrap_or_default());
    if urls.is_empty() {
        Args::command()
            .error(ErrorKind::ValueValidation, "no article URLs given")
            .exit();
    }
    let selection = args
        .backend
        .expect("backend required when not using subcommand");

    dotenvy::dotenv().ok();

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let settings = load_config(&cwd, args.config.as_deref())?
        .merge_with_cli(CliOverrides {
            articles_dir: args.articles_dir,
            csv_file: args.csv,
            html_dir: args.html_dir,
            template: args.template,
            min_content_length: args.min_length,
        })
        .resolve();

    let completer = HttpCompleter::new(&settings, Credentials::from_env())?;
    let source = HttpPageSource::new(settings.timeout_secs)?;
    let runner = Runner::new(&source, Evaluator::new(completer), &settings).quiet(args.quiet);

    let outcome = runner.run(&urls, &selection.backends());
    runner
        .persist(&outcome, &Local::now())
        .context("Failed to write results")?;

    eprintln!(
        "{}: {} evaluation(s) completed, {} failed",
        "Info".blue(),
        outcome.results.len(),
        outcome.failures.len()
    );

    if outcome.all_failed() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_init(dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let config_path = dir.join(CONFIG_FILENAME);
    write_if_absent(&config_path, &default_config_json())?;

    let template_path = dir.join(blogeval::config::Settings::default().template);
    write_if_absent(&template_path, DEFAULT_TEMPLATE)?;

    Ok(ExitCode::SUCCESS)
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        eprintln!(
            "{}: {} already exists; remove it first to regenerate",
            "Warning".yellow(),
            path.display()
        );
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("{}: Created {}", "Info".blue(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_urls_trims_and_drops_empty() {
        assert_eq!(
            split_urls(" https://a.com/x , ,https://b.com/y,"),
            vec!["https://a.com/x".to_string(), "https://b.com/y".to_string()]
        );
        assert!(split_urls(" , ").is_empty());
    }

    #[test]
    fn test_args_parse_all() {
        let args = Args::try_parse_from(["blogeval", "https://a.com", "all"]).unwrap();
        assert_eq!(args.backend, Some(BackendSelection::All));
    }

    #[test]
    fn test_args_reject_unknown_backend() {
        let err = Args::try_parse_from(["blogeval", "https://a.com", "llama"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
