//! Config schema and deserialization

use crate::backends::Backend;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 100;
pub const DEFAULT_ARTICLES_DIR: &str = "articles";
pub const DEFAULT_CSV_FILE: &str = "eval_results.csv";
pub const DEFAULT_HTML_DIR: &str = "eval_results_html";
pub const DEFAULT_TEMPLATE: &str = "eval_results_template.html";

/// Optional per-backend string values (model ids, base URLs)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendOverrides {
    #[serde(default)]
    pub openai: Option<String>,
    #[serde(default)]
    pub claude: Option<String>,
    #[serde(default)]
    pub gemini: Option<String>,
}

impl BackendOverrides {
    fn resolve(self, defaults: fn(Backend) -> &'static str) -> PerBackend {
        PerBackend {
            openai: self.openai.unwrap_or_else(|| defaults(Backend::OpenAi).to_string()),
            claude: self.claude.unwrap_or_else(|| defaults(Backend::Claude).to_string()),
            gemini: self.gemini.unwrap_or_else(|| defaults(Backend::Gemini).to_string()),
        }
    }
}

/// Root config structure for .blogevalrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Model id per backend
    #[serde(default)]
    pub models: BackendOverrides,

    /// API base URL per backend (for proxies or compatible gateways)
    #[serde(default)]
    pub base_urls: BackendOverrides,

    /// Output token budget for each LLM call. Default: 2048
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// HTTP timeout in seconds. Default: 120
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Minimum extracted text length before an article is evaluated. Default: 100
    #[serde(default)]
    pub min_content_length: Option<usize>,

    #[serde(default)]
    pub articles_dir: Option<PathBuf>,

    #[serde(default)]
    pub csv_file: Option<PathBuf>,

    #[serde(default)]
    pub html_dir: Option<PathBuf>,

    /// HTML template containing the `__HTML_RESULTS_JSON__` placeholder
    #[serde(default)]
    pub template: Option<PathBuf>,
}

/// Values given on the command line; these win over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub articles_dir: Option<PathBuf>,
    pub csv_file: Option<PathBuf>,
    pub html_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub min_content_length: Option<usize>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if cli.articles_dir.is_some() {
            self.articles_dir = cli.articles_dir;
        }
        if cli.csv_file.is_some() {
            self.csv_file = cli.csv_file;
        }
        if cli.html_dir.is_some() {
            self.html_dir = cli.html_dir;
        }
        if cli.template.is_some() {
            self.template = cli.template;
        }
        if cli.min_content_length.is_some() {
            self.min_content_length = cli.min_content_length;
        }
        self
    }

    /// Fill in defaults for everything left unset
    pub fn resolve(self) -> Settings {
        Settings {
            models: self.models.resolve(default_model),
            base_urls: self.base_urls.resolve(default_base_url),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            min_content_length: self
                .min_content_length
                .unwrap_or(DEFAULT_MIN_CONTENT_LENGTH),
            articles_dir: self
                .articles_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTICLES_DIR)),
            csv_file: self
                .csv_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_FILE)),
            html_dir: self
                .html_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HTML_DIR)),
            template: self
                .template
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE)),
        }
    }
}

fn default_model(backend: Backend) -> &'static str {
    match backend {
        Backend::OpenAi => "gpt-4.1",
        Backend::Claude => "claude-3-sonnet-20240229",
        Backend::Gemini => "gemini-2.0-flash",
    }
}

fn default_base_url(backend: Backend) -> &'static str {
    match backend {
        Backend::OpenAi => "https://api.openai.com/v1",
        Backend::Claude => "https://api.anthropic.com/v1",
        Backend::Gemini => "https://generativelanguage.googleapis.com/v1beta",
    }
}

/// Resolved string value for each backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerBackend {
    pub openai: String,
    pub claude: String,
    pub gemini: String,
}

impl PerBackend {
    pub fn get(&self, backend: Backend) -> &str {
        match backend {
            Backend::OpenAi => &self.openai,
            Backend::Claude => &self.claude,
            Backend::Gemini => &self.gemini,
        }
    }
}

/// Effective settings for a run (config file + CLI + defaults)
#[derive(Debug, Clone)]
pub struct Settings {
    pub models: PerBackend,
    pub base_urls: PerBackend,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub min_content_length: usize,
    pub articles_dir: PathBuf,
    pub csv_file: PathBuf,
    pub html_dir: PathBuf,
    pub template: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().resolve()
    }
}
