//! Configuration loading for blogeval

mod schema;

pub use schema::{
    BackendOverrides, CliOverrides, Config, PerBackend, Settings, DEFAULT_MIN_CONTENT_LENGTH,
};

use crate::backends::Backend;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".blogevalrc.json";

/// Find and load the config file. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Search for .blogevalrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Default config written by `blogeval init`
pub fn default_config_json() -> String {
    let settings = Settings::default();
    format!(
        r#"{{
  "models": {{
    "openai": "{}",
    "claude": "{}",
    "gemini": "{}"
  }},
  "maxTokens": {},
  "timeoutSecs": {},
  "minContentLength": {},
  "articlesDir": "{}",
  "csvFile": "{}",
  "htmlDir": "{}",
  "template": "{}"
}}
"#,
        settings.models.openai,
        settings.models.claude,
        settings.models.gemini,
        settings.max_tokens,
        settings.timeout_secs,
        settings.min_content_length,
        settings.articles_dir.display(),
        settings.csv_file.display(),
        settings.html_dir.display(),
        settings.template.display(),
    )
}

/// API keys for each backend, read once at startup.
///
/// A missing key is not an error here; it surfaces when that backend is called.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai: Option<String>,
    pub claude: Option<String>,
    pub gemini: Option<String>,
}

impl Credentials {
    /// Read keys from the process environment (after any `.env` file was loaded)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            openai: read(Backend::OpenAi.api_key_var()),
            claude: read(Backend::Claude.api_key_var()),
            gemini: read(Backend::Gemini.api_key_var()).or_else(|| read("GEMINI_API_KEY")),
        }
    }

    pub fn get(&self, backend: Backend) -> Option<&str> {
        match backend {
            Backend::OpenAi => self.openai.as_deref(),
            Backend::Claude => self.claude.as_deref(),
            Backend::Gemini => self.gemini.as_deref(),
        }
    }
}
