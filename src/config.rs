use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".tkmrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &["**/*.spec.ts"];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source root walked for templates and sources.
    #[serde(default = "default_input")]
    pub input: String,
    /// Directory holding the translation files.
    #[serde(default = "default_output", alias = "i18n")]
    pub output: String,
    /// Comma-delimited language codes.
    #[serde(default = "default_langs")]
    pub langs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub keep_flat: Vec<String>,
    /// Transloco config declaring `scopeMapping`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transloco_config: Option<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_input() -> String {
    "src".to_string()
}

fn default_output() -> String {
    "src/assets/i18n".to_string()
}

fn default_langs() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            langs: default_langs(),
            default_value: None,
            keep_flat: Vec::new(),
            transloco_config: None,
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or no
    /// language is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if split_list(&self.langs).is_empty() {
            anyhow::bail!("No language configured in 'langs'");
        }

        Ok(())
    }
}

/// Split a comma-delimited list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip trailing separators from the output directory (`i18n/` -> `i18n`).
pub fn normalize_output_dir(output: &str) -> PathBuf {
    let trimmed = output.trim_end_matches('/');
    if trimmed.is_empty() {
        PathBuf::from(output)
    } else {
        PathBuf::from(trimmed)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
