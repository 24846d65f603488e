//! # Application Configuration
//!
//! This module defines the configuration structure for the `adforge-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables. This approach allows for a structured, flexible, and maintainable
//! configuration setup.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// The influencer roster source (a published Google Sheet).
    pub roster: RosterConfig,
    /// A map of named, reusable AI provider configurations.
    pub providers: HashMap<String, ProviderConfig>,
    /// Which named providers the campaign generation pipeline uses.
    pub generation: GenerationConfig,
}

/// The connection details for the influencer roster spreadsheet.
#[derive(Debug, Deserialize, Clone)]
pub struct RosterConfig {
    /// A standard Google Sheet URL; it is converted to a CSV export URL internally.
    pub sheet_url: String,
    /// An optional worksheet `gid` when the roster is not on the first sheet.
    #[serde(default)]
    pub gid: Option<String>,
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider (e.g., "gemini", "openai", "local").
    pub provider: String,
    /// The API URL. Optional for providers like Gemini where it can be derived.
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    pub api_key: Option<String>,
    pub model_name: String,
}

/// Selects which named providers serve each stage of campaign generation.
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// The provider used for the plan completion call.
    pub chat_provider: String,
    /// The provider used to render one image per bingo suggestion.
    pub image_provider: String,
}

fn default_port() -> u16 {
    9090
}

fn default_db_url() -> String {
    "db/adforge.db".to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// This function reads the configuration from a file. It also merges in environment
/// variables, allowing for overrides and substitution in the YAML file.
/// - Top-level keys like `port` and `db_url` are overridden by `PORT` and `DB_URL`.
/// - Nested keys are overridden by `ADFORGE_...` variables (e.g., `ADFORGE_ROSTER__SHEET_URL`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder();

    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        info!("Loading configuration from '{user_config_path}'.");
        user_config_path
    };

    let main_content = read_and_substitute(&main_config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Main config file not found at '{main_config_path}'. Please copy 'config.yml.example' to 'config.yml' and fill in your providers."
        ))
    })?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    let settings = builder
        // Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("ADFORGE")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    // Deserialize the fully resolved configuration into our `AppConfig` struct.
    let config: AppConfig = settings.try_deserialize()?;

    Ok(config)
}
