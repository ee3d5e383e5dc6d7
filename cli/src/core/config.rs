use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use formbase_engine::FilterLimits;
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME};

// =============================================================================
// Output Format Enum
// =============================================================================

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// =============================================================================
// File Config (all keys optional)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputFileConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterFileConfig {
    pub max_rules: Option<usize>,
    pub max_rules_json_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub output: Option<OutputFileConfig>,
    pub filter: Option<FilterFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(output) = other.output {
            let current = self.output.get_or_insert_with(OutputFileConfig::default);
            if output.format.is_some() {
                tracing::trace!(format = ?output.format, "Merging output.format");
                current.format = output.format;
            }
        }

        if let Some(filter) = other.filter {
            let current = self.filter.get_or_insert_with(FilterFileConfig::default);
            if filter.max_rules.is_some() {
                tracing::trace!(max_rules = ?filter.max_rules, "Merging filter.max_rules");
                current.max_rules = filter.max_rules;
            }
            if filter.max_rules_json_bytes.is_some() {
                tracing::trace!(
                    max_rules_json_bytes = ?filter.max_rules_json_bytes,
                    "Merging filter.max_rules_json_bytes"
                );
                current.max_rules_json_bytes = filter.max_rules_json_bytes;
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub filter: FilterLimits,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.formbase/formbase.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Ok(Self::resolve(cli, file_config))
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    pub fn resolve(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_output = file_config.output.unwrap_or_default();
        let file_filter = file_config.filter.unwrap_or_default();
        let defaults = FilterLimits::default();

        let format = cli.format.or(file_output.format).unwrap_or_default();

        let filter = FilterLimits {
            max_rules: cli
                .max_rules
                .or(file_filter.max_rules)
                .unwrap_or(defaults.max_rules),
            max_rules_json_bytes: file_filter
                .max_rules_json_bytes
                .unwrap_or(defaults.max_rules_json_bytes),
        };

        // debug: CLI/env flag takes precedence, then file config, default false
        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let config = Self {
            output: OutputConfig { format },
            filter,
            debug,
        };
        tracing::debug!(
            format = %config.output.format,
            max_rules = config.filter.max_rules,
            debug = config.debug,
            "Configuration resolved"
        );
        config
    }
}

/// Get profile config path (~/.formbase/formbase.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
