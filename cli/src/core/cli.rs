use clap::{Parser, Subcommand};

use std::path::PathBuf;

use formbase_engine::RuleFieldType;

use super::config::OutputFormat;
use super::constants::{ENV_CONFIG, ENV_DEBUG, ENV_FORMAT, ENV_MAX_RULES};

#[derive(Parser)]
#[command(name = "formbase")]
#[command(version, about = "Filter form fields with AND/OR rule chains", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, short = 'f', global = true, env = ENV_FORMAT, value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,

    /// Enable debug mode (verbose logging, rule list echoed in output)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Maximum number of rules accepted in a rule list
    #[arg(long, global = true, env = ENV_MAX_RULES)]
    pub max_rules: Option<usize>,
}

/// Parse output format from CLI/env string
fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format '{}'. Valid options: text, json",
            s
        )),
    }
}

/// Parse a rule category from a CLI argument
fn parse_rule_field_type(s: &str) -> Result<RuleFieldType, String> {
    s.to_lowercase().parse().map_err(|_| {
        format!(
            "Invalid field type '{}'. Valid options: text, multiline, dropdown, date, location, image, numeric",
            s
        )
    })
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Apply a rule list to the latest record of a form and list the visible fields
    Filter {
        /// Form schema (JSON array of field definitions)
        #[arg(long)]
        fields: PathBuf,
        /// Saved records (JSON array, latest last) or a single value object
        #[arg(long)]
        records: Option<PathBuf>,
        /// Rule list (JSON array). Without it nothing is filtered.
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// List the operators each rule field type accepts
    Operators {
        /// Only this field type
        #[arg(value_parser = parse_rule_field_type)]
        field_type: Option<RuleFieldType>,
    },
    /// Show which rule field types and operators apply to each field of a schema
    Describe {
        /// Form schema (JSON array of field definitions)
        #[arg(long)]
        fields: PathBuf,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub debug: bool,
    pub max_rules: Option<usize>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        format: cli.format,
        debug: cli.debug,
        max_rules: cli.max_rules,
    };
    (config, cli.command)
}
