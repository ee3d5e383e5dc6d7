//! Core application

use anyhow::Result;

use crate::commands;
use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, ENV_LOG};

pub struct CoreApp {
    pub config: AppConfig,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.debug);

        tracing::debug!("{} starting", APP_NAME);
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self {
            config: AppConfig::load(&cli_config)?,
        };
        let output = app.execute(command)?;
        print!("{}", output);
        Ok(())
    }

    /// Run one command and return what it prints
    pub fn execute(&self, command: Commands) -> Result<String> {
        let format = self.config.output.format;
        match command {
            Commands::Filter {
                fields,
                records,
                rules,
            } => {
                let fields = commands::load_fields(&fields)?;
                let values = commands::load_values(&fields, records.as_deref())?;
                let rules = commands::load_rules(rules.as_deref(), &self.config.filter)?;
                let report = commands::run_filter(&fields, &values, rules, self.config.debug)?;
                tracing::info!(
                    applied = report.applied,
                    visible = report.visible.len(),
                    total = fields.len(),
                    "Filter finished"
                );
                commands::render_filter(&report, format)
            }
            Commands::Operators { field_type } => commands::list_operators(field_type, format),
            Commands::Describe { fields } => {
                let fields = commands::load_fields(&fields)?;
                commands::describe_fields(&fields, format)
            }
        }
    }

    fn init_logging(debug: bool) {
        let default_filter = if debug {
            format!("debug,{}=debug", APP_NAME_LOWER)
        } else {
            format!("info,{}=info", APP_NAME_LOWER)
        };

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
