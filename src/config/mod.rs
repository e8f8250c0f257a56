pub mod script_config;

pub use script_config::{OnError, ScriptConfig, StepDefinition};

#[cfg(feature = "cli")]
use crate::domain::model::Modality;
#[cfg(feature = "cli")]
use crate::utils::error::{OrderError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use rust_decimal::Decimal;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "freight-orders")]
#[command(about = "Freight pricing and in-memory order management")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate the shipping cost without storing an order
    Quote {
        #[arg(long)]
        modality: String,

        #[arg(long)]
        weight: Decimal,

        #[arg(long)]
        distance: Decimal,

        #[arg(long, default_value = "0")]
        fixed_fee: Decimal,
    },

    /// Execute an order script (TOML) against a fresh in-memory store
    Run {
        /// Path to the TOML script
        #[arg(default_value = "orders.toml")]
        script: PathBuf,

        /// Validate and print the plan without executing
        #[arg(long)]
        dry_run: bool,

        /// Override error_handling.on_error with "continue"
        #[arg(long)]
        continue_on_error: bool,
    },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Quote { modality, .. } => modality.parse::<Modality>().map(|_| ()),
            Command::Run { script, .. } if !script.is_file() => {
                Err(OrderError::ConfigValidationError {
                    field: "script".to_string(),
                    message: format!("Script file '{}' does not exist", script.display()),
                })
            }
            Command::Run { .. } => Ok(()),
        }
    }
}
