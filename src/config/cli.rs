use crate::app::report::OutputFormat;
use crate::config::AppConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "taxdesk")]
#[command(about = "Income tax calculator with a saved calculation history")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the database path from config
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and calculate interactively (default)
    Shell,

    /// Calculate and save a single return
    Calc {
        #[command(flatten)]
        login: LoginArgs,

        #[arg(long)]
        income: String,

        #[arg(long, default_value = "0")]
        deductions: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List saved calculations for a user
    History {
        #[command(flatten)]
        login: LoginArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(short, long)]
    pub password: String,
}

impl Cli {
    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.db_path {
            config.database.path = path.clone();
            tracing::debug!("Database path overridden to: {}", path);
        }
        if self.verbose {
            config.logging.verbose = true;
        }
        if self.log_json {
            config.logging.json = true;
        }
    }
}
