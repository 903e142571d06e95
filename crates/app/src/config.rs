use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ledger::SplitLineCmd;
use serde::Deserialize;
use uuid::Uuid;

use crate::{commands::parse_split_line, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/financier.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub budget: String,
    pub level: String,
    /// Delay before each store request, in milliseconds.
    pub pacing_ms: u64,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5984/".to_string(),
            username: String::new(),
            password: String::new(),
            budget: String::new(),
            level: "info".to_string(),
            pacing_ms: 500,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "financier", disable_version_flag = true)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override store URL (e.g. http://127.0.0.1:5984/).
    #[arg(long)]
    url: Option<String>,
    /// Override username (password is never read from CLI).
    #[arg(long)]
    username: Option<String>,
    /// Override budget name.
    #[arg(long)]
    budget: Option<String>,
    /// Override log level.
    #[arg(long)]
    level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every budget in the database.
    Budgets,
    /// List the accounts of the budget.
    Accounts,
    /// Record a transaction against one category.
    Transaction(TransactionArgs),
    /// Record a transaction split across several categories.
    Split(SplitArgs),
    /// Move money between two accounts.
    Transfer(TransferArgs),
}

#[derive(Debug, clap::Args)]
pub struct TransactionArgs {
    #[arg(long)]
    pub account: String,
    #[arg(long)]
    pub payee: String,
    /// Defaults to the payee's suggested category.
    #[arg(long)]
    pub category: Option<String>,
    /// Amount in cents; negative for outflows.
    #[arg(long, allow_hyphen_values = true)]
    pub value: i64,
    /// YYYY-MM-DD, defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub memo: Option<String>,
    /// Reuse a transaction id to make the call idempotent.
    #[arg(long)]
    pub id: Option<Uuid>,
}

#[derive(Debug, clap::Args)]
pub struct SplitArgs {
    #[arg(long)]
    pub account: String,
    #[arg(long)]
    pub payee: String,
    #[arg(long, allow_hyphen_values = true)]
    pub value: i64,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub memo: Option<String>,
    #[arg(long)]
    pub id: Option<Uuid>,
    /// VALUE:CATEGORY:PAYEE[:MEMO], repeated once per line.
    #[arg(long = "line", required = true, allow_hyphen_values = true, value_parser = parse_split_line)]
    pub lines: Vec<SplitLineCmd>,
}

#[derive(Debug, clap::Args)]
pub struct TransferArgs {
    #[arg(long)]
    pub from: String,
    #[arg(long)]
    pub to: String,
    /// Amount moved, in cents.
    #[arg(long, allow_hyphen_values = true)]
    pub value: i64,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub memo: Option<String>,
    /// Category of the outgoing leg.
    #[arg(long)]
    pub from_category: Option<String>,
    #[arg(long, requires = "to_id")]
    pub from_id: Option<Uuid>,
    #[arg(long, requires = "from_id")]
    pub to_id: Option<Uuid>,
}

pub fn load() -> Result<(AppConfig, Command)> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<(AppConfig, Command)> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINANCIER"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(url) = args.url {
        settings.url = url;
    }
    if let Some(username) = args.username {
        settings.username = username;
    }
    if let Some(budget) = args.budget {
        settings.budget = budget;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok((settings, args.command))
}
