use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("client error: {0}")]
    Client(#[from] couch_client::BuildError),
    #[error("ledger error: {0}")]
    Ledger(#[from] ledger::LedgerError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("usage error: {0}")]
    Usage(String),
}
