//! CouchDB-compatible HTTP implementation of [`ledger::DocumentStore`].
//!
//! The client keeps the session cookie returned by `_session`, so a single
//! [`CouchClient::authenticate`] call authorizes every later request.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub use client::CouchClient;

mod client;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors building a [`CouchClient`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// The builder for `CouchClient`
#[derive(Debug, Default)]
pub struct CouchClientBuilder {
    url: String,
    timeout: Option<Duration>,
}

impl CouchClientBuilder {
    /// Base url of the server, e.g. `https://couch.example.org/`.
    pub fn url(mut self, url: &str) -> CouchClientBuilder {
        self.url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> CouchClientBuilder {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<CouchClient, BuildError> {
        let base_url =
            Url::parse(&self.url).map_err(|err| BuildError::InvalidUrl(format!("{err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BuildError::InvalidUrl(format!(
                "{base_url} cannot be a base url"
            )));
        }
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;
        tracing::debug!("couch client on {base_url}");
        Ok(CouchClient::new(base_url, http))
    }
}
