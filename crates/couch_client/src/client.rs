use ledger::{Credentials, DocumentStore, Query, SessionInfo, StoreError, WriteAck};
use reqwest::{Response, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::CouchClientBuilder;

const SESSION: &str = "_session";
const FIND: &str = "_find";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    docs: Vec<Value>,
}

/// HTTP client for a CouchDB-compatible document store.
#[derive(Clone, Debug)]
pub struct CouchClient {
    base_url: Url,
    http: reqwest::Client,
}

impl CouchClient {
    pub(crate) fn new(base_url: Url, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }

    /// Return a builder for `CouchClient`. Help to build the struct.
    pub fn builder() -> CouchClientBuilder {
        CouchClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                StoreError::InvalidRequest(format!("{} cannot be a base url", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(Box::new(err))
}

fn error_for(status: StatusCode, body: &[u8]) -> StoreError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|err| match err.reason {
            Some(reason) if !reason.is_empty() => reason,
            _ => err.error,
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::UNAUTHORIZED => StoreError::AuthenticationFailed(message),
        _ => StoreError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;
    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }
    Err(error_for(status, &body))
}

impl DocumentStore for CouchClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<SessionInfo, StoreError> {
        let endpoint = self.endpoint(&[SESSION])?;
        tracing::debug!("login on {endpoint} as {}", credentials.username);

        let res = self
            .http
            .post(endpoint)
            .form(&[
                ("name", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;
        decode(res).await
    }

    async fn query(&self, db: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        let endpoint = self.endpoint(&[db, FIND])?;
        tracing::debug!("executing query on {endpoint}");

        let res = self
            .http
            .post(endpoint)
            .json(query)
            .send()
            .await
            .map_err(transport)?;
        let found: FindResponse = decode(res).await?;
        Ok(found.docs)
    }

    async fn get_document(&self, db: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let endpoint = self.endpoint(&[db, id])?;
        tracing::debug!("getting {endpoint}");

        let res = self.http.get(endpoint).send().await.map_err(transport)?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(res).await.map(Some)
    }

    async fn create_document(&self, db: &str, doc: &Value) -> Result<Value, StoreError> {
        let endpoint = self.endpoint(&[db])?;
        tracing::debug!("inserting into {endpoint}");

        let res = self
            .http
            .post(endpoint)
            .json(doc)
            .send()
            .await
            .map_err(transport)?;
        decode(res).await
    }

    async fn save_document(&self, db: &str, doc: &Value) -> Result<WriteAck, StoreError> {
        let id = doc
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::InvalidRequest("document has no _id".to_string()))?;
        let endpoint = self.endpoint(&[db, id])?;
        tracing::debug!("putting {endpoint}");

        let res = self
            .http
            .put(endpoint)
            .json(doc)
            .send()
            .await
            .map_err(transport)?;
        decode(res).await
    }
}
