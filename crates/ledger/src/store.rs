//! The document store contract.
//!
//! The ledger never talks HTTP itself: every read and write goes through a
//! [`DocumentStore`]. Documents cross the boundary as raw JSON values so the
//! store stays agnostic of the ledger's typed documents.

use std::future::Future;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by a [`DocumentStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("store error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("json error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Username and password used to open a store session.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Session descriptor returned by a successful login.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SessionInfo {
    /// The caller's personal database, advertised as a `userdb` role.
    pub fn user_db(&self) -> Option<&str> {
        self.roles
            .iter()
            .map(String::as_str)
            .find(|role| role.starts_with("userdb"))
    }
}

/// Acknowledgement of a successful write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteAck {
    #[serde(default)]
    pub ok: bool,
    pub id: String,
    pub rev: String,
}

/// A conjunction of an `_id` prefix match and an optional exact `name` match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    id_prefix: String,
    name: Option<String>,
}

impl Selector {
    pub fn id_prefix(prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: prefix.into(),
            name: None,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn name_eq(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a document with the given id and name satisfies the selector.
    pub fn matches(&self, id: &str, name: Option<&str>) -> bool {
        id.starts_with(&self.id_prefix)
            && self
                .name
                .as_deref()
                .is_none_or(|expected| name == Some(expected))
    }
}

#[derive(Serialize)]
struct IdRegex<'a> {
    #[serde(rename = "$regex")]
    regex: &'a str,
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let regex = format!("^{}", self.id_prefix);
        let len = if self.name.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("_id", &IdRegex { regex: &regex })?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        map.end()
    }
}

/// Body of a selector query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Query {
    pub selector: Selector,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl Query {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(ToString::to_string).collect();
        self
    }
}

/// Operations the ledger needs from the remote document store.
///
/// `db` is the user's personal database, as found in [`SessionInfo::user_db`].
pub trait DocumentStore {
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<SessionInfo, StoreError>> + Send;

    /// Documents matching `query`, in store order.
    fn query(
        &self,
        db: &str,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<Value>, StoreError>> + Send;

    /// Point lookup. `None` (or a body without `_id`) means the document is absent.
    fn get_document(
        &self,
        db: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Insert a new document and return the store's response, which carries
    /// the assigned `id`.
    fn create_document(
        &self,
        db: &str,
        doc: &Value,
    ) -> impl Future<Output = Result<Value, StoreError>> + Send;

    /// Write a document at its `_id`. Overwrites need the current `_rev`.
    fn save_document(
        &self,
        db: &str,
        doc: &Value,
    ) -> impl Future<Output = Result<WriteAck, StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selector_serializes_to_regex_and_name() {
        let query = Query::new(Selector::id_prefix("b_1234_account_").name("Checking"))
            .fields(&["_id", "name"]);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "selector": {"_id": {"$regex": "^b_1234_account_"}, "name": "Checking"},
                "fields": ["_id", "name"],
            })
        );
    }

    #[test]
    fn selector_without_name_omits_it() {
        let query = Query::new(Selector::id_prefix("budget_"));
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"selector": {"_id": {"$regex": "^budget_"}}})
        );
    }

    #[test]
    fn selector_matches_prefix_and_exact_name() {
        let selector = Selector::id_prefix("b_1_payee_").name("Bakery");
        assert!(selector.matches("b_1_payee_42", Some("Bakery")));
        assert!(!selector.matches("b_1_payee_42", Some("bakery")));
        assert!(!selector.matches("b_2_payee_42", Some("Bakery")));
        assert!(Selector::id_prefix("b_1_").matches("b_1_payee_42", None));
    }

    #[test]
    fn user_db_is_first_userdb_role() {
        let session = SessionInfo {
            name: Some("alice".to_string()),
            roles: vec!["_admin".to_string(), "userdb-616c696365".to_string()],
        };
        assert_eq!(session.user_db(), Some("userdb-616c696365"));
        assert_eq!(SessionInfo::default().user_db(), None);
    }
}
