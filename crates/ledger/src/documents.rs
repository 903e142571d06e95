//! Typed views of the documents the ledger reads and writes.
//!
//! Field names follow the store's JSON schema (`_id`, `_rev`,
//! `categorySuggest`, ...). Optional fields are omitted when absent.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{LedgerError, ResultLedger, WriteAck};

const INCOME: &str = "income";
const INCOME_NEXT_MONTH: &str = "incomeNextMonth";
const SPLIT: &str = "split";

/// Value of a transaction's `category` field.
///
/// The store keeps this as a plain string: either one of the reserved names
/// or the bare id of a category document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Income available this month.
    Income,
    /// Income held for next month.
    IncomeNextMonth,
    /// The value is spread across `splits`.
    Split,
    Id(String),
}

impl Category {
    /// Reserved names that never correspond to a category document.
    pub fn sentinel(name: &str) -> Option<Self> {
        match name {
            INCOME => Some(Self::Income),
            INCOME_NEXT_MONTH => Some(Self::IncomeNextMonth),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Income => INCOME,
            Self::IncomeNextMonth => INCOME_NEXT_MONTH,
            Self::Split => SPLIT,
            Self::Id(id) => id,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            INCOME => Self::Income,
            INCOME_NEXT_MONTH => Self::IncomeNextMonth,
            SPLIT => Self::Split,
            _ => Self::Id(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Id(id) => id,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `_id` and `name` of any named document (budget, account, category, payee).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Payee document as stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_suggest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosuggest: Option<bool>,
}

impl PayeeDoc {
    /// A payee created on first use: visible in suggestions, not internal.
    pub fn new(id: String, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category_suggest: None,
            internal: Some(false),
            autosuggest: Some(true),
        }
    }
}

/// Store response to a payee insert. Some stores echo the full document
/// (`_id`), others only acknowledge (`id`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedDoc {
    #[serde(alias = "_id")]
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) category_suggest: Option<String>,
}

/// A resolved payee, as cached by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    /// Bare id (namespace stripped).
    pub id: String,
    pub name: String,
    pub category_suggest: Option<String>,
}

/// One line of a split transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitLine {
    pub value: i64,
    pub category: Category,
    pub payee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// A ledger entry.
///
/// `value` is in signed integer cents. `account` and `payee` hold bare ids;
/// `transfer` holds the bare id of the other leg of a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    pub value: i64,
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splits: Option<Vec<SplitLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<String>,
}

/// Result of a record operation that did not fail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recorded {
    /// The document was written.
    Written(WriteAck),
    /// A document with this id already exists; nothing was written.
    AlreadyRecorded { id: String },
}

impl Recorded {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }

    pub fn ack(&self) -> Option<&WriteAck> {
        match self {
            Self::Written(ack) => Some(ack),
            Self::AlreadyRecorded { .. } => None,
        }
    }
}

/// Per-leg results of a transfer. The legs are independent: either may be
/// written, skipped or failed regardless of the other.
#[derive(Debug)]
pub struct TransferOutcome {
    pub from: ResultLedger<Recorded>,
    pub to: ResultLedger<Recorded>,
}

pub(crate) fn to_document<T: Serialize>(doc: &T) -> ResultLedger<Value> {
    serde_json::to_value(doc).map_err(|err| LedgerError::InvalidDocument(err.to_string()))
}

pub(crate) fn from_document<T: DeserializeOwned>(doc: Value) -> ResultLedger<T> {
    serde_json::from_value(doc).map_err(|err| LedgerError::InvalidDocument(err.to_string()))
}
