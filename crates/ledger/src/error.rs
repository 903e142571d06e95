//! The module contains the errors the ledger can return.
//!
//! - [`NotFound`] is returned when an account or category name does not
//!   resolve. Nothing is created in its place.
//! - [`Store`] wraps transport and store failures, which are never retried.
//!
//! A transaction that already exists is not an error: see
//! [`Recorded::AlreadyRecorded`](crate::Recorded::AlreadyRecorded).
//!
//!  [`NotFound`]: LedgerError::NotFound
//!  [`Store`]: LedgerError::Store
use thiserror::Error;

use crate::{EntityKind, StoreError};

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("No active budget: connect a budget first")]
    NoActiveBudget,
    #[error("Budget \"{0}\" not found!")]
    BudgetNotFound(String),
    #[error("{kind} \"{name}\" not found!")]
    NotFound { kind: EntityKind, name: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AuthenticationFailed(a), Self::AuthenticationFailed(b)) => a == b,
            (Self::NoActiveBudget, Self::NoActiveBudget) => true,
            (Self::BudgetNotFound(a), Self::BudgetNotFound(b)) => a == b,
            (
                Self::NotFound { kind: ka, name: na },
                Self::NotFound { kind: kb, name: nb },
            ) => ka == kb && na == nb,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDocument(a), Self::InvalidDocument(b)) => a == b,
            (Self::Store(a), Self::Store(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
