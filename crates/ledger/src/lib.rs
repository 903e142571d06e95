//! Idempotent recording of budget ledger entries into a remote document store.
//!
//! A [`Ledger`] is one session against the user's database. After
//! [`Ledger::connect_budget`], account, category and payee names are resolved
//! to store ids (payees are created on first use) and transactions, splits and
//! transfers are written under the budget's namespace. A transaction id that
//! already names a document is never overwritten.

pub use commands::{SplitCmd, SplitLineCmd, TransactionCmd, TransferCmd};
pub use documents::{
    Category, NamedDoc, Payee, PayeeDoc, Recorded, SplitLine, TransactionDoc, TransferOutcome,
};
pub use error::LedgerError;
pub use namespace::{BUDGET_PREFIX, BudgetSelector, EntityKind, bare_id};
pub use pacing::{FixedDelay, NoDelay, Pacer};
pub use store::{Credentials, DocumentStore, Query, Selector, SessionInfo, StoreError, WriteAck};

mod cache;
mod commands;
mod documents;
mod error;
mod namespace;
mod ops;
pub mod pacing;
pub mod store;

type ResultLedger<T> = Result<T, LedgerError>;

/// A session on the user's database.
///
/// The session owns its name cache and active budget. Methods that touch
/// them take `&mut self`, so concurrent callers must serialize access or open
/// one session each.
#[derive(Debug)]
pub struct Ledger<S, P = FixedDelay> {
    store: S,
    pacer: P,
    user_db: String,
    selector: Option<BudgetSelector>,
    cache: cache::EntityCache,
}

impl<S> Ledger<S, FixedDelay> {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder(store: S) -> LedgerBuilder<S, FixedDelay> {
        LedgerBuilder {
            store,
            pacer: FixedDelay::default(),
            credentials: None,
            database: None,
        }
    }
}

impl<S, P> Ledger<S, P> {
    /// Name of the database this session writes to.
    pub fn user_db(&self) -> &str {
        &self.user_db
    }

    /// Namespace of the connected budget, if any.
    pub fn budget_selector(&self) -> Option<&BudgetSelector> {
        self.selector.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Whether `name` has already been resolved for `kind` in this session.
    pub fn is_cached(&self, kind: EntityKind, name: &str) -> bool {
        self.cache.contains(kind, name)
    }

    /// Forget every resolved name. The next resolution queries the store again.
    pub fn invalidate_cache(&mut self) {
        tracing::debug!("invalidating entity cache");
        self.cache.clear();
    }

    fn active_selector(&self) -> ResultLedger<&BudgetSelector> {
        self.selector.as_ref().ok_or(LedgerError::NoActiveBudget)
    }
}

/// The builder for `Ledger`
pub struct LedgerBuilder<S, P> {
    store: S,
    pacer: P,
    credentials: Option<Credentials>,
    database: Option<String>,
}

impl<S, P> LedgerBuilder<S, P> {
    /// Replace the pacer used before each store call.
    pub fn pacer<Q: Pacer>(self, pacer: Q) -> LedgerBuilder<S, Q> {
        LedgerBuilder {
            store: self.store,
            pacer,
            credentials: self.credentials,
            database: self.database,
        }
    }

    /// Log in with these credentials and use the session's `userdb` database.
    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Use this database directly, without logging in.
    pub fn database(mut self, name: &str) -> Self {
        self.database = Some(name.to_string());
        self
    }
}

impl<S: DocumentStore, P: Pacer> LedgerBuilder<S, P> {
    /// Construct `Ledger`
    pub async fn build(self) -> ResultLedger<Ledger<S, P>> {
        let user_db = match (self.database, self.credentials) {
            (Some(database), _) => database,
            (None, Some(credentials)) => {
                let session = match self.store.authenticate(&credentials).await {
                    Ok(session) => session,
                    Err(StoreError::AuthenticationFailed(reason)) => {
                        return Err(LedgerError::AuthenticationFailed(reason));
                    }
                    Err(err) => return Err(err.into()),
                };
                session
                    .user_db()
                    .map(ToString::to_string)
                    .ok_or_else(|| {
                        LedgerError::AuthenticationFailed(format!(
                            "no userdb role for user {}",
                            credentials.username
                        ))
                    })?
            }
            (None, None) => {
                return Err(LedgerError::AuthenticationFailed(
                    "credentials or database required".to_string(),
                ));
            }
        };
        tracing::info!("connecting on db {user_db}");

        Ok(Ledger {
            store: self.store,
            pacer: self.pacer,
            user_db,
            selector: None,
            cache: cache::EntityCache::default(),
        })
    }
}
