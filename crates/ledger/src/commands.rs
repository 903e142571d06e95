//! Command structs for ledger record operations.
//!
//! These types group the parameters of the record operations, keeping call
//! sites readable and avoiding long argument lists. Names (account, payee,
//! category) are resolved by the session when the command runs.

use chrono::NaiveDate;
use uuid::Uuid;

/// Record a single-category transaction.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    pub account: String,
    pub payee: String,
    /// When `None`, the payee's suggested category is used if it has one.
    pub category: Option<String>,
    pub value: i64,
    pub date: NaiveDate,
    pub memo: Option<String>,
    /// Caller-supplied transaction id; a fresh one is generated otherwise.
    pub id: Option<Uuid>,
}

impl TransactionCmd {
    #[must_use]
    pub fn new(
        account: impl Into<String>,
        payee: impl Into<String>,
        value: i64,
        date: NaiveDate,
    ) -> Self {
        Self {
            account: account.into(),
            payee: payee.into(),
            category: None,
            value,
            date,
            memo: None,
            id: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    #[must_use]
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

/// One line of a split transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitLineCmd {
    pub value: i64,
    pub category: String,
    pub payee: String,
    pub memo: Option<String>,
}

impl SplitLineCmd {
    #[must_use]
    pub fn new(value: i64, category: impl Into<String>, payee: impl Into<String>) -> Self {
        Self {
            value,
            category: category.into(),
            payee: payee.into(),
            memo: None,
        }
    }

    #[must_use]
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// Record a transaction whose value is spread across several lines.
///
/// Line values are not checked against `value`.
#[derive(Clone, Debug)]
pub struct SplitCmd {
    pub account: String,
    pub payee: String,
    pub value: i64,
    pub date: NaiveDate,
    pub memo: Option<String>,
    pub lines: Vec<SplitLineCmd>,
    pub id: Option<Uuid>,
}

impl SplitCmd {
    #[must_use]
    pub fn new(
        account: impl Into<String>,
        payee: impl Into<String>,
        value: i64,
        date: NaiveDate,
    ) -> Self {
        Self {
            account: account.into(),
            payee: payee.into(),
            value,
            date,
            memo: None,
            lines: Vec::new(),
            id: None,
        }
    }

    #[must_use]
    pub fn line(mut self, line: SplitLineCmd) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn lines(mut self, lines: impl IntoIterator<Item = SplitLineCmd>) -> Self {
        self.lines.extend(lines);
        self
    }

    #[must_use]
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    #[must_use]
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

/// Move `value` from one account to another.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub from_account: String,
    pub to_account: String,
    /// Amount moved, in cents. The "from" leg records its negation.
    pub value: i64,
    pub date: NaiveDate,
    pub memo: Option<String>,
    /// Category of the "from" leg only.
    pub from_category: Option<String>,
    /// Caller-supplied ids for the "from" and "to" legs.
    pub ids: Option<(Uuid, Uuid)>,
}

impl TransferCmd {
    #[must_use]
    pub fn new(
        from_account: impl Into<String>,
        to_account: impl Into<String>,
        value: i64,
        date: NaiveDate,
    ) -> Self {
        Self {
            from_account: from_account.into(),
            to_account: to_account.into(),
            value,
            date,
            memo: None,
            from_category: None,
            ids: None,
        }
    }

    #[must_use]
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    #[must_use]
    pub fn from_category(mut self, category: impl Into<String>) -> Self {
        self.from_category = Some(category.into());
        self
    }

    #[must_use]
    pub fn ids(mut self, from: Uuid, to: Uuid) -> Self {
        self.ids = Some((from, to));
        self
    }
}
