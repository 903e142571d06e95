//! Document id derivation.
//!
//! Ids follow `<namespace>_<type>_<uuid>`. Budgets live at `budget_<uuid>`;
//! everything belonging to a budget is scoped under the rewritten prefix
//! `b_<uuid>`, e.g. `b_1234_account_5678`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Id prefix shared by every budget document.
pub const BUDGET_PREFIX: &str = "budget_";

const BUDGET_TAG: &str = "budget";
const SCOPED_TAG: &str = "b";

/// Kinds of documents scoped under a budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Account,
    Category,
    Payee,
    Transaction,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Category => "category",
            Self::Payee => "payee",
            Self::Transaction => "transaction",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active budget's namespace (`b_<uuid>`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BudgetSelector(String);

impl BudgetSelector {
    /// Derive the namespace from a budget document id.
    pub fn from_budget_id(budget_id: &str) -> Self {
        Self(budget_id.replacen(BUDGET_TAG, SCOPED_TAG, 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix shared by every document of `kind` in this budget.
    pub fn child_prefix(&self, kind: EntityKind) -> String {
        format!("{}_{}_", self.0, kind.as_str())
    }

    pub fn child_id(&self, kind: EntityKind, uuid: impl fmt::Display) -> String {
        format!("{}{uuid}", self.child_prefix(kind))
    }
}

impl fmt::Display for BudgetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip the namespace from a document id, keeping the trailing uuid.
pub fn bare_id(full_id: &str) -> &str {
    full_id.rsplit_once('_').map_or(full_id, |(_, tail)| tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_rewrites_budget_tag() {
        let selector = BudgetSelector::from_budget_id("budget_7a1c");
        assert_eq!(selector.as_str(), "b_7a1c");
    }

    #[test]
    fn child_ids_are_scoped() {
        let selector = BudgetSelector::from_budget_id("budget_1234");
        assert_eq!(selector.child_prefix(EntityKind::Account), "b_1234_account_");
        assert_eq!(
            selector.child_id(EntityKind::Transaction, "5678"),
            "b_1234_transaction_5678"
        );
    }

    #[test]
    fn bare_id_keeps_last_segment() {
        assert_eq!(bare_id("b_1234_payee_abcd"), "abcd");
        assert_eq!(
            bare_id("b_1234_payee_0f6e9a3c-3d6b-4b8e-9a53-3c2a7c4b1d22"),
            "0f6e9a3c-3d6b-4b8e-9a53-3c2a7c4b1d22"
        );
        assert_eq!(bare_id("plain"), "plain");
    }
}
