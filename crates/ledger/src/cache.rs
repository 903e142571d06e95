//! Session-local name resolution cache.
//!
//! Entries are inserted once and never overwritten or expired. The only way
//! to drop them is [`EntityCache::clear`].

use std::collections::HashMap;

use crate::{EntityKind, Payee};

#[derive(Debug, Default)]
pub(crate) struct EntityCache {
    accounts: HashMap<String, String>,
    categories: HashMap<String, String>,
    payees: HashMap<String, Payee>,
}

impl EntityCache {
    pub(crate) fn account(&self, name: &str) -> Option<&str> {
        self.accounts.get(name).map(String::as_str)
    }

    pub(crate) fn category(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(String::as_str)
    }

    pub(crate) fn payee(&self, name: &str) -> Option<&Payee> {
        self.payees.get(name)
    }

    pub(crate) fn insert_account(&mut self, name: &str, id: &str) -> &str {
        self.accounts
            .entry(name.to_string())
            .or_insert_with(|| id.to_string())
    }

    pub(crate) fn insert_category(&mut self, name: &str, id: &str) -> &str {
        self.categories
            .entry(name.to_string())
            .or_insert_with(|| id.to_string())
    }

    pub(crate) fn insert_payee(&mut self, payee: Payee) -> &Payee {
        self.payees.entry(payee.name.clone()).or_insert(payee)
    }

    pub(crate) fn contains(&self, kind: EntityKind, name: &str) -> bool {
        match kind {
            EntityKind::Account => self.accounts.contains_key(name),
            EntityKind::Category => self.categories.contains_key(name),
            EntityKind::Payee => self.payees.contains_key(name),
            EntityKind::Transaction => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.accounts.clear();
        self.categories.clear();
        self.payees.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let mut cache = EntityCache::default();
        assert_eq!(cache.insert_account("Checking", "a1"), "a1");
        assert_eq!(cache.insert_account("Checking", "a2"), "a1");
        assert_eq!(cache.account("Checking"), Some("a1"));
    }

    #[test]
    fn clear_drops_every_kind() {
        let mut cache = EntityCache::default();
        cache.insert_account("Checking", "a1");
        cache.insert_category("Rent", "c1");
        cache.insert_payee(Payee {
            id: "p1".to_string(),
            name: "Landlord".to_string(),
            category_suggest: None,
        });
        assert!(cache.contains(EntityKind::Payee, "Landlord"));

        cache.clear();
        assert!(!cache.contains(EntityKind::Account, "Checking"));
        assert!(!cache.contains(EntityKind::Category, "Rent"));
        assert!(cache.payee("Landlord").is_none());
    }
}
