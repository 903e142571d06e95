//! Name → id resolution for accounts, categories and payees.
//!
//! Lookup order is: session cache, then a store query for a document under
//! the budget's prefix for that kind whose `name` matches exactly. Only
//! payees are created when both miss.

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    Category, DocumentStore, EntityKind, Ledger, LedgerError, NamedDoc, Pacer, Payee, PayeeDoc,
    Query, ResultLedger, Selector, bare_id,
    documents::{CreatedDoc, from_document, to_document},
};

impl<S: DocumentStore, P: Pacer> Ledger<S, P> {
    /// Bare id of the account called `name`. Accounts are never created.
    pub async fn resolve_account(&mut self, name: &str) -> ResultLedger<String> {
        let selector = self.active_selector()?;
        if let Some(id) = self.cache.account(name) {
            tracing::debug!("account {name} found in cache");
            return Ok(id.to_string());
        }
        let prefix = selector.child_prefix(EntityKind::Account);

        let account: NamedDoc = self
            .find_named(&prefix, name, &["_id", "name"])
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                kind: EntityKind::Account,
                name: name.to_string(),
            })?;
        Ok(self
            .cache
            .insert_account(name, bare_id(&account.id))
            .to_string())
    }

    /// Category value for `name`.
    ///
    /// `income` and `incomeNextMonth` are returned as-is without touching the
    /// cache or the store. Other categories are never created.
    pub async fn resolve_category(&mut self, name: &str) -> ResultLedger<Category> {
        if let Some(sentinel) = Category::sentinel(name) {
            return Ok(sentinel);
        }
        let selector = self.active_selector()?;
        if let Some(id) = self.cache.category(name) {
            tracing::debug!("category {name} found in cache");
            return Ok(Category::Id(id.to_string()));
        }
        let prefix = selector.child_prefix(EntityKind::Category);

        let category: NamedDoc = self
            .find_named(&prefix, name, &["_id", "name"])
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                kind: EntityKind::Category,
                name: name.to_string(),
            })?;
        let id = self.cache.insert_category(name, bare_id(&category.id));
        Ok(Category::Id(id.to_string()))
    }

    /// The payee called `name`, created if it does not exist yet.
    pub async fn resolve_payee(&mut self, name: &str) -> ResultLedger<Payee> {
        let selector = self.active_selector()?.clone();
        if let Some(payee) = self.cache.payee(name) {
            tracing::debug!("payee {name} found in cache");
            return Ok(payee.clone());
        }
        let prefix = selector.child_prefix(EntityKind::Payee);

        let payee = match self
            .find_named::<PayeeDoc>(&prefix, name, &["_id", "name", "categorySuggest"])
            .await?
        {
            Some(doc) => Payee {
                id: bare_id(&doc.id).to_string(),
                name: name.to_string(),
                category_suggest: doc.category_suggest,
            },
            None => {
                let doc = PayeeDoc::new(selector.child_id(EntityKind::Payee, Uuid::new_v4()), name);
                let created: CreatedDoc = from_document(self.insert(&to_document(&doc)?).await?)?;
                tracing::info!("created payee {name} ({})", created.id);
                Payee {
                    id: bare_id(&created.id).to_string(),
                    name: name.to_string(),
                    category_suggest: created.category_suggest,
                }
            }
        };
        Ok(self.cache.insert_payee(payee).clone())
    }

    /// First document under `prefix` named exactly `name`.
    ///
    /// When several match, the first in store order wins; which one that is
    /// depends on the store.
    async fn find_named<T: DeserializeOwned>(
        &self,
        prefix: &str,
        name: &str,
        fields: &[&str],
    ) -> ResultLedger<Option<T>> {
        let query = Query::new(Selector::id_prefix(prefix).name(name)).fields(fields);
        let docs = self.find(&query).await?;
        if docs.len() > 1 {
            tracing::warn!(
                "{} documents named {name} under {prefix}, using the first",
                docs.len()
            );
        }
        docs.into_iter().next().map(from_document).transpose()
    }
}
