use crate::{
    BUDGET_PREFIX, BudgetSelector, DocumentStore, EntityKind, Ledger, LedgerError, NamedDoc,
    Pacer, Query, ResultLedger, Selector, bare_id, documents::from_document,
};

const NAMED_FIELDS: &[&str] = &["_id", "name"];

impl<S: DocumentStore, P: Pacer> Ledger<S, P> {
    /// Make the budget called `name` the active one.
    ///
    /// Switching to a different budget clears the name cache, since cached
    /// ids belong to the previous budget.
    pub async fn connect_budget(&mut self, name: &str) -> ResultLedger<&BudgetSelector> {
        let query =
            Query::new(Selector::id_prefix(BUDGET_PREFIX).name(name)).fields(NAMED_FIELDS);
        let budget: NamedDoc = match self.find(&query).await?.into_iter().next() {
            Some(doc) => from_document(doc)?,
            None => return Err(LedgerError::BudgetNotFound(name.to_string())),
        };

        let selector = BudgetSelector::from_budget_id(&budget.id);
        if self.selector.as_ref() != Some(&selector) {
            self.cache.clear();
        }
        tracing::info!("connecting on budget {selector}");
        Ok(&*self.selector.insert(selector))
    }

    /// Every budget in the database (id and name).
    pub async fn budgets(&self) -> ResultLedger<Vec<NamedDoc>> {
        let query = Query::new(Selector::id_prefix(BUDGET_PREFIX)).fields(NAMED_FIELDS);
        self.find(&query)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Every account of the active budget, with bare ids.
    pub async fn accounts(&self) -> ResultLedger<Vec<NamedDoc>> {
        let prefix = self.active_selector()?.child_prefix(EntityKind::Account);
        let query = Query::new(Selector::id_prefix(prefix)).fields(NAMED_FIELDS);
        self.find(&query)
            .await?
            .into_iter()
            .map(|doc| {
                let account: NamedDoc = from_document(doc)?;
                Ok(NamedDoc {
                    id: bare_id(&account.id).to_string(),
                    name: account.name,
                })
            })
            .collect()
    }
}
