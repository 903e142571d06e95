//! Session operations, grouped by concern.
//!
//! Every store request goes through the paced helpers below so the pacer
//! runs before each call and requests are logged in one place.

use serde_json::Value;

use crate::{DocumentStore, Ledger, Pacer, Query, ResultLedger, WriteAck};

mod budgets;
mod resolve;
mod splits;
mod transactions;
mod transfers;

impl<S: DocumentStore, P: Pacer> Ledger<S, P> {
    async fn find(&self, query: &Query) -> ResultLedger<Vec<Value>> {
        self.pacer.pace().await;
        tracing::debug!(
            "executing query: prefix={} name={:?}",
            query.selector.prefix(),
            query.selector.name_eq()
        );
        let docs = self.store.query(&self.user_db, query).await?;
        tracing::debug!("query returned {} documents", docs.len());
        Ok(docs)
    }

    async fn fetch(&self, id: &str) -> ResultLedger<Option<Value>> {
        self.pacer.pace().await;
        tracing::debug!("getting {id}");
        Ok(self.store.get_document(&self.user_db, id).await?)
    }

    async fn insert(&self, doc: &Value) -> ResultLedger<Value> {
        self.pacer.pace().await;
        tracing::debug!("inserting into {}", self.user_db);
        Ok(self.store.create_document(&self.user_db, doc).await?)
    }

    async fn save(&self, doc: &Value) -> ResultLedger<WriteAck> {
        self.pacer.pace().await;
        tracing::debug!("putting {:?}", doc.get("_id"));
        Ok(self.store.save_document(&self.user_db, doc).await?)
    }
}
