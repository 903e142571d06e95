use serde_json::Value;
use uuid::Uuid;

use crate::{
    Category, DocumentStore, EntityKind, Ledger, Pacer, Recorded, ResultLedger, TransactionCmd,
    TransactionDoc, documents::to_document,
};

/// What the existence probe found at a transaction id.
enum Probe {
    /// Nothing there. A leftover revision, if the store reported one, must be
    /// sent with the write.
    Absent { rev: Option<String> },
    Present,
}

impl Probe {
    fn from_document(doc: Option<Value>) -> Self {
        let Some(doc) = doc else {
            return Self::Absent { rev: None };
        };
        if doc.get("_id").is_some() {
            return Self::Present;
        }
        Self::Absent {
            rev: doc.get("_rev").and_then(Value::as_str).map(ToString::to_string),
        }
    }
}

impl<S: DocumentStore, P: Pacer> Ledger<S, P> {
    /// Record a transaction against one category.
    ///
    /// Without an explicit category the payee's suggested one is used.
    pub async fn record_transaction(&mut self, cmd: TransactionCmd) -> ResultLedger<Recorded> {
        let TransactionCmd {
            account,
            payee,
            category,
            value,
            date,
            memo,
            id,
        } = cmd;
        let selector = self.active_selector()?.clone();
        let tx_uuid = id.unwrap_or_else(Uuid::new_v4);

        let account = self.resolve_account(&account).await?;
        let payee = self.resolve_payee(&payee).await?;
        let category = match (category, &payee.category_suggest) {
            (Some(name), _) => Some(self.resolve_category(&name).await?),
            (None, Some(suggest)) => {
                tracing::info!("using category suggest from payee {}", payee.name);
                Some(Category::from(suggest.clone()))
            }
            (None, None) => None,
        };

        let doc = TransactionDoc {
            id: selector.child_id(EntityKind::Transaction, tx_uuid),
            rev: None,
            value,
            account,
            payee: Some(payee.id),
            category,
            date,
            memo,
            splits: None,
            transfer: None,
        };
        self.persist_new(doc).await
    }

    /// Write `doc` unless a document already exists at its id.
    pub(super) async fn persist_new(&self, mut doc: TransactionDoc) -> ResultLedger<Recorded> {
        match Probe::from_document(self.fetch(&doc.id).await?) {
            Probe::Present => {
                tracing::info!("transaction {} has already been imported", doc.id);
                Ok(Recorded::AlreadyRecorded { id: doc.id })
            }
            Probe::Absent { rev } => {
                doc.rev = rev;
                tracing::info!("importing transaction {}", doc.id);
                let ack = self.save(&to_document(&doc)?).await?;
                Ok(Recorded::Written(ack))
            }
        }
    }
}
