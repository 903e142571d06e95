use uuid::Uuid;

use crate::{
    Category, DocumentStore, EntityKind, Ledger, Pacer, Recorded, ResultLedger, SplitCmd,
    SplitLine, TransactionDoc,
};

impl<S: DocumentStore, P: Pacer> Ledger<S, P> {
    /// Record a transaction spread across several category/payee lines.
    ///
    /// Lines are resolved in input order and stored in that order. Their
    /// values are not checked against the parent value.
    pub async fn record_split(&mut self, cmd: SplitCmd) -> ResultLedger<Recorded> {
        let SplitCmd {
            account,
            payee,
            value,
            date,
            memo,
            lines,
            id,
        } = cmd;
        let selector = self.active_selector()?.clone();
        let tx_uuid = id.unwrap_or_else(Uuid::new_v4);

        let account = self.resolve_account(&account).await?;
        let payee = self.resolve_payee(&payee).await?;

        let mut splits = Vec::with_capacity(lines.len());
        for line in lines {
            let category = self.resolve_category(&line.category).await?;
            let line_payee = self.resolve_payee(&line.payee).await?;
            splits.push(SplitLine {
                value: line.value,
                category,
                payee: line_payee.id,
                memo: line.memo,
            });
        }

        let doc = TransactionDoc {
            id: selector.child_id(EntityKind::Transaction, tx_uuid),
            rev: None,
            value,
            account,
            payee: Some(payee.id),
            category: Some(Category::Split),
            date,
            memo,
            splits: Some(splits),
            transfer: None,
        };
        self.persist_new(doc).await
    }
}
