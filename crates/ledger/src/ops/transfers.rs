use uuid::Uuid;

use crate::{
    DocumentStore, EntityKind, Ledger, LedgerError, Pacer, ResultLedger, TransactionDoc,
    TransferCmd, TransferOutcome,
};

impl<S: DocumentStore, P: Pacer> Ledger<S, P> {
    /// Record a transfer as two mirrored transactions that reference each
    /// other through `transfer`.
    ///
    /// Both legs are attempted once the accounts resolve, "from" first. They
    /// are not atomic: each leg's outcome is reported on its own and nothing
    /// is rolled back.
    pub async fn record_transfer(&mut self, cmd: TransferCmd) -> ResultLedger<TransferOutcome> {
        let TransferCmd {
            from_account,
            to_account,
            value,
            date,
            memo,
            from_category,
            ids,
        } = cmd;
        let selector = self.active_selector()?.clone();
        let outflow = value.checked_neg().ok_or_else(|| {
            LedgerError::InvalidAmount(format!("transfer value {value} cannot be negated"))
        })?;
        let (from_uuid, to_uuid) = ids.unwrap_or_else(|| (Uuid::new_v4(), Uuid::new_v4()));

        let from_account = self.resolve_account(&from_account).await?;
        let to_account = self.resolve_account(&to_account).await?;
        let from_category = match from_category {
            Some(name) => Some(self.resolve_category(&name).await?),
            None => None,
        };

        let from_leg = TransactionDoc {
            id: selector.child_id(EntityKind::Transaction, from_uuid),
            rev: None,
            value: outflow,
            account: from_account,
            payee: None,
            category: from_category,
            date,
            memo: memo.clone(),
            splits: None,
            transfer: Some(to_uuid.to_string()),
        };
        let to_leg = TransactionDoc {
            id: selector.child_id(EntityKind::Transaction, to_uuid),
            rev: None,
            value,
            account: to_account,
            payee: None,
            category: None,
            date,
            memo,
            splits: None,
            transfer: Some(from_uuid.to_string()),
        };

        let from = self.persist_new(from_leg).await;
        if let Err(err) = &from {
            tracing::warn!("transfer from leg {from_uuid} failed: {err}");
        }
        let to = self.persist_new(to_leg).await;
        if let Err(err) = &to {
            tracing::warn!("transfer to leg {to_uuid} failed: {err}");
        }
        Ok(TransferOutcome { from, to })
    }
}
