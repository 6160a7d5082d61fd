pub mod error;

use tracing::instrument;

pub use aurum_types::ledger_line::*;

use error::LedgerLineError;

use crate::primitives::{FixingId, TransactionId};
use crate::store::LedgerStore;

/// Read and write access to the posted ledger lines.
///
/// Lines are derived records. They are only ever written alongside the
/// document that produced them, so the mutating operations are crate
/// internal and run inside the caller's store operation.
#[derive(Clone)]
pub struct LedgerLines<S> {
    store: S,
}

impl<S: LedgerStore> LedgerLines<S> {
    pub(crate) fn new(store: &S) -> Self {
        Self {
            store: store.clone(),
        }
    }

    pub(crate) async fn create_all_in_op(
        &self,
        op: &mut S::Op,
        lines: &[LedgerLineValues],
    ) -> Result<(), LedgerLineError> {
        self.store.create_lines_in_op(op, lines).await?;
        Ok(())
    }

    pub(crate) async fn delete_for_transaction_in_op(
        &self,
        op: &mut S::Op,
        transaction_id: TransactionId,
    ) -> Result<(), LedgerLineError> {
        self.store
            .delete_lines_for_transaction_in_op(op, transaction_id)
            .await?;
        Ok(())
    }

    #[instrument(name = "aurum_ledger.ledger_lines.list_for_transaction", skip(self), err)]
    pub async fn list_for_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Vec<LedgerLineValues>, LedgerLineError> {
        let lines = self.store.list_lines_for_transaction(transaction_id).await?;
        Ok(lines)
    }

    #[instrument(name = "aurum_ledger.ledger_lines.list_for_fixing", skip(self), err)]
    pub async fn list_for_fixing(
        &self,
        fixing_id: FixingId,
    ) -> Result<Vec<LedgerLineValues>, LedgerLineError> {
        let lines = self.store.list_lines_for_fixing(fixing_id).await?;
        Ok(lines)
    }
}
