pub mod error;

mod entity;

use tracing::instrument;

pub use entity::*;
use error::TransactionError;

use crate::primitives::TransactionId;
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct Transactions<S> {
    store: S,
}

impl<S: LedgerStore> Transactions<S> {
    pub(crate) fn new(store: &S) -> Self {
        Self {
            store: store.clone(),
        }
    }

    pub(crate) async fn create_in_op(
        &self,
        op: &mut S::Op,
        values: &TransactionValues,
    ) -> Result<(), TransactionError> {
        self.store
            .create_transaction_in_op(op, values)
            .await
            .map_err(TransactionError::from_store)
    }

    pub(crate) async fn update_in_op(
        &self,
        op: &mut S::Op,
        values: &TransactionValues,
    ) -> Result<(), TransactionError> {
        self.store
            .update_transaction_in_op(op, values)
            .await
            .map_err(TransactionError::from_store)
    }

    pub(crate) async fn find_in_op(
        &self,
        op: &mut S::Op,
        transaction_id: TransactionId,
    ) -> Result<TransactionValues, TransactionError> {
        self.store
            .find_transaction_in_op(op, transaction_id)
            .await?
            .ok_or(TransactionError::CouldNotFindById(transaction_id))
    }

    #[instrument(name = "aurum_ledger.transactions.find_by_id", skip(self), err)]
    pub async fn find_by_id(
        &self,
        transaction_id: TransactionId,
    ) -> Result<TransactionValues, TransactionError> {
        self.store
            .find_transaction(transaction_id)
            .await?
            .ok_or(TransactionError::CouldNotFindById(transaction_id))
    }
}
