//! Physical stock movement is owned by an external service; the engine
//! only guarantees the call happens inside the same unit of work as the
//! ledger writes, so a rejected movement aborts the whole posting.

use async_trait::async_trait;
use thiserror::Error;

use aurum_types::transaction::TransactionValues;

use crate::primitives::TransactionId;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("InventoryError - Rejected: {0}")]
    Rejected(String),
    #[error("InventoryError - Unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait InventoryService<Op>: Send + Sync {
    /// Records the stock movement for a posted transaction. `is_deduction`
    /// follows the transaction kind: purchases and sale returns add stock,
    /// sales and purchase returns deduct it.
    async fn update_inventory(
        &self,
        op: &mut Op,
        transaction: &TransactionValues,
        is_deduction: bool,
        actor: &str,
    ) -> Result<(), InventoryError>;

    /// Drops the movement rows a transaction previously produced, called
    /// while replacing or voiding it.
    async fn remove_movements_for_transaction(
        &self,
        op: &mut Op,
        transaction_id: TransactionId,
    ) -> Result<(), InventoryError>;
}

/// For embedders that book stock elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullInventory;

#[async_trait]
impl<Op: Send> InventoryService<Op> for NullInventory {
    async fn update_inventory(
        &self,
        _op: &mut Op,
        _transaction: &TransactionValues,
        _is_deduction: bool,
        _actor: &str,
    ) -> Result<(), InventoryError> {
        Ok(())
    }

    async fn remove_movements_for_transaction(
        &self,
        _op: &mut Op,
        _transaction_id: TransactionId,
    ) -> Result<(), InventoryError> {
        Ok(())
    }
}
