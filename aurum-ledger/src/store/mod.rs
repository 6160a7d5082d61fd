//! Storage contract for the posting engine. Every write happens inside
//! an `Op` unit of work: all effects of one create/update/void become
//! visible together at commit, or not at all. Dropping an op without
//! committing aborts it.

mod mem;
mod pg;

pub use mem::{MemInventory, MemOp, MemStore, StockMovement};
pub use pg::{PgOp, PgStore};

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use aurum_types::fixing::FixingValues;
use aurum_types::ledger_line::LedgerLineValues;
use aurum_types::party::{PartyBalances, PartyValues};
use aurum_types::transaction::TransactionValues;

use crate::primitives::*;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("StoreError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("StoreError - Serde: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("StoreError - DuplicateVoucherNumber: voucher number '{0}' already posted")]
    DuplicateVoucherNumber(String),
    #[error("StoreError - DuplicateTransactionId: transaction id '{0}' already exists")]
    DuplicateTransactionId(TransactionId),
}

/// Transactional backend the engine posts through. Reads outside an op
/// observe committed state only; reads inside an op additionally observe
/// the op's own prior writes where the backend supports it (both flows
/// the engine uses read before staging writes, so the distinction never
/// matters in practice).
#[async_trait]
pub trait LedgerStore: Clone + Send + Sync + 'static {
    type Op: Send;

    async fn begin(&self) -> Result<Self::Op, StoreError>;
    async fn commit(&self, op: Self::Op) -> Result<(), StoreError>;

    /// Serializes writers of the same transaction id: the lock is held
    /// until the op commits or aborts, so concurrent updates of one
    /// transaction apply last-writer-wins rather than interleaving.
    /// Writers of different transactions are not serialized against each
    /// other.
    async fn lock_transaction(
        &self,
        op: &mut Self::Op,
        transaction_id: TransactionId,
    ) -> Result<(), StoreError>;

    async fn create_transaction_in_op(
        &self,
        op: &mut Self::Op,
        transaction: &TransactionValues,
    ) -> Result<(), StoreError>;
    async fn update_transaction_in_op(
        &self,
        op: &mut Self::Op,
        transaction: &TransactionValues,
    ) -> Result<(), StoreError>;
    async fn find_transaction_in_op(
        &self,
        op: &mut Self::Op,
        transaction_id: TransactionId,
    ) -> Result<Option<TransactionValues>, StoreError>;
    async fn find_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Option<TransactionValues>, StoreError>;

    async fn create_lines_in_op(
        &self,
        op: &mut Self::Op,
        lines: &[LedgerLineValues],
    ) -> Result<(), StoreError>;
    /// Removes the transaction-scoped and hedge-scoped lines of the
    /// transaction. Fixing-scoped lines are never touched.
    async fn delete_lines_for_transaction_in_op(
        &self,
        op: &mut Self::Op,
        transaction_id: TransactionId,
    ) -> Result<(), StoreError>;
    async fn list_lines_for_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Vec<LedgerLineValues>, StoreError>;
    async fn list_lines_for_fixing(
        &self,
        fixing_id: FixingId,
    ) -> Result<Vec<LedgerLineValues>, StoreError>;

    async fn find_party(&self, party_id: PartyId) -> Result<Option<PartyValues>, StoreError>;
    async fn find_party_in_op(
        &self,
        op: &mut Self::Op,
        party_id: PartyId,
    ) -> Result<Option<PartyValues>, StoreError>;
    async fn find_party_balances(
        &self,
        party_id: PartyId,
    ) -> Result<Option<PartyBalances>, StoreError>;
    /// Commutative increment of the party's running position. Never a
    /// read-modify-write: concurrent ops against the same party must
    /// compose.
    async fn increment_party_balances_in_op(
        &self,
        op: &mut Self::Op,
        party_id: PartyId,
        currency: &Currency,
        gold_delta: Decimal,
        cash_delta: Decimal,
    ) -> Result<(), StoreError>;

    async fn create_fixing_in_op(
        &self,
        op: &mut Self::Op,
        fixing: &FixingValues,
    ) -> Result<(), StoreError>;
    async fn find_fixing(&self, fixing_id: FixingId) -> Result<Option<FixingValues>, StoreError>;
}
