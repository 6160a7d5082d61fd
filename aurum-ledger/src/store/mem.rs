use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use aurum_types::fixing::FixingValues;
use aurum_types::ledger_line::LedgerLineValues;
use aurum_types::party::{PartyBalances, PartyValues};
use aurum_types::transaction::TransactionValues;

use crate::inventory::{InventoryError, InventoryService};
use crate::primitives::*;

use super::{LedgerStore, StoreError};

/// In-memory backend. Writes are staged on the op and applied under one
/// state lock at commit, so a unit of work is all-or-nothing and balance
/// increments land against the state current at commit time.
#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<Mutex<MemInner>>,
    tx_locks: Arc<Mutex<HashMap<TransactionId, Arc<Mutex<()>>>>>,
}

#[derive(Default)]
struct MemInner {
    transactions: HashMap<TransactionId, TransactionValues>,
    lines: Vec<LedgerLineValues>,
    parties: HashMap<PartyId, PartyValues>,
    balances: HashMap<PartyId, PartyBalances>,
    fixings: HashMap<FixingId, FixingValues>,
    movements: Vec<StockMovement>,
}

pub struct MemOp {
    staged: Vec<StagedWrite>,
    guards: Vec<OwnedMutexGuard<()>>,
}

enum StagedWrite {
    CreateTransaction(TransactionValues),
    UpdateTransaction(TransactionValues),
    InsertLines(Vec<LedgerLineValues>),
    DeleteLinesForTransaction(TransactionId),
    IncrementBalances {
        party_id: PartyId,
        currency: Currency,
        gold_delta: Decimal,
        cash_delta: Decimal,
    },
    CreateFixing(FixingValues),
    RecordMovements(Vec<StockMovement>),
    RemoveMovements(TransactionId),
}

/// One physical stock movement recorded by [`MemInventory`].
#[derive(Clone, Debug)]
pub struct StockMovement {
    pub transaction_id: TransactionId,
    pub stock_item_id: StockItemId,
    pub grams: Decimal,
    pub is_deduction: bool,
    pub actor: String,
    pub recorded_at: DateTime<Utc>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parties are master data owned by the embedding system; the store
    /// only needs them present for lookups and balance increments.
    pub async fn create_party(&self, party: &PartyValues) {
        let mut inner = self.inner.lock().await;
        inner.balances.entry(party.id).or_default();
        inner.parties.insert(party.id, party.clone());
    }

    pub async fn recorded_movements(&self, transaction_id: TransactionId) -> Vec<StockMovement> {
        self.inner
            .lock()
            .await
            .movements
            .iter()
            .filter(|m| m.transaction_id == transaction_id)
            .cloned()
            .collect()
    }

    fn voucher_conflict(
        inner: &MemInner,
        transaction: &TransactionValues,
    ) -> Result<(), StoreError> {
        if transaction.is_voided() {
            return Ok(());
        }
        let taken = inner.transactions.values().any(|existing| {
            existing.id != transaction.id
                && !existing.is_voided()
                && existing.voucher_number == transaction.voucher_number
        });
        if taken {
            Err(StoreError::DuplicateVoucherNumber(
                transaction.voucher_number.clone(),
            ))
        } else {
            Ok(())
        }
    }

    fn apply(inner: &mut MemInner, write: StagedWrite) {
        match write {
            StagedWrite::CreateTransaction(tx) | StagedWrite::UpdateTransaction(tx) => {
                inner.transactions.insert(tx.id, tx);
            }
            StagedWrite::InsertLines(lines) => inner.lines.extend(lines),
            StagedWrite::DeleteLinesForTransaction(id) => inner
                .lines
                .retain(|line| line.reference.transaction_id() != Some(id)),
            StagedWrite::IncrementBalances {
                party_id,
                currency,
                gold_delta,
                cash_delta,
            } => {
                let balances = inner.balances.entry(party_id).or_default();
                if !gold_delta.is_zero() {
                    balances.gold_grams += gold_delta;
                }
                if !cash_delta.is_zero() {
                    *balances.cash.entry(currency).or_default() += cash_delta;
                }
            }
            StagedWrite::CreateFixing(fixing) => {
                inner.fixings.insert(fixing.id, fixing);
            }
            StagedWrite::RecordMovements(movements) => inner.movements.extend(movements),
            StagedWrite::RemoveMovements(id) => {
                inner.movements.retain(|m| m.transaction_id != id)
            }
        }
    }
}

#[async_trait]
impl LedgerStore for MemStore {
    type Op = MemOp;

    async fn begin(&self) -> Result<MemOp, StoreError> {
        Ok(MemOp {
            staged: Vec::new(),
            guards: Vec::new(),
        })
    }

    async fn commit(&self, op: MemOp) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;

        // Validate every intent before applying any, so a late conflict
        // leaves no partial effects behind. Within-op duplicates are
        // caught against the already-validated set.
        let mut posted: Vec<(TransactionId, String)> = Vec::new();
        let mut created: Vec<TransactionId> = Vec::new();
        for write in &op.staged {
            let tx = match write {
                StagedWrite::CreateTransaction(tx) => {
                    // Creates must allocate a fresh id; an update is the
                    // only write allowed to land on an existing one.
                    if inner.transactions.contains_key(&tx.id) || created.contains(&tx.id) {
                        return Err(StoreError::DuplicateTransactionId(tx.id));
                    }
                    created.push(tx.id);
                    tx
                }
                StagedWrite::UpdateTransaction(tx) => tx,
                _ => continue,
            };
            Self::voucher_conflict(&inner, tx)?;
            if !tx.is_voided() {
                let staged_conflict = posted
                    .iter()
                    .any(|(id, number)| *id != tx.id && *number == tx.voucher_number);
                if staged_conflict {
                    return Err(StoreError::DuplicateVoucherNumber(tx.voucher_number.clone()));
                }
                posted.push((tx.id, tx.voucher_number.clone()));
            }
        }

        for write in op.staged {
            Self::apply(&mut inner, write);
        }
        // op.guards drop after the state mutex releases, which keeps the
        // per-transaction lock held until the effects are visible.
        Ok(())
    }

    async fn lock_transaction(
        &self,
        op: &mut MemOp,
        transaction_id: TransactionId,
    ) -> Result<(), StoreError> {
        let lock = {
            let mut locks = self.tx_locks.lock().await;
            locks.entry(transaction_id).or_default().clone()
        };
        let guard = lock.lock_owned().await;
        op.guards.push(guard);
        Ok(())
    }

    async fn create_transaction_in_op(
        &self,
        op: &mut MemOp,
        transaction: &TransactionValues,
    ) -> Result<(), StoreError> {
        // Early conflict checks mirror the database backend, which fails
        // at statement time; commit re-validates under the state lock.
        {
            let inner = self.inner.lock().await;
            if inner.transactions.contains_key(&transaction.id) {
                return Err(StoreError::DuplicateTransactionId(transaction.id));
            }
            Self::voucher_conflict(&inner, transaction)?;
        }
        op.staged
            .push(StagedWrite::CreateTransaction(transaction.clone()));
        Ok(())
    }

    async fn update_transaction_in_op(
        &self,
        op: &mut MemOp,
        transaction: &TransactionValues,
    ) -> Result<(), StoreError> {
        Self::voucher_conflict(&*self.inner.lock().await, transaction)?;
        op.staged
            .push(StagedWrite::UpdateTransaction(transaction.clone()));
        Ok(())
    }

    async fn find_transaction_in_op(
        &self,
        _op: &mut MemOp,
        transaction_id: TransactionId,
    ) -> Result<Option<TransactionValues>, StoreError> {
        self.find_transaction(transaction_id).await
    }

    async fn find_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Option<TransactionValues>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .transactions
            .get(&transaction_id)
            .cloned())
    }

    async fn create_lines_in_op(
        &self,
        op: &mut MemOp,
        lines: &[LedgerLineValues],
    ) -> Result<(), StoreError> {
        op.staged.push(StagedWrite::InsertLines(lines.to_vec()));
        Ok(())
    }

    async fn delete_lines_for_transaction_in_op(
        &self,
        op: &mut MemOp,
        transaction_id: TransactionId,
    ) -> Result<(), StoreError> {
        op.staged
            .push(StagedWrite::DeleteLinesForTransaction(transaction_id));
        Ok(())
    }

    async fn list_lines_for_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Vec<LedgerLineValues>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .lines
            .iter()
            .filter(|line| line.reference.transaction_id() == Some(transaction_id))
            .cloned()
            .collect())
    }

    async fn list_lines_for_fixing(
        &self,
        fixing_id: FixingId,
    ) -> Result<Vec<LedgerLineValues>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .lines
            .iter()
            .filter(|line| line.reference.fixing_id() == Some(fixing_id))
            .cloned()
            .collect())
    }

    async fn find_party(&self, party_id: PartyId) -> Result<Option<PartyValues>, StoreError> {
        Ok(self.inner.lock().await.parties.get(&party_id).cloned())
    }

    async fn find_party_in_op(
        &self,
        _op: &mut MemOp,
        party_id: PartyId,
    ) -> Result<Option<PartyValues>, StoreError> {
        self.find_party(party_id).await
    }

    async fn find_party_balances(
        &self,
        party_id: PartyId,
    ) -> Result<Option<PartyBalances>, StoreError> {
        let inner = self.inner.lock().await;
        if !inner.parties.contains_key(&party_id) {
            return Ok(None);
        }
        Ok(Some(
            inner.balances.get(&party_id).cloned().unwrap_or_default(),
        ))
    }

    async fn increment_party_balances_in_op(
        &self,
        op: &mut MemOp,
        party_id: PartyId,
        currency: &Currency,
        gold_delta: Decimal,
        cash_delta: Decimal,
    ) -> Result<(), StoreError> {
        op.staged.push(StagedWrite::IncrementBalances {
            party_id,
            currency: currency.clone(),
            gold_delta,
            cash_delta,
        });
        Ok(())
    }

    async fn create_fixing_in_op(
        &self,
        op: &mut MemOp,
        fixing: &FixingValues,
    ) -> Result<(), StoreError> {
        op.staged.push(StagedWrite::CreateFixing(fixing.clone()));
        Ok(())
    }

    async fn find_fixing(&self, fixing_id: FixingId) -> Result<Option<FixingValues>, StoreError> {
        Ok(self.inner.lock().await.fixings.get(&fixing_id).cloned())
    }
}

/// Inventory recorder for the in-memory backend: movements stage on the
/// op and share its fate, one row per line item.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemInventory;

#[async_trait]
impl InventoryService<MemOp> for MemInventory {
    async fn update_inventory(
        &self,
        op: &mut MemOp,
        transaction: &TransactionValues,
        is_deduction: bool,
        actor: &str,
    ) -> Result<(), InventoryError> {
        let movements = transaction
            .line_items
            .iter()
            .map(|item| StockMovement {
                transaction_id: transaction.id,
                stock_item_id: item.stock_item_id,
                grams: item.gross_weight,
                is_deduction,
                actor: actor.to_string(),
                recorded_at: transaction.modified_at,
            })
            .collect();
        op.staged.push(StagedWrite::RecordMovements(movements));
        Ok(())
    }

    async fn remove_movements_for_transaction(
        &self,
        op: &mut MemOp,
        transaction_id: TransactionId,
    ) -> Result<(), InventoryError> {
        op.staged.push(StagedWrite::RemoveMovements(transaction_id));
        Ok(())
    }
}
