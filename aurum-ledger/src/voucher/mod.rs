pub mod error;

mod rules;

use tracing::instrument;

pub use aurum_types::voucher::*;

use error::VoucherError;

use crate::posting;
use crate::primitives::{FixingId, TransactionId};
use crate::store::LedgerStore;

/// Read-only reconstruction of postings into printable vouchers. Safe to
/// call any number of times; a voucher read never takes a lock and may
/// see a snapshot that races an in-flight update.
#[derive(Clone)]
pub struct Vouchers<S> {
    store: S,
}

impl<S: LedgerStore> Vouchers<S> {
    pub(crate) fn new(store: &S) -> Self {
        Self {
            store: store.clone(),
        }
    }

    /// The normal trade voucher. Hedge-scoped lines belong to the hedge
    /// book and are left out here.
    #[instrument(name = "aurum_ledger.vouchers.for_transaction", skip(self), err)]
    pub async fn for_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Voucher, VoucherError> {
        let tx = self
            .store
            .find_transaction(transaction_id)
            .await?
            .ok_or(VoucherError::TransactionNotFound(transaction_id))?;
        let lines = self.store.list_lines_for_transaction(transaction_id).await?;
        let scoped: Vec<_> = lines
            .into_iter()
            .filter(|line| !line.reference.is_hedge())
            .collect();
        Ok(rules::reconstruct(
            tx.voucher_number,
            tx.voucher_date,
            tx.currency,
            &scoped,
            rules::transaction_posture,
        ))
    }

    /// The hedge-book side of a hedged trade, headed by its hedge
    /// reference instead of the voucher number.
    #[instrument(name = "aurum_ledger.vouchers.for_hedge", skip(self), err)]
    pub async fn for_hedge(&self, transaction_id: TransactionId) -> Result<Voucher, VoucherError> {
        let tx = self
            .store
            .find_transaction(transaction_id)
            .await?
            .ok_or(VoucherError::TransactionNotFound(transaction_id))?;
        let lines = self.store.list_lines_for_transaction(transaction_id).await?;
        let scoped: Vec<_> = lines
            .into_iter()
            .filter(|line| line.reference.is_hedge())
            .collect();
        let hedge_ref = posting::hedge_ref_for(&tx);
        Ok(rules::reconstruct(
            hedge_ref,
            tx.voucher_date,
            tx.currency,
            &scoped,
            rules::transaction_posture,
        ))
    }

    #[instrument(name = "aurum_ledger.vouchers.for_fixing", skip(self), err)]
    pub async fn for_fixing(&self, fixing_id: FixingId) -> Result<Voucher, VoucherError> {
        let fixing = self
            .store
            .find_fixing(fixing_id)
            .await?
            .ok_or(VoucherError::FixingNotFound(fixing_id))?;
        let lines = self.store.list_lines_for_fixing(fixing_id).await?;
        Ok(rules::reconstruct(
            fixing.reference_number,
            fixing.fixing_date,
            fixing.currency,
            &lines,
            rules::fixing_posture,
        ))
    }
}
