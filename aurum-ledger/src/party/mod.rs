pub mod error;

use tracing::instrument;

pub use aurum_types::party::*;

use error::PartyError;

use crate::balance::BalanceDelta;
use crate::primitives::{Currency, PartyId};
use crate::store::LedgerStore;

/// Lookup and balance maintenance for trading counterparties.
///
/// Party master data is owned by the host application. The engine only
/// ever reads parties and moves their running balances, so there is no
/// create or update operation here.
#[derive(Clone)]
pub struct Parties<S> {
    store: S,
}

impl<S: LedgerStore> Parties<S> {
    pub(crate) fn new(store: &S) -> Self {
        Self {
            store: store.clone(),
        }
    }

    /// Loads the counterparty of a posting and rejects inactive ones.
    pub(crate) async fn find_active_in_op(
        &self,
        op: &mut S::Op,
        party_id: PartyId,
    ) -> Result<PartyValues, PartyError> {
        let party = self
            .store
            .find_party_in_op(op, party_id)
            .await?
            .ok_or(PartyError::CouldNotFindById(party_id))?;
        if !party.is_active() {
            return Err(PartyError::Inactive(party_id));
        }
        Ok(party)
    }

    /// Applies one commutative increment per balance dimension.
    /// Zero deltas are skipped entirely so concurrent postings that do
    /// not move a dimension never contend on it.
    pub(crate) async fn apply_delta_in_op(
        &self,
        op: &mut S::Op,
        party_id: PartyId,
        currency: &Currency,
        delta: BalanceDelta,
    ) -> Result<(), PartyError> {
        if delta.is_zero() {
            return Ok(());
        }
        self.store
            .increment_party_balances_in_op(op, party_id, currency, delta.gold, delta.cash)
            .await?;
        Ok(())
    }

    #[instrument(name = "aurum_ledger.parties.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, party_id: PartyId) -> Result<PartyValues, PartyError> {
        self.store
            .find_party(party_id)
            .await?
            .ok_or(PartyError::CouldNotFindById(party_id))
    }

    #[instrument(name = "aurum_ledger.parties.balances", skip(self), err)]
    pub async fn balances(&self, party_id: PartyId) -> Result<PartyBalances, PartyError> {
        self.store
            .find_party_balances(party_id)
            .await?
            .ok_or(PartyError::CouldNotFindById(party_id))
    }
}
