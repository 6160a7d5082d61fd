pub mod error;

mod entity;

use tracing::instrument;

pub use entity::*;

use error::FixingError;

use crate::primitives::FixingId;
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct Fixings<S> {
    store: S,
}

impl<S: LedgerStore> Fixings<S> {
    pub(crate) fn new(store: &S) -> Self {
        Self {
            store: store.clone(),
        }
    }

    pub(crate) async fn create_in_op(
        &self,
        op: &mut S::Op,
        fixing: &FixingValues,
    ) -> Result<(), FixingError> {
        self.store.create_fixing_in_op(op, fixing).await?;
        Ok(())
    }

    #[instrument(name = "aurum_ledger.fixings.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, fixing_id: FixingId) -> Result<FixingValues, FixingError> {
        self.store
            .find_fixing(fixing_id)
            .await?
            .ok_or(FixingError::CouldNotFindById(fixing_id))
    }
}
