use thiserror::Error;

use crate::primitives::PartyId;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum PartyError {
    #[error("PartyError - Store: {0}")]
    Store(#[from] StoreError),
    #[error("PartyError - CouldNotFindById: {0}")]
    CouldNotFindById(PartyId),
    #[error("PartyError - Inactive: party {0} cannot take postings")]
    Inactive(PartyId),
}
