use thiserror::Error;

use crate::primitives::FixingId;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum FixingError {
    #[error("FixingError - Store: {0}")]
    Store(#[from] StoreError),
    #[error("FixingError - CouldNotFindById: {0}")]
    CouldNotFindById(FixingId),
}
