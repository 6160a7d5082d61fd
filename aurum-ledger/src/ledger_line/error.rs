use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum LedgerLineError {
    #[error("LedgerLineError - Store: {0}")]
    Store(#[from] StoreError),
}
