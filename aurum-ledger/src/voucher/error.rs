use thiserror::Error;

use crate::primitives::{FixingId, TransactionId};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum VoucherError {
    #[error("VoucherError - Store: {0}")]
    Store(#[from] StoreError),
    #[error("VoucherError - TransactionNotFound: {0}")]
    TransactionNotFound(TransactionId),
    #[error("VoucherError - FixingNotFound: {0}")]
    FixingNotFound(FixingId),
}
