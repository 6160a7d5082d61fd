use thiserror::Error;

use crate::primitives::TransactionId;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("TransactionError - Store: {0}")]
    Store(#[from] StoreError),
    #[error("TransactionError - NotFound: id '{0}' not found")]
    CouldNotFindById(TransactionId),
    #[error("TransactionError - DuplicateVoucherNumber: voucher number '{0}' already posted")]
    DuplicateVoucherNumber(String),
    #[error("TransactionError - DuplicateTransactionId: transaction id '{0}' already exists")]
    DuplicateTransactionId(TransactionId),
    #[error("TransactionError - Voided: transaction '{0}' is voided")]
    Voided(TransactionId),
    #[error("TransactionError - EmptyLineItems: a transaction needs at least one line item")]
    EmptyLineItems,
}

impl TransactionError {
    pub(crate) fn from_store(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateVoucherNumber(number) => Self::DuplicateVoucherNumber(number),
            StoreError::DuplicateTransactionId(id) => Self::DuplicateTransactionId(id),
            e => Self::Store(e),
        }
    }
}
