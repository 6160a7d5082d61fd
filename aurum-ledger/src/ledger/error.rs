use thiserror::Error;

use crate::{
    fixing::error::FixingError, inventory::InventoryError, ledger_line::error::LedgerLineError,
    party::error::PartyError, store::StoreError, transaction::error::TransactionError,
    voucher::error::VoucherError,
};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("LedgerError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("LedgerError - Migrate: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
    #[error("LedgerError - Config: {0}")]
    ConfigError(String),
    #[error("LedgerError - Store: {0}")]
    Store(#[from] StoreError),
    #[error("LedgerError - TransactionError: {0}")]
    TransactionError(#[from] TransactionError),
    #[error("LedgerError - PartyError: {0}")]
    PartyError(#[from] PartyError),
    #[error("LedgerError - LedgerLineError: {0}")]
    LedgerLineError(#[from] LedgerLineError),
    #[error("LedgerError - FixingError: {0}")]
    FixingError(#[from] FixingError),
    #[error("LedgerError - VoucherError: {0}")]
    VoucherError(#[from] VoucherError),
    #[error("LedgerError - InventoryError: {0}")]
    InventoryError(#[from] InventoryError),
}
