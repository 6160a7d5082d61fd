#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

//! # aurum-ledger
//!
//! An embeddable posting engine for bullion trading desks. A commercial
//! transaction (purchase or sale of metal, settled fixed, unfixed or
//! hedged) is turned into a consistent set of ledger lines plus signed
//! party balance increments, inside one atomic unit of work that also
//! covers the external inventory movement. Vouchers are reconstructed
//! read-only from the posted lines.

mod balance;
mod ledger;
mod posting;

pub mod fixing;
pub mod inventory;
pub mod ledger_line;
pub mod migrate;
pub mod party;
pub mod store;
pub mod transaction;
pub mod voucher;

pub use ledger::*;

pub mod primitives;
pub use primitives::*;
