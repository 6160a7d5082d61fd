#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

mod id;

pub mod fixing;
pub mod ledger_line;
pub mod line_item;
pub mod party;
pub mod primitives;
pub mod totals;
pub mod transaction;
pub mod voucher;
