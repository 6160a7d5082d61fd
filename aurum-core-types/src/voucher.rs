use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ledger_line::LedgerLineType;
use super::primitives::*;

/// One printable row of a reconstructed voucher. Account-head rows carry
/// their ledger tag; the synthetic counterparty row carries the party id
/// and no tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoucherRow {
    pub label: String,
    pub line_type: Option<LedgerLineType>,
    pub party_id: Option<PartyId>,
    pub cash_debit: Decimal,
    pub cash_credit: Decimal,
    pub gold_debit: Decimal,
    pub gold_credit: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoucherTotals {
    pub cash_debit: Decimal,
    pub cash_credit: Decimal,
    pub gold_debit: Decimal,
    pub gold_credit: Decimal,
}

impl VoucherTotals {
    pub fn accumulate(&mut self, row: &VoucherRow) {
        self.cash_debit += row.cash_debit;
        self.cash_credit += row.cash_credit;
        self.gold_debit += row.gold_debit;
        self.gold_credit += row.gold_credit;
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Voucher {
    pub voucher_number: String,
    pub voucher_date: NaiveDate,
    pub currency: Currency,
    pub rows: Vec<VoucherRow>,
    pub totals: VoucherTotals,
    /// Net cash position of the voucher, debits less credits, rounded to
    /// two decimal places with sub-half-unit residue collapsed to zero.
    pub currency_balance: Decimal,
    /// Net metal position in grams, rounded to three decimal places under
    /// the same sub-half-gram collapse.
    pub gold_balance: Decimal,
}
