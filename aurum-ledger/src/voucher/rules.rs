//! The netting fold behind voucher reconstruction. Each ledger-line tag
//! maps to a posture deciding whether the line accumulates into the
//! counterparty net or is emitted as its own row.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use aurum_types::ledger_line::{LedgerLineType, LedgerLineValues};
use aurum_types::voucher::{Voucher, VoucherRow, VoucherTotals};

use crate::primitives::{Currency, PartyId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Posture {
    /// Accumulate the cash columns into the counterparty net.
    PartyCash,
    /// Accumulate the gold columns into the counterparty net.
    PartyMetal,
    /// Emit one row carrying both dimensions as posted.
    Combined,
    /// Emit one row per non-zero side, on the gold columns.
    MetalOnly,
    /// Emit one row per non-zero side, on the cash columns.
    CashOnly,
}

/// Rule table for the transaction views (normal and hedge).
pub(crate) fn transaction_posture(line_type: LedgerLineType) -> Posture {
    use LedgerLineType::*;
    match line_type {
        PartyCashBalance => Posture::PartyCash,
        PartyGoldBalance => Posture::PartyMetal,
        HedgePurchaseFixing | HedgeSalesFixing => Posture::Combined,
        // Plain fixing summaries are fixing-scoped and do not normally
        // appear under a transaction; shown as posted if they ever do.
        PurchaseFixing | SalesFixing => Posture::Combined,
        Gold | GoldStock | PurityDifference => Posture::MetalOnly,
        MakingCharges | Vat | Premium | Discount | OtherCharges => Posture::CashOnly,
    }
}

/// Rule table for the fixing view. Fixing events post party lines, their
/// summary tag and premium/discount charges only.
pub(crate) fn fixing_posture(line_type: LedgerLineType) -> Posture {
    use LedgerLineType::*;
    match line_type {
        PartyCashBalance => Posture::PartyCash,
        PartyGoldBalance => Posture::PartyMetal,
        PurchaseFixing | SalesFixing | HedgePurchaseFixing | HedgeSalesFixing => Posture::Combined,
        Premium | Discount => Posture::CashOnly,
        MakingCharges | Vat | OtherCharges => Posture::CashOnly,
        Gold | GoldStock | PurityDifference => Posture::MetalOnly,
    }
}

/// Folds raw ledger lines into a compact voucher. Reads only; nothing
/// here mutates the ledger.
pub(crate) fn reconstruct(
    voucher_number: String,
    voucher_date: NaiveDate,
    currency: Currency,
    lines: &[LedgerLineValues],
    posture_for: fn(LedgerLineType) -> Posture,
) -> Voucher {
    let mut rows = Vec::new();
    let mut net = CounterpartyNet::default();

    for line in lines {
        match posture_for(line.line_type) {
            Posture::PartyCash => net.take_cash(line),
            Posture::PartyMetal => net.take_gold(line),
            Posture::Combined => rows.push(VoucherRow {
                label: line.account_code.clone(),
                line_type: Some(line.line_type),
                party_id: line.party_id,
                cash_debit: line.cash_debit,
                cash_credit: line.cash_credit,
                gold_debit: line.gold_debit,
                gold_credit: line.gold_credit,
            }),
            Posture::MetalOnly => {
                single_sided(&mut rows, line, |row, debit, credit| {
                    row.gold_debit = debit;
                    row.gold_credit = credit;
                });
            }
            Posture::CashOnly => {
                single_sided(&mut rows, line, |row, debit, credit| {
                    row.cash_debit = debit;
                    row.cash_credit = credit;
                });
            }
        }
    }

    if let Some(row) = net.into_summary_row() {
        rows.push(row);
    }

    let mut totals = VoucherTotals::default();
    for row in &rows {
        totals.accumulate(row);
    }
    let currency_balance = report(totals.cash_debit - totals.cash_credit, 2);
    let gold_balance = report(totals.gold_debit - totals.gold_credit, 3);

    Voucher {
        voucher_number,
        voucher_date,
        currency,
        rows,
        totals,
        currency_balance,
        gold_balance,
    }
}

/// Emits one row per non-zero side of the line's legacy `value`/`credit`
/// pair, placed on the columns `place` selects.
fn single_sided(
    rows: &mut Vec<VoucherRow>,
    line: &LedgerLineValues,
    place: fn(&mut VoucherRow, Decimal, Decimal),
) {
    let blank = || VoucherRow {
        label: line.account_code.clone(),
        line_type: Some(line.line_type),
        party_id: line.party_id,
        cash_debit: Decimal::ZERO,
        cash_credit: Decimal::ZERO,
        gold_debit: Decimal::ZERO,
        gold_credit: Decimal::ZERO,
    };
    if line.value != Decimal::ZERO {
        let mut row = blank();
        place(&mut row, line.value, Decimal::ZERO);
        rows.push(row);
    }
    if line.credit != Decimal::ZERO {
        let mut row = blank();
        place(&mut row, Decimal::ZERO, line.credit);
        rows.push(row);
    }
}

/// Running counterparty accumulation across the party-posture lines.
#[derive(Default)]
struct CounterpartyNet {
    seen: bool,
    label: String,
    party_id: Option<PartyId>,
    cash_debit: Decimal,
    cash_credit: Decimal,
    gold_debit: Decimal,
    gold_credit: Decimal,
}

impl CounterpartyNet {
    fn note(&mut self, line: &LedgerLineValues) {
        if !self.seen {
            self.seen = true;
            self.label = line.account_code.clone();
            self.party_id = line.party_id;
        }
    }

    fn take_cash(&mut self, line: &LedgerLineValues) {
        self.note(line);
        self.cash_debit += line.cash_debit;
        self.cash_credit += line.cash_credit;
    }

    fn take_gold(&mut self, line: &LedgerLineValues) {
        self.note(line);
        self.gold_debit += line.gold_debit;
        self.gold_credit += line.gold_credit;
    }

    /// Presentation netting. Only the side each net falls on is shown;
    /// no new ledger fact is created here.
    fn into_summary_row(self) -> Option<VoucherRow> {
        if !self.seen {
            return None;
        }
        let mut row = VoucherRow {
            label: self.label,
            line_type: None,
            party_id: self.party_id,
            cash_debit: Decimal::ZERO,
            cash_credit: Decimal::ZERO,
            gold_debit: Decimal::ZERO,
            gold_credit: Decimal::ZERO,
        };
        let cash = self.cash_debit - self.cash_credit;
        if cash > Decimal::ZERO {
            row.cash_debit = cash;
        } else if cash < Decimal::ZERO {
            row.cash_credit = -cash;
        }
        let gold = self.gold_debit - self.gold_credit;
        if gold > Decimal::ZERO {
            row.gold_debit = gold;
        } else if gold < Decimal::ZERO {
            row.gold_credit = -gold;
        }
        Some(row)
    }
}

/// Sub-0.5 residue collapses to exactly zero to match the historical
/// reports, then the survivor rounds to the reporting precision.
fn report(balance: Decimal, dp: u32) -> Decimal {
    if balance.abs() < Decimal::new(5, 1) {
        return Decimal::ZERO;
    }
    balance.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use aurum_types::ledger_line::LineReference;
    use aurum_types::primitives::{LedgerLineId, TransactionId};

    use super::*;

    fn line(line_type: LedgerLineType) -> LedgerLineValues {
        LedgerLineValues {
            id: LedgerLineId::new(),
            account_code: line_type.to_string(),
            party_id: None,
            line_type,
            reference: LineReference::Transaction {
                transaction_id: TransactionId::new(),
            },
            group: "ab12cd34".to_string(),
            currency: "AED".parse().unwrap(),
            value: Decimal::ZERO,
            credit: Decimal::ZERO,
            cash_debit: Decimal::ZERO,
            cash_credit: Decimal::ZERO,
            gold_debit: Decimal::ZERO,
            gold_credit: Decimal::ZERO,
            voucher_number: "PV-1001".to_string(),
            voucher_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            description: None,
            created_by: "desk".to_string(),
            created_at: Utc::now(),
        }
    }

    fn party_line(line_type: LedgerLineType) -> LedgerLineValues {
        let mut l = line(line_type);
        l.account_code = "P-0042".to_string();
        l.party_id = Some(PartyId::new());
        l
    }

    fn rebuild(lines: &[LedgerLineValues]) -> Voucher {
        reconstruct(
            "PV-1001".to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            "AED".parse().unwrap(),
            lines,
            transaction_posture,
        )
    }

    #[test]
    fn party_lines_collapse_into_one_counterparty_row() {
        let mut cash = party_line(LedgerLineType::PartyCashBalance);
        cash.cash_debit = dec!(50);
        let mut gold = party_line(LedgerLineType::PartyGoldBalance);
        gold.party_id = cash.party_id;
        gold.gold_credit = dec!(99.5);

        let voucher = rebuild(&[cash.clone(), gold]);
        assert_eq!(voucher.rows.len(), 1);
        let summary = &voucher.rows[0];
        assert_eq!(summary.line_type, None);
        assert_eq!(summary.party_id, cash.party_id);
        assert_eq!(summary.cash_debit, dec!(50));
        assert_eq!(summary.gold_credit, dec!(99.5));
        assert_eq!(summary.cash_credit, Decimal::ZERO);
        assert_eq!(summary.gold_debit, Decimal::ZERO);
    }

    #[test]
    fn counterparty_row_shows_only_the_net_side() {
        let mut debit = party_line(LedgerLineType::PartyCashBalance);
        debit.cash_debit = dec!(200);
        let mut credit = party_line(LedgerLineType::PartyCashBalance);
        credit.party_id = debit.party_id;
        credit.cash_credit = dec!(50);

        let voucher = rebuild(&[debit, credit]);
        let summary = &voucher.rows[0];
        assert_eq!(summary.cash_debit, dec!(150));
        assert_eq!(summary.cash_credit, Decimal::ZERO);
    }

    #[test]
    fn account_lines_become_single_sided_rows() {
        let mut making = line(LedgerLineType::MakingCharges);
        making.value = dec!(50);
        let mut gold = line(LedgerLineType::Gold);
        gold.value = dec!(99.9);
        let mut stock = line(LedgerLineType::GoldStock);
        stock.value = dec!(100);

        let voucher = rebuild(&[making, gold, stock]);
        assert_eq!(voucher.rows.len(), 3);
        assert_eq!(voucher.rows[0].cash_debit, dec!(50));
        assert_eq!(voucher.rows[0].gold_debit, Decimal::ZERO);
        assert_eq!(voucher.rows[1].gold_debit, dec!(99.9));
        assert_eq!(voucher.rows[2].gold_debit, dec!(100));
        assert_eq!(voucher.totals.gold_debit, dec!(199.9));
    }

    #[test]
    fn a_line_posted_on_both_legacy_sides_emits_two_rows() {
        let mut diff = line(LedgerLineType::PurityDifference);
        diff.value = dec!(0.7);
        diff.credit = dec!(0.2);

        let voucher = rebuild(&[diff]);
        assert_eq!(voucher.rows.len(), 2);
        assert_eq!(voucher.rows[0].gold_debit, dec!(0.7));
        assert_eq!(voucher.rows[1].gold_credit, dec!(0.2));
    }

    #[test]
    fn hedge_summaries_keep_both_dimensions_on_one_row() {
        let mut summary = party_line(LedgerLineType::HedgePurchaseFixing);
        summary.cash_debit = dec!(6517.50);
        summary.gold_credit = dec!(99.5);

        let voucher = rebuild(&[summary]);
        assert_eq!(voucher.rows.len(), 1);
        let row = &voucher.rows[0];
        assert_eq!(row.line_type, Some(LedgerLineType::HedgePurchaseFixing));
        assert_eq!(row.cash_debit, dec!(6517.50));
        assert_eq!(row.gold_credit, dec!(99.5));
    }

    #[test]
    fn tiny_balances_report_as_zero() {
        let mut diff = line(LedgerLineType::PurityDifference);
        diff.value = dec!(0.3);

        let voucher = rebuild(&[diff]);
        assert_eq!(voucher.gold_balance, Decimal::ZERO);
        // The raw row keeps its value; only the headline balance is
        // filtered.
        assert_eq!(voucher.rows[0].gold_debit, dec!(0.3));
    }

    #[test]
    fn surviving_balances_round_to_reporting_precision() {
        let mut making = line(LedgerLineType::MakingCharges);
        making.value = dec!(50.12345);
        let mut gold = line(LedgerLineType::Gold);
        gold.value = dec!(99.87654);

        let voucher = rebuild(&[making, gold]);
        assert_eq!(voucher.currency_balance, dec!(50.12));
        assert_eq!(voucher.gold_balance, dec!(99.877));
    }

    #[test]
    fn empty_line_sets_produce_an_empty_voucher() {
        let voucher = rebuild(&[]);
        assert!(voucher.rows.is_empty());
        assert_eq!(voucher.currency_balance, Decimal::ZERO);
        assert_eq!(voucher.gold_balance, Decimal::ZERO);
    }
}
