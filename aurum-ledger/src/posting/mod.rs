//! Ledger-line construction. One pure builder per `(kind, mode)` cell;
//! the return kinds reuse their forward builder through [`reverse`] so a
//! return is always the exact inverse of the posting it undoes.

mod fixing;
mod purchase;
mod sale;

pub(crate) use fixing::{fixing_lines_for, FixingContext};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use aurum_types::ledger_line::{LedgerLineType, LedgerLineValues, LineReference};
use aurum_types::party::PartyValues;
use aurum_types::totals::TransactionTotals;
use aurum_types::transaction::TransactionValues;

use crate::ledger::PostingAccounts;
use crate::primitives::*;

pub(crate) struct PostingContext<'a> {
    pub(crate) transaction: &'a TransactionValues,
    pub(crate) totals: &'a TransactionTotals,
    pub(crate) party: &'a PartyValues,
    pub(crate) accounts: &'a PostingAccounts,
    /// Admin performing the posting. Differs from the transaction's
    /// `created_by` when a later admin re-posts it through an update.
    pub(crate) actor: &'a str,
}

/// Selects the builder for the transaction's `(kind, mode)` cell. The
/// match is exhaustive over both enums, so an unimplemented combination
/// cannot exist at runtime.
pub(crate) fn ledger_lines_for(ctx: &PostingContext) -> Vec<LedgerLineValues> {
    use SettlementMode::*;
    use TransactionKind::*;
    match (ctx.transaction.kind, ctx.transaction.settlement_mode()) {
        (Purchase, Fix) => purchase::fix(ctx),
        (Purchase, Unfix) => purchase::unfix(ctx),
        (Purchase, Hedge) => purchase::hedge(ctx),
        (Sale, Fix) => sale::fix(ctx),
        (Sale, Unfix) => sale::unfix(ctx),
        (Sale, Hedge) => sale::hedge(ctx),
        (PurchaseReturn, Fix) => reverse(purchase::fix(ctx)),
        (PurchaseReturn, Unfix) => reverse(purchase::unfix(ctx)),
        (PurchaseReturn, Hedge) => reverse(purchase::hedge(ctx)),
        (SaleReturn, Fix) => reverse(sale::fix(ctx)),
        (SaleReturn, Unfix) => reverse(sale::unfix(ctx)),
        (SaleReturn, Hedge) => reverse(sale::hedge(ctx)),
    }
}

/// Swaps every debit/credit pair of every line.
pub(crate) fn reverse(lines: Vec<LedgerLineValues>) -> Vec<LedgerLineValues> {
    lines.into_iter().map(LedgerLineValues::reversed).collect()
}

/// Accumulates lines for one posting, stamping each with the shared
/// group id, voucher metadata and reference scope. Candidate amounts
/// must be strictly positive to be emitted, except `summary` lines
/// which always post.
pub(super) struct LineSink<'a> {
    accounts: &'a PostingAccounts,
    party: &'a PartyValues,
    currency: Currency,
    group: String,
    voucher_number: String,
    voucher_date: NaiveDate,
    description: Option<String>,
    created_by: String,
    created_at: DateTime<Utc>,
    charge_reference: LineReference,
    party_reference: LineReference,
    lines: Vec<LedgerLineValues>,
}

impl<'a> LineSink<'a> {
    pub(super) fn for_transaction(ctx: &'a PostingContext<'a>) -> Self {
        let tx = ctx.transaction;
        let charge_reference = LineReference::Transaction {
            transaction_id: tx.id,
        };
        // Party-facing lines of a hedged trade settle against the hedge
        // book, not the voucher; charge and stock lines stay with the
        // voucher either way.
        let party_reference = if tx.settlement_mode() == SettlementMode::Hedge {
            LineReference::Hedge {
                transaction_id: tx.id,
                hedge_ref: hedge_ref_for(tx),
            }
        } else {
            charge_reference.clone()
        };
        Self {
            accounts: ctx.accounts,
            party: ctx.party,
            currency: tx.currency.clone(),
            group: tx.line_group(),
            voucher_number: tx.voucher_number.clone(),
            voucher_date: tx.voucher_date,
            description: tx.description.clone(),
            created_by: ctx.actor.to_string(),
            created_at: tx.modified_at,
            charge_reference,
            party_reference,
            lines: Vec::new(),
        }
    }

    pub(super) fn for_fixing(ctx: &'a FixingContext<'a>) -> Self {
        let fx = ctx.fixing;
        let reference = LineReference::Fixing { fixing_id: fx.id };
        Self {
            accounts: ctx.accounts,
            party: ctx.party,
            currency: fx.currency.clone(),
            group: group_prefix(fx.id.into()),
            voucher_number: fx.reference_number.clone(),
            voucher_date: fx.fixing_date,
            description: fx.description.clone(),
            created_by: fx.created_by.clone(),
            created_at: fx.created_at,
            charge_reference: reference.clone(),
            party_reference: reference,
            lines: Vec::new(),
        }
    }

    fn blank(
        &self,
        line_type: LedgerLineType,
        account_code: String,
        party_id: Option<PartyId>,
        reference: LineReference,
    ) -> LedgerLineValues {
        LedgerLineValues {
            id: LedgerLineId::new(),
            account_code,
            party_id,
            line_type,
            reference,
            group: self.group.clone(),
            currency: self.currency.clone(),
            value: Decimal::ZERO,
            credit: Decimal::ZERO,
            cash_debit: Decimal::ZERO,
            cash_credit: Decimal::ZERO,
            gold_debit: Decimal::ZERO,
            gold_credit: Decimal::ZERO,
            voucher_number: self.voucher_number.clone(),
            voucher_date: self.voucher_date,
            description: self.description.clone(),
            created_by: self.created_by.clone(),
            created_at: self.created_at,
        }
    }

    pub(super) fn party_cash(&mut self, side: DebitOrCredit, amount: Decimal) {
        if amount <= Decimal::ZERO {
            return;
        }
        let mut line = self.blank(
            LedgerLineType::PartyCashBalance,
            self.party.account_code.clone(),
            Some(self.party.id),
            self.party_reference.clone(),
        );
        match side {
            DebitOrCredit::Debit => line.cash_debit = amount,
            DebitOrCredit::Credit => line.cash_credit = amount,
        }
        self.lines.push(line);
    }

    pub(super) fn party_gold(&mut self, side: DebitOrCredit, amount: Decimal) {
        if amount <= Decimal::ZERO {
            return;
        }
        let mut line = self.blank(
            LedgerLineType::PartyGoldBalance,
            self.party.account_code.clone(),
            Some(self.party.id),
            self.party_reference.clone(),
        );
        match side {
            DebitOrCredit::Debit => line.gold_debit = amount,
            DebitOrCredit::Credit => line.gold_credit = amount,
        }
        self.lines.push(line);
    }

    /// Single-dimension line against a configured chart account, using
    /// the legacy `value`/`credit` pair.
    pub(super) fn account_line(
        &mut self,
        line_type: LedgerLineType,
        side: DebitOrCredit,
        amount: Decimal,
    ) {
        if amount <= Decimal::ZERO {
            return;
        }
        let Some(code) = self.accounts.code_for(line_type) else {
            return;
        };
        let mut line = self.blank(line_type, code.to_string(), None, self.charge_reference.clone());
        match side {
            DebitOrCredit::Debit => line.value = amount,
            DebitOrCredit::Credit => line.credit = amount,
        }
        self.lines.push(line);
    }

    /// Always-emit party summary carrying both dimensions, posted even
    /// when every amount is zero.
    pub(super) fn summary(
        &mut self,
        line_type: LedgerLineType,
        cash: (DebitOrCredit, Decimal),
        gold: (DebitOrCredit, Decimal),
    ) {
        let mut line = self.blank(
            line_type,
            self.party.account_code.clone(),
            Some(self.party.id),
            self.party_reference.clone(),
        );
        if cash.1 > Decimal::ZERO {
            match cash.0 {
                DebitOrCredit::Debit => line.cash_debit = cash.1,
                DebitOrCredit::Credit => line.cash_credit = cash.1,
            }
        }
        if gold.1 > Decimal::ZERO {
            match gold.0 {
                DebitOrCredit::Debit => line.gold_debit = gold.1,
                DebitOrCredit::Credit => line.gold_credit = gold.1,
            }
        }
        self.lines.push(line);
    }

    pub(super) fn into_lines(self) -> Vec<LedgerLineValues> {
        self.lines
    }
}

/// Charge and inventory block shared by the unfix and hedge builders.
/// `side` is the charge side of the trade (debit when buying); discount
/// posts opposite since it offsets the other charges.
pub(super) fn charges_and_stock(
    sink: &mut LineSink,
    totals: &TransactionTotals,
    side: DebitOrCredit,
) {
    sink.account_line(LedgerLineType::MakingCharges, side, totals.making_charges);
    sink.account_line(LedgerLineType::Vat, side, totals.vat_amount);
    sink.account_line(LedgerLineType::Premium, side, totals.premium);
    sink.account_line(LedgerLineType::Discount, side.opposite(), totals.discount);
    sink.account_line(LedgerLineType::OtherCharges, side, totals.other_charges);
    sink.account_line(LedgerLineType::Gold, side, totals.standard_pure_weight);
    let diff = totals.purity_diff_weight;
    if diff < Decimal::ZERO {
        sink.account_line(LedgerLineType::PurityDifference, side.opposite(), -diff);
    } else {
        sink.account_line(LedgerLineType::PurityDifference, side, diff);
    }
    sink.account_line(LedgerLineType::GoldStock, side, totals.gross_weight);
}

pub(crate) fn hedge_ref_for(tx: &TransactionValues) -> String {
    tx.hedge_reference
        .clone()
        .unwrap_or_else(|| format!("HDG-{}", tx.voucher_number))
}

fn group_prefix(id: uuid::Uuid) -> String {
    let simple = id.simple().to_string();
    simple[..8].to_string()
}
