use aurum_types::ledger_line::{LedgerLineType, LedgerLineValues};

use crate::primitives::DebitOrCredit::{Credit, Debit};

use super::{charges_and_stock, LineSink, PostingContext};

/// Price locked at trade time; the whole consideration is a single cash
/// debit against the party.
pub(super) fn fix(ctx: &PostingContext) -> Vec<LedgerLineValues> {
    let mut sink = LineSink::for_transaction(ctx);
    sink.party_cash(Debit, ctx.totals.total_price());
    sink.into_lines()
}

/// Floating price: the party is credited the metal weight and debited
/// only the charges, with the stock and charge heads posted alongside.
pub(super) fn unfix(ctx: &PostingContext) -> Vec<LedgerLineValues> {
    let mut sink = LineSink::for_transaction(ctx);
    sink.party_gold(Credit, ctx.totals.pure_weight);
    sink.party_cash(Debit, ctx.totals.charges_total());
    charges_and_stock(&mut sink, ctx.totals, Debit);
    sink.into_lines()
}

/// Hedged: cash and metal both post directly against the party, with an
/// always-emit summary carrying the pair for the hedge book.
pub(super) fn hedge(ctx: &PostingContext) -> Vec<LedgerLineValues> {
    let mut sink = LineSink::for_transaction(ctx);
    sink.party_cash(Debit, ctx.totals.total_price());
    sink.party_gold(Credit, ctx.totals.pure_weight);
    sink.summary(
        LedgerLineType::HedgePurchaseFixing,
        (Debit, ctx.totals.total_price()),
        (Credit, ctx.totals.pure_weight),
    );
    charges_and_stock(&mut sink, ctx.totals, Debit);
    sink.into_lines()
}
