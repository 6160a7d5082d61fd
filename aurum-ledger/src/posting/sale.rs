use aurum_types::ledger_line::{LedgerLineType, LedgerLineValues};

use crate::primitives::DebitOrCredit::{Credit, Debit};

use super::{charges_and_stock, LineSink, PostingContext};

pub(super) fn fix(ctx: &PostingContext) -> Vec<LedgerLineValues> {
    let mut sink = LineSink::for_transaction(ctx);
    sink.party_cash(Credit, ctx.totals.total_price());
    sink.into_lines()
}

pub(super) fn unfix(ctx: &PostingContext) -> Vec<LedgerLineValues> {
    let mut sink = LineSink::for_transaction(ctx);
    sink.party_gold(Debit, ctx.totals.pure_weight);
    sink.party_cash(Credit, ctx.totals.charges_total());
    charges_and_stock(&mut sink, ctx.totals, Credit);
    sink.into_lines()
}

pub(super) fn hedge(ctx: &PostingContext) -> Vec<LedgerLineValues> {
    let mut sink = LineSink::for_transaction(ctx);
    sink.party_cash(Credit, ctx.totals.total_price());
    sink.party_gold(Debit, ctx.totals.pure_weight);
    sink.summary(
        LedgerLineType::HedgeSalesFixing,
        (Credit, ctx.totals.total_price()),
        (Debit, ctx.totals.pure_weight),
    );
    charges_and_stock(&mut sink, ctx.totals, Credit);
    sink.into_lines()
}
