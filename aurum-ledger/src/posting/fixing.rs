use aurum_types::fixing::{FixingKind, FixingValues};
use aurum_types::ledger_line::{LedgerLineType, LedgerLineValues};
use aurum_types::party::PartyValues;

use crate::ledger::PostingAccounts;
use crate::primitives::DebitOrCredit::{Credit, Debit};

use super::LineSink;

pub(crate) struct FixingContext<'a> {
    pub(crate) fixing: &'a FixingValues,
    pub(crate) party: &'a PartyValues,
    pub(crate) accounts: &'a PostingAccounts,
}

/// A purchase fixing settles previously unfixed bought metal: the party
/// gives up the weight (gold debit) and is credited the struck amount.
/// A sale fixing is the exact mirror. The summary line posts even at
/// zero so the event always leaves a ledger trace.
pub(crate) fn fixing_lines_for(ctx: &FixingContext) -> Vec<LedgerLineValues> {
    let fx = ctx.fixing;
    let (gold_side, cash_side, charge_side) = match fx.kind {
        FixingKind::Purchase => (Debit, Credit, Debit),
        FixingKind::Sale => (Credit, Debit, Credit),
    };

    let mut sink = LineSink::for_fixing(ctx);
    sink.party_gold(gold_side, fx.weight_grams);
    sink.party_cash(cash_side, fx.amount());
    sink.summary(
        fx.summary_line_type(),
        (cash_side, fx.amount()),
        (gold_side, fx.weight_grams),
    );
    sink.account_line(LedgerLineType::Premium, charge_side, fx.premium);
    sink.account_line(LedgerLineType::Discount, charge_side.opposite(), fx.discount);
    sink.into_lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::primitives::*;

    fn party() -> PartyValues {
        PartyValues {
            id: PartyId::new(),
            account_code: "P-0042".to_string(),
            name: "Al Madina Jewellery".to_string(),
            status: PartyStatus::Active,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    fn fixing(kind: FixingKind) -> FixingValues {
        FixingValues {
            id: FixingId::new(),
            kind,
            hedged: false,
            party_id: PartyId::new(),
            currency: "AED".parse().unwrap(),
            weight_grams: dec!(100),
            rate: dec!(65.20),
            premium: dec!(25),
            discount: Decimal::ZERO,
            reference_number: "FX-2001".to_string(),
            fixing_date: NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
            description: None,
            created_by: "desk".to_string(),
            created_at: Utc::now(),
        }
    }

    fn lines(kind: FixingKind) -> Vec<LedgerLineValues> {
        let fx = fixing(kind);
        let party = party();
        let accounts = PostingAccounts::default();
        fixing_lines_for(&FixingContext {
            fixing: &fx,
            party: &party,
            accounts: &accounts,
        })
    }

    #[test]
    fn purchase_fixing_debits_gold_and_credits_cash() {
        let lines = lines(FixingKind::Purchase);
        assert_eq!(lines.len(), 4);

        let gold = &lines[0];
        assert_eq!(gold.line_type, LedgerLineType::PartyGoldBalance);
        assert_eq!(gold.gold_debit, dec!(100));

        let cash = &lines[1];
        assert_eq!(cash.line_type, LedgerLineType::PartyCashBalance);
        assert_eq!(cash.cash_credit, dec!(6545.00));

        let summary = &lines[2];
        assert_eq!(summary.line_type, LedgerLineType::PurchaseFixing);
        assert_eq!(summary.gold_debit, dec!(100));
        assert_eq!(summary.cash_credit, dec!(6545.00));
        assert!(summary.reference.fixing_id().is_some());

        let premium = &lines[3];
        assert_eq!(premium.line_type, LedgerLineType::Premium);
        assert_eq!(premium.value, dec!(25));
    }

    #[test]
    fn sale_fixing_is_the_mirror() {
        let purchase = lines(FixingKind::Purchase);
        let sale = lines(FixingKind::Sale);
        assert_eq!(purchase.len(), sale.len());
        for (p, s) in purchase.iter().zip(&sale) {
            assert_eq!(p.gold_debit, s.gold_credit);
            assert_eq!(p.gold_credit, s.gold_debit);
            assert_eq!(p.cash_debit, s.cash_credit);
            assert_eq!(p.cash_credit, s.cash_debit);
            assert_eq!(p.value, s.credit);
            assert_eq!(p.credit, s.value);
        }
        assert_eq!(sale[2].line_type, LedgerLineType::SalesFixing);
    }

    #[test]
    fn zero_weight_fixing_still_posts_its_summary() {
        let mut fx = fixing(FixingKind::Purchase);
        fx.weight_grams = Decimal::ZERO;
        fx.rate = Decimal::ZERO;
        fx.premium = Decimal::ZERO;
        let party = party();
        let accounts = PostingAccounts::default();
        let lines = fixing_lines_for(&FixingContext {
            fixing: &fx,
            party: &party,
            accounts: &accounts,
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_type, LedgerLineType::PurchaseFixing);
        assert!(lines[0].is_zero());
    }
}
