mod helpers;

use rand::distr::{Alphanumeric, SampleString};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use aurum_ledger::fixing::error::FixingError;
use aurum_ledger::fixing::{FixingKind, NewFixing};
use aurum_ledger::ledger_line::LedgerLineType;
use aurum_ledger::*;

fn purchase_fixing(party_id: PartyId) -> NewFixing {
    let reference = Alphanumeric.sample_string(&mut rand::rng(), 8);
    NewFixing::builder()
        .kind(FixingKind::Purchase)
        .party_id(party_id)
        .currency("AED".parse::<Currency>().unwrap())
        .weight_grams(dec!(99.5))
        .rate(dec!(66))
        .premium(dec!(10))
        .reference_number(format!("FIX-{reference}"))
        .fixing_date(helpers::voucher_date())
        .created_by("test-admin")
        .build()
        .unwrap()
}

#[tokio::test]
async fn purchase_fixing_settles_unfixed_metal() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let tx = ledger
        .create_transaction(helpers::unfixed_purchase(party.id))
        .await?;
    let fixing = ledger.record_fixing(purchase_fixing(party.id)).await?;
    assert_eq!(fixing.amount(), dec!(6577));

    let balances = ledger.parties().balances(party.id).await?;
    assert_eq!(balances.gold_grams, Decimal::ZERO);
    assert_eq!(balances.cash_balance(&tx.currency), dec!(6527));

    let lines = ledger.ledger_lines().list_for_fixing(fixing.id).await?;
    assert_eq!(lines.len(), 4);
    let gold = lines
        .iter()
        .find(|l| l.line_type == LedgerLineType::PartyGoldBalance)
        .unwrap();
    assert_eq!(gold.gold_debit, dec!(99.5));
    let summary = lines
        .iter()
        .find(|l| l.line_type == LedgerLineType::PurchaseFixing)
        .unwrap();
    assert_eq!(summary.cash_credit, dec!(6577));
    assert_eq!(summary.gold_debit, dec!(99.5));
    let premium = lines
        .iter()
        .find(|l| l.line_type == LedgerLineType::Premium)
        .unwrap();
    assert_eq!(premium.value, dec!(10));
    Ok(())
}

#[tokio::test]
async fn sale_fixing_is_the_mirror() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let new_fixing = NewFixing::builder()
        .kind(FixingKind::Sale)
        .party_id(party.id)
        .currency("AED".parse::<Currency>().unwrap())
        .weight_grams(dec!(50))
        .rate(dec!(64))
        .reference_number("FIX-5001")
        .fixing_date(helpers::voucher_date())
        .created_by("test-admin")
        .build()?;
    let fixing = ledger.record_fixing(new_fixing).await?;

    let balances = ledger.parties().balances(party.id).await?;
    assert_eq!(balances.gold_grams, dec!(50));
    assert_eq!(balances.cash_balance(&fixing.currency), dec!(-3200));
    Ok(())
}

#[tokio::test]
async fn hedged_fixings_carry_their_own_summary_tag() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let new_fixing = NewFixing::builder()
        .kind(FixingKind::Sale)
        .hedged(true)
        .party_id(party.id)
        .currency("AED".parse::<Currency>().unwrap())
        .weight_grams(dec!(10))
        .rate(dec!(65))
        .reference_number("FIX-7001")
        .fixing_date(helpers::voucher_date())
        .created_by("test-admin")
        .build()?;
    let fixing = ledger.record_fixing(new_fixing).await?;

    let lines = ledger.ledger_lines().list_for_fixing(fixing.id).await?;
    assert!(lines
        .iter()
        .any(|l| l.line_type == LedgerLineType::HedgeSalesFixing));
    Ok(())
}

#[tokio::test]
async fn fixings_are_readable_by_id() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let fixing = ledger.record_fixing(purchase_fixing(party.id)).await?;
    let found = ledger.fixings().find_by_id(fixing.id).await?;
    assert_eq!(found.reference_number, fixing.reference_number);
    assert_eq!(found.weight_grams, dec!(99.5));

    let missing = ledger.fixings().find_by_id(FixingId::new()).await;
    assert!(matches!(
        missing,
        Err(FixingError::CouldNotFindById(_))
    ));
    Ok(())
}
