mod helpers;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use aurum_ledger::error::LedgerError;
use aurum_ledger::ledger_line::LedgerLineType;
use aurum_ledger::party::error::PartyError;
use aurum_ledger::transaction::error::TransactionError;
use aurum_ledger::*;

#[tokio::test]
async fn unfixed_purchase_moves_weight_and_charges() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let tx = ledger
        .create_transaction(helpers::unfixed_purchase(party.id))
        .await?;

    let lines = ledger.ledger_lines().list_for_transaction(tx.id).await?;
    assert_eq!(lines.len(), 6);
    let gold = lines
        .iter()
        .find(|l| l.line_type == LedgerLineType::PartyGoldBalance)
        .unwrap();
    assert_eq!(gold.gold_credit, dec!(99.5));
    let cash = lines
        .iter()
        .find(|l| l.line_type == LedgerLineType::PartyCashBalance)
        .unwrap();
    assert_eq!(cash.cash_debit, dec!(50));
    let stock = lines
        .iter()
        .find(|l| l.line_type == LedgerLineType::GoldStock)
        .unwrap();
    assert_eq!(stock.value, dec!(100));
    assert!(lines.iter().all(|l| l.voucher_number == tx.voucher_number));
    assert!(lines.iter().all(|l| l.created_by == "test-admin"));

    let balances = ledger.parties().balances(party.id).await?;
    assert_eq!(balances.gold_grams, dec!(99.5));
    assert_eq!(balances.cash_balance(&tx.currency), dec!(-50));
    Ok(())
}

#[tokio::test]
async fn fixed_sale_settles_cash_only() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let new_transaction = helpers::new_transaction(TransactionKind::Sale, party.id)
        .fixed()
        .build()?;
    let tx = ledger.create_transaction(new_transaction).await?;

    let lines = ledger.ledger_lines().list_for_transaction(tx.id).await?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].line_type, LedgerLineType::PartyCashBalance);
    assert_eq!(lines[0].cash_credit, dec!(6517.50));

    let balances = ledger.parties().balances(party.id).await?;
    assert_eq!(balances.gold_grams, Decimal::ZERO);
    assert_eq!(balances.cash_balance(&tx.currency), dec!(6517.50));
    Ok(())
}

#[tokio::test]
async fn hedged_purchase_posts_the_hedge_summary() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let new_transaction = helpers::new_transaction(TransactionKind::Purchase, party.id)
        .hedged()
        .build()?;
    let tx = ledger.create_transaction(new_transaction).await?;

    let lines = ledger.ledger_lines().list_for_transaction(tx.id).await?;
    let summary = lines
        .iter()
        .find(|l| l.line_type == LedgerLineType::HedgePurchaseFixing)
        .unwrap();
    assert_eq!(summary.cash_debit, dec!(6517.50));
    assert_eq!(summary.gold_credit, dec!(99.5));
    assert!(summary.reference.is_hedge());

    let balances = ledger.parties().balances(party.id).await?;
    assert_eq!(balances.gold_grams, dec!(99.5));
    assert_eq!(balances.cash_balance(&tx.currency), dec!(-6517.50));
    Ok(())
}

#[tokio::test]
async fn returns_reverse_their_forward_kind() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    ledger
        .create_transaction(helpers::unfixed_purchase(party.id))
        .await?;
    let back = helpers::new_transaction(TransactionKind::PurchaseReturn, party.id).build()?;
    let tx = ledger.create_transaction(back).await?;

    let balances = ledger.parties().balances(party.id).await?;
    assert_eq!(balances.gold_grams, Decimal::ZERO);
    assert_eq!(balances.cash_balance(&tx.currency), Decimal::ZERO);
    Ok(())
}

#[tokio::test]
async fn duplicate_voucher_numbers_are_rejected() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let posted = ledger
        .create_transaction(helpers::unfixed_purchase(party.id))
        .await?;

    let second = helpers::new_transaction(TransactionKind::Purchase, party.id)
        .voucher_number(posted.voucher_number.clone())
        .build()?;
    let result = ledger.create_transaction(second).await;
    assert!(matches!(
        result,
        Err(LedgerError::TransactionError(
            TransactionError::DuplicateVoucherNumber(_)
        ))
    ));

    // The failed posting must leave nothing behind.
    let balances = ledger.parties().balances(party.id).await?;
    assert_eq!(balances.gold_grams, dec!(99.5));
    Ok(())
}

#[tokio::test]
async fn reused_transaction_ids_are_rejected() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let tx_id = TransactionId::new();
    let mut first = helpers::new_transaction(TransactionKind::Purchase, party.id);
    first.id(tx_id);
    let posted = ledger.create_transaction(first.build()?).await?;

    // A fresh voucher number must not rescue a recycled id.
    let mut second = helpers::new_transaction(TransactionKind::Purchase, party.id);
    second.id(tx_id);
    let result = ledger.create_transaction(second.build()?).await;
    assert!(matches!(
        result,
        Err(LedgerError::TransactionError(
            TransactionError::DuplicateTransactionId(_)
        ))
    ));

    // The original posting survives untouched: same document, same
    // lines, balances moved once.
    let stored = ledger.transactions().find_by_id(tx_id).await?;
    assert_eq!(stored.voucher_number, posted.voucher_number);
    let lines = ledger.ledger_lines().list_for_transaction(tx_id).await?;
    assert_eq!(lines.len(), 6);
    let balances = ledger.parties().balances(party.id).await?;
    assert_eq!(balances.gold_grams, dec!(99.5));
    Ok(())
}

#[tokio::test]
async fn empty_line_items_are_rejected() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party(&store).await;

    let mut builder = helpers::new_transaction(TransactionKind::Purchase, party.id);
    builder.line_items(vec![]);
    let result = ledger.create_transaction(builder.build()?).await;
    assert!(matches!(
        result,
        Err(LedgerError::TransactionError(
            TransactionError::EmptyLineItems
        ))
    ));
    Ok(())
}

#[tokio::test]
async fn inactive_parties_cannot_take_postings() -> anyhow::Result<()> {
    let (ledger, store) = helpers::mem_ledger();
    let party = helpers::test_party_with_status(&store, PartyStatus::Locked).await;

    let result = ledger
        .create_transaction(helpers::unfixed_purchase(party.id))
        .await;
    assert!(matches!(
        result,
        Err(LedgerError::PartyError(PartyError::Inactive(_)))
    ));
    Ok(())
}

#[tokio::test]
async fn unknown_transactions_are_not_found() -> anyhow::Result<()> {
    let (ledger, _store) = helpers::mem_ledger();
    let result = ledger.transactions().find_by_id(TransactionId::new()).await;
    assert!(matches!(
        result,
        Err(TransactionError::CouldNotFindById(_))
    ));
    Ok(())
}
