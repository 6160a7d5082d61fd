#![allow(dead_code)]
use chrono::{NaiveDate, Utc};
use rand::distr::{Alphanumeric, SampleString};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use aurum_ledger::{
    party::*,
    store::{MemStore, PgStore},
    transaction::*,
    *,
};

pub fn mem_ledger() -> (AurumLedger<MemStore>, MemStore) {
    let store = MemStore::new();
    let ledger = AurumLedger::with_store(store.clone(), PostingAccounts::default());
    (ledger, store)
}

pub async fn init_pool() -> anyhow::Result<sqlx::PgPool> {
    let pg_host = std::env::var("PG_HOST").unwrap_or("localhost".to_string());
    let pg_con = format!("postgres://user:password@{pg_host}:5432/pg");
    let pool = sqlx::PgPool::connect(&pg_con).await?;
    Ok(pool)
}

pub async fn pg_ledger() -> anyhow::Result<(AurumLedger<PgStore>, PgStore)> {
    let pool = init_pool().await?;
    let config = AurumLedgerConfig::builder()
        .pool(pool.clone())
        .exec_migrations(true)
        .build()?;
    let ledger = AurumLedger::init(config).await?;
    Ok((ledger, PgStore::new(pool)))
}

pub async fn test_party(store: &MemStore) -> PartyValues {
    test_party_with_status(store, PartyStatus::Active).await
}

pub async fn test_party_with_status(store: &MemStore, status: PartyStatus) -> PartyValues {
    let code = Alphanumeric.sample_string(&mut rand::rng(), 8);
    let party = PartyValues {
        id: PartyId::new(),
        account_code: format!("P-{code}"),
        name: format!("Test Party {code}"),
        status,
        created_at: Utc::now(),
        modified_at: Utc::now(),
    };
    store.create_party(&party).await;
    party
}

pub async fn pg_party(store: &PgStore) -> anyhow::Result<PartyValues> {
    let code = Alphanumeric.sample_string(&mut rand::rng(), 8);
    let party = PartyValues {
        id: PartyId::new(),
        account_code: format!("P-{code}"),
        name: format!("Test Party {code}"),
        status: PartyStatus::Active,
        created_at: Utc::now(),
        modified_at: Utc::now(),
    };
    store.create_party(&party).await?;
    Ok(party)
}

pub fn voucher_number() -> String {
    format!("PV-{}", Alphanumeric.sample_string(&mut rand::rng(), 8))
}

pub fn voucher_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

/// 100g gross at 0.995 purity against a 0.999 standard, 50 making
/// charges, rate 65/g.
pub fn standard_line_item() -> LineItemValues {
    LineItemValues {
        stock_item_id: StockItemId::new(),
        gross_weight: dec!(100),
        purity: dec!(0.995),
        pure_weight: dec!(99.5),
        standard_pure_weight: dec!(99.9),
        purity_diff_weight: dec!(0.4),
        making_charges: dec!(50),
        premium_discount: Decimal::ZERO,
        vat_amount: Decimal::ZERO,
        other_charges: Decimal::ZERO,
        gold_rate: dec!(65),
        gold_value: dec!(6467.50),
    }
}

pub fn new_transaction(kind: TransactionKind, party_id: PartyId) -> NewTransactionBuilder {
    let mut builder = NewTransaction::builder();
    builder
        .kind(kind)
        .party_id(party_id)
        .currency("AED".parse::<Currency>().unwrap())
        .gold_rate(dec!(65))
        .line_items(vec![standard_line_item()])
        .voucher_number(voucher_number())
        .voucher_date(voucher_date())
        .created_by("test-admin");
    builder
}

pub fn unfixed_purchase(party_id: PartyId) -> NewTransaction {
    new_transaction(TransactionKind::Purchase, party_id)
        .build()
        .unwrap()
}
