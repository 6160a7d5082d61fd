use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::{Postgres, QueryBuilder, Transaction};

use aurum_types::fixing::FixingValues;
use aurum_types::ledger_line::LedgerLineValues;
use aurum_types::party::{PartyBalances, PartyValues};
use aurum_types::transaction::TransactionValues;

use crate::primitives::*;

use super::{LedgerStore, StoreError};

/// Postgres backend. The unit of work is a database transaction; writer
/// serialization per transaction id uses an advisory lock that releases
/// at commit or rollback.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

pub struct PgOp {
    tx: Transaction<'static, Postgres>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parties are master data owned by the embedding system; this is
    /// the hook its provisioning flow uses to register one.
    pub async fn create_party(&self, party: &PartyValues) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO aurum_parties (id, account_code, data, created_at, modified_at)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(party.id)
        .bind(&party.account_code)
        .bind(serde_json::to_value(party)?)
        .bind(party.created_at)
        .bind(party.modified_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn status_as_str(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Posted => "posted",
        TransactionStatus::Voided => "voided",
    }
}

fn voucher_conflict_from(e: sqlx::Error, voucher_number: &str) -> StoreError {
    match e {
        sqlx::Error::Database(ref err)
            if err.is_unique_violation()
                && err
                    .constraint()
                    .is_some_and(|c| c.contains("voucher_number")) =>
        {
            StoreError::DuplicateVoucherNumber(voucher_number.to_string())
        }
        e => StoreError::Sqlx(e),
    }
}

/// An INSERT can trip the primary key as well as the voucher index, so
/// the create path maps both to typed conflicts.
fn insert_conflict_from(e: sqlx::Error, transaction: &TransactionValues) -> StoreError {
    match e {
        sqlx::Error::Database(ref err)
            if err.is_unique_violation()
                && err.constraint().is_some_and(|c| c.ends_with("_pkey")) =>
        {
            StoreError::DuplicateTransactionId(transaction.id)
        }
        e => voucher_conflict_from(e, &transaction.voucher_number),
    }
}

#[async_trait]
impl LedgerStore for PgStore {
    type Op = PgOp;

    async fn begin(&self) -> Result<PgOp, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(PgOp { tx })
    }

    async fn commit(&self, op: PgOp) -> Result<(), StoreError> {
        op.tx.commit().await?;
        Ok(())
    }

    async fn lock_transaction(
        &self,
        op: &mut PgOp,
        transaction_id: TransactionId,
    ) -> Result<(), StoreError> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(transaction_id.to_string())
            .execute(&mut *op.tx)
            .await?;
        Ok(())
    }

    async fn create_transaction_in_op(
        &self,
        op: &mut PgOp,
        transaction: &TransactionValues,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO aurum_transactions
               (id, kind, status, voucher_number, voucher_date, party_id, currency, data, created_by, created_at, modified_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(transaction.id)
        .bind(transaction.kind.as_str())
        .bind(status_as_str(transaction.status))
        .bind(&transaction.voucher_number)
        .bind(transaction.voucher_date)
        .bind(transaction.party_id)
        .bind(&transaction.currency)
        .bind(serde_json::to_value(transaction)?)
        .bind(&transaction.created_by)
        .bind(transaction.created_at)
        .bind(transaction.modified_at)
        .execute(&mut *op.tx)
        .await
        .map_err(|e| insert_conflict_from(e, transaction))?;
        Ok(())
    }

    async fn update_transaction_in_op(
        &self,
        op: &mut PgOp,
        transaction: &TransactionValues,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"UPDATE aurum_transactions
               SET kind = $2, status = $3, voucher_number = $4, voucher_date = $5,
                   party_id = $6, currency = $7, data = $8, modified_at = $9
               WHERE id = $1"#,
        )
        .bind(transaction.id)
        .bind(transaction.kind.as_str())
        .bind(status_as_str(transaction.status))
        .bind(&transaction.voucher_number)
        .bind(transaction.voucher_date)
        .bind(transaction.party_id)
        .bind(&transaction.currency)
        .bind(serde_json::to_value(transaction)?)
        .bind(transaction.modified_at)
        .execute(&mut *op.tx)
        .await
        .map_err(|e| voucher_conflict_from(e, &transaction.voucher_number))?;
        Ok(())
    }

    async fn find_transaction_in_op(
        &self,
        op: &mut PgOp,
        transaction_id: TransactionId,
    ) -> Result<Option<TransactionValues>, StoreError> {
        let data: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM aurum_transactions WHERE id = $1")
                .bind(transaction_id)
                .fetch_optional(&mut *op.tx)
                .await?;
        Ok(data.map(serde_json::from_value).transpose()?)
    }

    async fn find_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Option<TransactionValues>, StoreError> {
        let data: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM aurum_transactions WHERE id = $1")
                .bind(transaction_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(data.map(serde_json::from_value).transpose()?)
    }

    async fn create_lines_in_op(
        &self,
        op: &mut PgOp,
        lines: &[LedgerLineValues],
    ) -> Result<(), StoreError> {
        if lines.is_empty() {
            return Ok(());
        }
        let mut rows = Vec::with_capacity(lines.len());
        for line in lines {
            rows.push((line, serde_json::to_value(line)?));
        }
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"INSERT INTO aurum_ledger_lines
               (id, transaction_id, fixing_id, hedge_scoped, line_type, data, created_at) "#,
        );
        query_builder.push_values(rows, |mut builder, (line, data)| {
            builder
                .push_bind(line.id)
                .push_bind(line.reference.transaction_id())
                .push_bind(line.reference.fixing_id())
                .push_bind(line.reference.is_hedge())
                .push_bind(line.line_type.as_str())
                .push_bind(data)
                .push_bind(line.created_at);
        });
        query_builder.build().execute(&mut *op.tx).await?;
        Ok(())
    }

    async fn delete_lines_for_transaction_in_op(
        &self,
        op: &mut PgOp,
        transaction_id: TransactionId,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM aurum_ledger_lines WHERE transaction_id = $1")
            .bind(transaction_id)
            .execute(&mut *op.tx)
            .await?;
        Ok(())
    }

    async fn list_lines_for_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Vec<LedgerLineValues>, StoreError> {
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(
            "SELECT data FROM aurum_ledger_lines WHERE transaction_id = $1 ORDER BY sequence",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|data| serde_json::from_value(data).map_err(StoreError::from))
            .collect()
    }

    async fn list_lines_for_fixing(
        &self,
        fixing_id: FixingId,
    ) -> Result<Vec<LedgerLineValues>, StoreError> {
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(
            "SELECT data FROM aurum_ledger_lines WHERE fixing_id = $1 ORDER BY sequence",
        )
        .bind(fixing_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|data| serde_json::from_value(data).map_err(StoreError::from))
            .collect()
    }

    async fn find_party(&self, party_id: PartyId) -> Result<Option<PartyValues>, StoreError> {
        let data: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM aurum_parties WHERE id = $1")
                .bind(party_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(data.map(serde_json::from_value).transpose()?)
    }

    async fn find_party_in_op(
        &self,
        op: &mut PgOp,
        party_id: PartyId,
    ) -> Result<Option<PartyValues>, StoreError> {
        let data: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM aurum_parties WHERE id = $1")
                .bind(party_id)
                .fetch_optional(&mut *op.tx)
                .await?;
        Ok(data.map(serde_json::from_value).transpose()?)
    }

    async fn find_party_balances(
        &self,
        party_id: PartyId,
    ) -> Result<Option<PartyBalances>, StoreError> {
        let gold: Option<Decimal> =
            sqlx::query_scalar("SELECT gold_grams FROM aurum_parties WHERE id = $1")
                .bind(party_id)
                .fetch_optional(&self.pool)
                .await?;
        let Some(gold_grams) = gold else {
            return Ok(None);
        };
        let cash: Vec<(Currency, Decimal)> = sqlx::query_as(
            "SELECT currency, amount FROM aurum_party_cash_balances WHERE party_id = $1",
        )
        .bind(party_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some(PartyBalances {
            gold_grams,
            cash: cash.into_iter().collect(),
        }))
    }

    async fn increment_party_balances_in_op(
        &self,
        op: &mut PgOp,
        party_id: PartyId,
        currency: &Currency,
        gold_delta: Decimal,
        cash_delta: Decimal,
    ) -> Result<(), StoreError> {
        if !gold_delta.is_zero() {
            sqlx::query(
                "UPDATE aurum_parties SET gold_grams = gold_grams + $2, modified_at = NOW() WHERE id = $1",
            )
            .bind(party_id)
            .bind(gold_delta)
            .execute(&mut *op.tx)
            .await?;
        }
        if !cash_delta.is_zero() {
            sqlx::query(
                r#"INSERT INTO aurum_party_cash_balances (party_id, currency, amount)
                   VALUES ($1, $2, $3)
                   ON CONFLICT (party_id, currency)
                   DO UPDATE SET amount = aurum_party_cash_balances.amount + EXCLUDED.amount"#,
            )
            .bind(party_id)
            .bind(currency)
            .bind(cash_delta)
            .execute(&mut *op.tx)
            .await?;
        }
        Ok(())
    }

    async fn create_fixing_in_op(
        &self,
        op: &mut PgOp,
        fixing: &FixingValues,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO aurum_fixings (id, kind, party_id, reference_number, data, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(fixing.id)
        .bind(fixing.kind.as_str())
        .bind(fixing.party_id)
        .bind(&fixing.reference_number)
        .bind(serde_json::to_value(fixing)?)
        .bind(fixing.created_at)
        .execute(&mut *op.tx)
        .await?;
        Ok(())
    }

    async fn find_fixing(&self, fixing_id: FixingId) -> Result<Option<FixingValues>, StoreError> {
        let data: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM aurum_fixings WHERE id = $1")
                .bind(fixing_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(data.map(serde_json::from_value).transpose()?)
    }
}
