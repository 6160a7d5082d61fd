pub mod config;
pub mod error;

use chrono::Utc;
use tracing::instrument;

pub use config::*;
use error::*;

use crate::{
    balance,
    fixing::{Fixings, NewFixing},
    inventory::{InventoryService, NullInventory},
    ledger_line::LedgerLines,
    party::Parties,
    posting::{self, FixingContext, PostingContext},
    primitives::{TransactionId, TransactionStatus},
    store::{LedgerStore, MemStore, PgStore},
    transaction::{error::TransactionError, NewTransaction, TransactionUpdate, Transactions},
    voucher::Vouchers,
};

use crate::fixing::FixingValues;
use crate::transaction::TransactionValues;

/// The posting engine. One instance per process; cheap to clone. Every
/// mutation runs as a single unit of work covering the transaction
/// document, its ledger lines, the party balance increments and the
/// inventory call.
#[derive(Clone)]
pub struct AurumLedger<S, I = NullInventory> {
    store: S,
    accounts: PostingAccounts,
    transactions: Transactions<S>,
    ledger_lines: LedgerLines<S>,
    parties: Parties<S>,
    fixings: Fixings<S>,
    vouchers: Vouchers<S>,
    inventory: I,
}

impl AurumLedger<PgStore> {
    pub async fn init(config: AurumLedgerConfig) -> Result<Self, LedgerError> {
        let pool = match (config.pool, config.pg_con) {
            (Some(pool), None) => pool,
            (None, Some(pg_con)) => {
                let mut pool_opts = sqlx::postgres::PgPoolOptions::new();
                if let Some(max_connections) = config.max_connections {
                    pool_opts = pool_opts.max_connections(max_connections);
                }
                pool_opts.connect(&pg_con).await?
            }
            _ => {
                return Err(LedgerError::ConfigError(
                    "One of pg_con or pool must be set".to_string(),
                ))
            }
        };
        if config.exec_migrations {
            sqlx::migrate!().run(&pool).await?;
        }
        Ok(Self::with_store(PgStore::new(pool), config.accounts))
    }
}

impl AurumLedger<MemStore> {
    /// Backend-free engine for tests and embedded tooling.
    pub fn in_memory(accounts: PostingAccounts) -> Self {
        Self::with_store(MemStore::new(), accounts)
    }
}

impl<S: LedgerStore> AurumLedger<S> {
    pub fn with_store(store: S, accounts: PostingAccounts) -> Self {
        Self {
            transactions: Transactions::new(&store),
            ledger_lines: LedgerLines::new(&store),
            parties: Parties::new(&store),
            fixings: Fixings::new(&store),
            vouchers: Vouchers::new(&store),
            inventory: NullInventory,
            accounts,
            store,
        }
    }
}

impl<S, I> AurumLedger<S, I>
where
    S: LedgerStore,
    I: InventoryService<S::Op>,
{
    /// Swaps the inventory collaborator in, keeping everything else.
    pub fn with_inventory<J: InventoryService<S::Op>>(self, inventory: J) -> AurumLedger<S, J> {
        AurumLedger {
            store: self.store,
            accounts: self.accounts,
            transactions: self.transactions,
            ledger_lines: self.ledger_lines,
            parties: self.parties,
            fixings: self.fixings,
            vouchers: self.vouchers,
            inventory,
        }
    }

    pub fn transactions(&self) -> &Transactions<S> {
        &self.transactions
    }

    pub fn ledger_lines(&self) -> &LedgerLines<S> {
        &self.ledger_lines
    }

    pub fn parties(&self) -> &Parties<S> {
        &self.parties
    }

    pub fn fixings(&self) -> &Fixings<S> {
        &self.fixings
    }

    pub fn vouchers(&self) -> &Vouchers<S> {
        &self.vouchers
    }

    /// Posts a new trade: writes the document, emits its ledger lines,
    /// moves the party balances and books the stock movement, all in one
    /// unit of work.
    #[instrument(name = "aurum_ledger.create_transaction", skip(self, new_transaction), err)]
    pub async fn create_transaction(
        &self,
        new_transaction: NewTransaction,
    ) -> Result<TransactionValues, LedgerError> {
        let values = new_transaction.into_values(Utc::now());
        if values.line_items.is_empty() {
            return Err(TransactionError::EmptyLineItems.into());
        }

        let mut op = self.store.begin().await?;
        self.store.lock_transaction(&mut op, values.id).await?;
        let party = self.parties.find_active_in_op(&mut op, values.party_id).await?;
        self.transactions.create_in_op(&mut op, &values).await?;

        let totals = values.totals();
        let ctx = PostingContext {
            transaction: &values,
            totals: &totals,
            party: &party,
            accounts: &self.accounts,
            actor: &values.created_by,
        };
        let lines = posting::ledger_lines_for(&ctx);
        self.ledger_lines.create_all_in_op(&mut op, &lines).await?;

        let delta = balance::delta_for(values.kind, values.settlement_mode(), &totals);
        self.parties
            .apply_delta_in_op(&mut op, values.party_id, &values.currency, delta)
            .await?;
        self.inventory
            .update_inventory(
                &mut op,
                &values,
                values.kind.is_stock_deduction(),
                &values.created_by,
            )
            .await?;
        self.store
            .commit(op)
            .await
            .map_err(TransactionError::from_store)?;
        Ok(values)
    }

    /// Replaces a posted trade. The original posting is fully unwound
    /// first (lines deleted, balances reversed against the original
    /// party, stock movements removed), then the updated document is
    /// re-posted from scratch. Partial-field mutation never happens.
    #[instrument(name = "aurum_ledger.update_transaction", skip(self, update), err)]
    pub async fn update_transaction(
        &self,
        transaction_id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<TransactionValues, LedgerError> {
        let mut op = self.store.begin().await?;
        self.store.lock_transaction(&mut op, transaction_id).await?;
        let original = self.transactions.find_in_op(&mut op, transaction_id).await?;
        if original.is_voided() {
            return Err(TransactionError::Voided(transaction_id).into());
        }
        let actor = update.actor.clone();

        self.ledger_lines
            .delete_for_transaction_in_op(&mut op, transaction_id)
            .await?;
        self.inventory
            .remove_movements_for_transaction(&mut op, transaction_id)
            .await?;
        let original_totals = original.totals();
        let original_delta = balance::delta_for(
            original.kind,
            original.settlement_mode(),
            &original_totals,
        );
        self.parties
            .apply_delta_in_op(
                &mut op,
                original.party_id,
                &original.currency,
                original_delta.reversed(),
            )
            .await?;

        let mut values = original;
        update.apply(&mut values, Utc::now());
        if values.line_items.is_empty() {
            return Err(TransactionError::EmptyLineItems.into());
        }
        let party = self.parties.find_active_in_op(&mut op, values.party_id).await?;

        let totals = values.totals();
        let ctx = PostingContext {
            transaction: &values,
            totals: &totals,
            party: &party,
            accounts: &self.accounts,
            actor: &actor,
        };
        let lines = posting::ledger_lines_for(&ctx);
        self.ledger_lines.create_all_in_op(&mut op, &lines).await?;

        let delta = balance::delta_for(values.kind, values.settlement_mode(), &totals);
        self.parties
            .apply_delta_in_op(&mut op, values.party_id, &values.currency, delta)
            .await?;
        self.transactions.update_in_op(&mut op, &values).await?;
        self.inventory
            .update_inventory(
                &mut op,
                &values,
                values.kind.is_stock_deduction(),
                &actor,
            )
            .await?;
        self.store
            .commit(op)
            .await
            .map_err(TransactionError::from_store)?;
        Ok(values)
    }

    /// Soft delete. Unwinds the posting like an update would, then marks
    /// the document `Voided` instead of re-posting it. The voucher
    /// number is released for reuse.
    #[instrument(name = "aurum_ledger.void_transaction", skip(self), err)]
    pub async fn void_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<TransactionValues, LedgerError> {
        let mut op = self.store.begin().await?;
        self.store.lock_transaction(&mut op, transaction_id).await?;
        let mut values = self.transactions.find_in_op(&mut op, transaction_id).await?;
        if values.is_voided() {
            return Err(TransactionError::Voided(transaction_id).into());
        }

        self.ledger_lines
            .delete_for_transaction_in_op(&mut op, transaction_id)
            .await?;
        self.inventory
            .remove_movements_for_transaction(&mut op, transaction_id)
            .await?;
        let totals = values.totals();
        let delta = balance::delta_for(values.kind, values.settlement_mode(), &totals);
        self.parties
            .apply_delta_in_op(
                &mut op,
                values.party_id,
                &values.currency,
                delta.reversed(),
            )
            .await?;

        values.status = TransactionStatus::Voided;
        values.modified_at = Utc::now();
        self.transactions.update_in_op(&mut op, &values).await?;
        self.store
            .commit(op)
            .await
            .map_err(TransactionError::from_store)?;
        Ok(values)
    }

    /// Records a rate fixing against previously unfixed metal: the
    /// fixing document, its ledger lines and the party balance moves
    /// post together.
    #[instrument(name = "aurum_ledger.record_fixing", skip(self, new_fixing), err)]
    pub async fn record_fixing(&self, new_fixing: NewFixing) -> Result<FixingValues, LedgerError> {
        let values = new_fixing.into_values(Utc::now());

        let mut op = self.store.begin().await?;
        let party = self.parties.find_active_in_op(&mut op, values.party_id).await?;
        self.fixings.create_in_op(&mut op, &values).await?;

        let ctx = FixingContext {
            fixing: &values,
            party: &party,
            accounts: &self.accounts,
        };
        let lines = posting::fixing_lines_for(&ctx);
        self.ledger_lines.create_all_in_op(&mut op, &lines).await?;

        let delta = balance::delta_for_fixing(&values);
        self.parties
            .apply_delta_in_op(&mut op, values.party_id, &values.currency, delta)
            .await?;
        self.store.commit(op).await?;
        Ok(values)
    }
}
