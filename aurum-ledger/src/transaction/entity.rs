use chrono::{DateTime, NaiveDate, Utc};
use derive_builder::Builder;
use rust_decimal::Decimal;

use crate::primitives::*;

pub use aurum_types::line_item::LineItemValues;
pub use aurum_types::totals::TransactionTotals;
pub use aurum_types::transaction::{SettlementFlags, TransactionValues};

/// Input for posting a new trade. The id defaults to a fresh one; pass
/// an explicit id only when the caller allocated it up front.
#[derive(Builder, Clone, Debug)]
pub struct NewTransaction {
    #[builder(setter(into), default = "TransactionId::new()")]
    pub(crate) id: TransactionId,
    pub(crate) kind: TransactionKind,
    #[builder(setter(custom), default)]
    pub(crate) settlement: SettlementFlags,
    #[builder(setter(into))]
    pub(crate) party_id: PartyId,
    #[builder(setter(into))]
    pub(crate) currency: Currency,
    #[builder(default)]
    pub(crate) gold_rate: Decimal,
    pub(crate) line_items: Vec<LineItemValues>,
    #[builder(setter(into))]
    pub(crate) voucher_number: String,
    pub(crate) voucher_date: NaiveDate,
    #[builder(setter(strip_option, into), default)]
    pub(crate) hedge_reference: Option<String>,
    #[builder(setter(strip_option, into), default)]
    pub(crate) description: Option<String>,
    #[builder(setter(into), default)]
    pub(crate) metadata: Option<serde_json::Value>,
    #[builder(setter(into))]
    pub(crate) created_by: String,
}

impl NewTransaction {
    pub fn builder() -> NewTransactionBuilder {
        NewTransactionBuilder::default()
    }

    pub(crate) fn into_values(self, now: DateTime<Utc>) -> TransactionValues {
        TransactionValues {
            id: self.id,
            kind: self.kind,
            status: TransactionStatus::Posted,
            settlement: self.settlement,
            party_id: self.party_id,
            currency: self.currency,
            gold_rate: self.gold_rate,
            line_items: self.line_items,
            voucher_number: self.voucher_number,
            voucher_date: self.voucher_date,
            hedge_reference: self.hedge_reference,
            description: self.description,
            metadata: self.metadata,
            created_by: self.created_by,
            created_at: now,
            modified_at: now,
        }
    }
}

impl NewTransactionBuilder {
    pub fn settlement(&mut self, settlement: SettlementFlags) -> &mut Self {
        self.settlement = Some(settlement);
        self
    }

    pub fn fixed(&mut self) -> &mut Self {
        let mut flags = self.settlement.unwrap_or_default();
        flags.fixed = true;
        self.settlement = Some(flags);
        self
    }

    pub fn unfixed(&mut self) -> &mut Self {
        let mut flags = self.settlement.unwrap_or_default();
        flags.unfix = true;
        self.settlement = Some(flags);
        self
    }

    pub fn hedged(&mut self) -> &mut Self {
        let mut flags = self.settlement.unwrap_or_default();
        flags.hedged = true;
        self.settlement = Some(flags);
        self
    }
}

/// Field updates for the replace flow. Unset fields keep their current
/// value; the transaction is fully re-posted either way.
#[derive(Builder, Clone, Debug)]
pub struct TransactionUpdate {
    #[builder(setter(into))]
    pub(crate) actor: String,
    #[builder(setter(strip_option), default)]
    pub(crate) kind: Option<TransactionKind>,
    #[builder(setter(strip_option), default)]
    pub(crate) settlement: Option<SettlementFlags>,
    #[builder(setter(strip_option, into), default)]
    pub(crate) party_id: Option<PartyId>,
    #[builder(setter(strip_option, into), default)]
    pub(crate) currency: Option<Currency>,
    #[builder(setter(strip_option), default)]
    pub(crate) gold_rate: Option<Decimal>,
    #[builder(setter(strip_option), default)]
    pub(crate) line_items: Option<Vec<LineItemValues>>,
    #[builder(setter(strip_option, into), default)]
    pub(crate) voucher_number: Option<String>,
    #[builder(setter(strip_option), default)]
    pub(crate) voucher_date: Option<NaiveDate>,
    #[builder(setter(strip_option, into), default)]
    pub(crate) hedge_reference: Option<String>,
    #[builder(setter(strip_option, into), default)]
    pub(crate) description: Option<String>,
    #[builder(setter(into), default)]
    pub(crate) metadata: Option<serde_json::Value>,
}

impl TransactionUpdate {
    pub fn builder() -> TransactionUpdateBuilder {
        TransactionUpdateBuilder::default()
    }

    pub(crate) fn apply(self, values: &mut TransactionValues, now: DateTime<Utc>) {
        if let Some(kind) = self.kind {
            values.kind = kind;
        }
        if let Some(settlement) = self.settlement {
            values.settlement = settlement;
        }
        if let Some(party_id) = self.party_id {
            values.party_id = party_id;
        }
        if let Some(currency) = self.currency {
            values.currency = currency;
        }
        if let Some(gold_rate) = self.gold_rate {
            values.gold_rate = gold_rate;
        }
        if let Some(line_items) = self.line_items {
            values.line_items = line_items;
        }
        if let Some(voucher_number) = self.voucher_number {
            values.voucher_number = voucher_number;
        }
        if let Some(voucher_date) = self.voucher_date {
            values.voucher_date = voucher_date;
        }
        if let Some(hedge_reference) = self.hedge_reference {
            values.hedge_reference = Some(hedge_reference);
        }
        if let Some(description) = self.description {
            values.description = Some(description);
        }
        if let Some(metadata) = self.metadata {
            values.metadata = Some(metadata);
        }
        values.modified_at = now;
    }
}
