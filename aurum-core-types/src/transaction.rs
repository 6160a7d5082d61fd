use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::LineItemValues;
use super::primitives::*;
use super::totals::TransactionTotals;

/// Settlement header flags as captured on the trade. `mode` collapses them
/// into the single active settlement mode: hedge wins outright, a fixed
/// price needs `fixed` without `unfix`, and everything else floats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementFlags {
    pub fixed: bool,
    pub unfix: bool,
    pub hedged: bool,
}

impl SettlementFlags {
    pub fn mode(self) -> SettlementMode {
        if self.hedged {
            SettlementMode::Hedge
        } else if self.fixed && !self.unfix {
            SettlementMode::Fix
        } else {
            SettlementMode::Unfix
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionValues {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub settlement: SettlementFlags,
    pub party_id: PartyId,
    pub currency: Currency,
    pub gold_rate: Decimal,
    pub line_items: Vec<LineItemValues>,
    pub voucher_number: String,
    pub voucher_date: NaiveDate,
    pub hedge_reference: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl TransactionValues {
    pub fn settlement_mode(&self) -> SettlementMode {
        self.settlement.mode()
    }

    pub fn totals(&self) -> TransactionTotals {
        TransactionTotals::for_line_items(&self.line_items)
    }

    pub fn is_voided(&self) -> bool {
        self.status == TransactionStatus::Voided
    }

    /// Short identifier shared by every ledger line of this transaction,
    /// used to group lines back together on the audit side.
    pub fn line_group(&self) -> String {
        let simple = uuid::Uuid::from(self.id).simple().to_string();
        simple[..8].to_string()
    }
}
