use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ledger_line::LedgerLineType;
use super::primitives::*;

/// Direction of a price-fixing event. A purchase fixing settles metal the
/// house bought at a floating rate; a sale fixing settles metal it sold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixingKind {
    Purchase,
    Sale,
}

impl FixingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Sale => "sale",
        }
    }
}

impl std::fmt::Display for FixingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FixingValues {
    pub id: FixingId,
    pub kind: FixingKind,
    pub hedged: bool,
    pub party_id: PartyId,
    pub currency: Currency,
    pub weight_grams: Decimal,
    pub rate: Decimal,
    pub premium: Decimal,
    pub discount: Decimal,
    pub reference_number: String,
    pub fixing_date: NaiveDate,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl FixingValues {
    /// Cash settled by the fixing: weight at the struck rate, plus any
    /// premium, less any discount.
    pub fn amount(&self) -> Decimal {
        self.weight_grams * self.rate + self.premium - self.discount
    }

    pub fn summary_line_type(&self) -> LedgerLineType {
        match (self.kind, self.hedged) {
            (FixingKind::Purchase, false) => LedgerLineType::PurchaseFixing,
            (FixingKind::Sale, false) => LedgerLineType::SalesFixing,
            (FixingKind::Purchase, true) => LedgerLineType::HedgePurchaseFixing,
            (FixingKind::Sale, true) => LedgerLineType::HedgeSalesFixing,
        }
    }
}
