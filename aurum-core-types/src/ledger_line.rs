use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::*;

/// Tag identifying what a ledger line settles. The wire names are the
/// account-head labels used on printed vouchers, so they are preserved
/// verbatim rather than normalized to one casing convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerLineType {
    #[serde(rename = "PARTY_CASH_BALANCE")]
    PartyCashBalance,
    #[serde(rename = "PARTY_GOLD_BALANCE")]
    PartyGoldBalance,
    #[serde(rename = "GOLD")]
    Gold,
    #[serde(rename = "GOLD_STOCK")]
    GoldStock,
    #[serde(rename = "PURITY_DIFFERENCE")]
    PurityDifference,
    #[serde(rename = "MAKING_CHARGES")]
    MakingCharges,
    #[serde(rename = "VAT")]
    Vat,
    #[serde(rename = "PREMIUM")]
    Premium,
    #[serde(rename = "DISCOUNT")]
    Discount,
    #[serde(rename = "OTHER_CHARGES")]
    OtherCharges,
    #[serde(rename = "purchase-fixing")]
    PurchaseFixing,
    #[serde(rename = "sales-fixing")]
    SalesFixing,
    #[serde(rename = "hedge-purchase-fixing")]
    HedgePurchaseFixing,
    #[serde(rename = "hedge-sales-fixing")]
    HedgeSalesFixing,
}

impl LedgerLineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PartyCashBalance => "PARTY_CASH_BALANCE",
            Self::PartyGoldBalance => "PARTY_GOLD_BALANCE",
            Self::Gold => "GOLD",
            Self::GoldStock => "GOLD_STOCK",
            Self::PurityDifference => "PURITY_DIFFERENCE",
            Self::MakingCharges => "MAKING_CHARGES",
            Self::Vat => "VAT",
            Self::Premium => "PREMIUM",
            Self::Discount => "DISCOUNT",
            Self::OtherCharges => "OTHER_CHARGES",
            Self::PurchaseFixing => "purchase-fixing",
            Self::SalesFixing => "sales-fixing",
            Self::HedgePurchaseFixing => "hedge-purchase-fixing",
            Self::HedgeSalesFixing => "hedge-sales-fixing",
        }
    }

    /// Fixing summaries are posted even when both sides are zero so the
    /// event leaves a visible trace. All other lines are skipped at zero.
    pub fn always_emit(&self) -> bool {
        matches!(
            self,
            Self::PurchaseFixing
                | Self::SalesFixing
                | Self::HedgePurchaseFixing
                | Self::HedgeSalesFixing
        )
    }
}

impl std::fmt::Display for LedgerLineType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a ledger line is anchored to. Replacing or voiding a transaction
/// removes its `Transaction` and `Hedge` lines; `Fixing` lines belong to
/// fixing events and never travel with a transaction rebuild.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LineReference {
    #[serde(rename_all = "camelCase")]
    Transaction {
        transaction_id: TransactionId,
    },
    #[serde(rename_all = "camelCase")]
    Hedge {
        transaction_id: TransactionId,
        hedge_ref: String,
    },
    #[serde(rename_all = "camelCase")]
    Fixing {
        fixing_id: FixingId,
    },
}

impl LineReference {
    pub fn transaction_id(&self) -> Option<TransactionId> {
        match self {
            Self::Transaction { transaction_id } | Self::Hedge { transaction_id, .. } => {
                Some(*transaction_id)
            }
            Self::Fixing { .. } => None,
        }
    }

    pub fn fixing_id(&self) -> Option<FixingId> {
        match self {
            Self::Fixing { fixing_id } => Some(*fixing_id),
            _ => None,
        }
    }

    pub fn is_hedge(&self) -> bool {
        matches!(self, Self::Hedge { .. })
    }
}

/// One posted ledger line.
///
/// Single-dimension lines (charges, stock, metal heads) use the legacy
/// `value`/`credit` pair, where `value` is the debit side. Party-facing
/// and fixing-summary lines carry the four explicit cash/gold columns
/// instead and leave the legacy pair at zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerLineValues {
    pub id: LedgerLineId,
    pub account_code: String,
    pub party_id: Option<PartyId>,
    pub line_type: LedgerLineType,
    pub reference: LineReference,
    pub group: String,
    pub currency: Currency,
    pub value: Decimal,
    pub credit: Decimal,
    pub cash_debit: Decimal,
    pub cash_credit: Decimal,
    pub gold_debit: Decimal,
    pub gold_credit: Decimal,
    pub voucher_number: String,
    pub voucher_date: NaiveDate,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl LedgerLineValues {
    /// Debit/credit mirror of this line. Return flows post the exact
    /// mirror of their forward flow, so reversal is a data transform
    /// rather than a second hand-written rule set.
    pub fn reversed(mut self) -> Self {
        std::mem::swap(&mut self.value, &mut self.credit);
        std::mem::swap(&mut self.cash_debit, &mut self.cash_credit);
        std::mem::swap(&mut self.gold_debit, &mut self.gold_credit);
        self
    }

    /// True when both the legacy pair and all four explicit columns are zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
            && self.credit.is_zero()
            && self.cash_debit.is_zero()
            && self.cash_credit.is_zero()
            && self.gold_debit.is_zero()
            && self.gold_credit.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for line_type in [
            LedgerLineType::PartyCashBalance,
            LedgerLineType::GoldStock,
            LedgerLineType::PurchaseFixing,
            LedgerLineType::HedgeSalesFixing,
        ] {
            let json = serde_json::to_string(&line_type).unwrap();
            assert_eq!(json, format!("\"{}\"", line_type.as_str()));
            let back: LedgerLineType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, line_type);
        }
    }

    #[test]
    fn hedge_reference_keeps_transaction_id() {
        let transaction_id = TransactionId::new();
        let reference = LineReference::Hedge {
            transaction_id,
            hedge_ref: "H-GP-1001".to_string(),
        };
        assert!(reference.is_hedge());
        assert_eq!(reference.transaction_id(), Some(transaction_id));
        assert_eq!(reference.fixing_id(), None);
    }

    #[test]
    fn references_serialize_with_one_field_casing() {
        let transaction_id = TransactionId::new();
        let plain =
            serde_json::to_value(LineReference::Transaction { transaction_id }).unwrap();
        assert_eq!(plain["kind"], "transaction");
        assert_eq!(
            plain["transactionId"],
            serde_json::to_value(transaction_id).unwrap()
        );

        let hedge = serde_json::to_value(LineReference::Hedge {
            transaction_id,
            hedge_ref: "H-GP-1001".to_string(),
        })
        .unwrap();
        assert_eq!(hedge["kind"], "hedge");
        assert_eq!(hedge["transactionId"], plain["transactionId"]);
        assert_eq!(hedge["hedgeRef"], "H-GP-1001");

        let fixing = serde_json::to_value(LineReference::Fixing {
            fixing_id: FixingId::new(),
        })
        .unwrap();
        assert_eq!(fixing["kind"], "fixing");
        assert!(fixing["fixingId"].is_string());

        let back: LineReference = serde_json::from_value(plain).unwrap();
        assert_eq!(back.transaction_id(), Some(transaction_id));
    }

    #[test]
    fn reversal_swaps_every_side() {
        use rust_decimal_macros::dec;

        let line = LedgerLineValues {
            id: LedgerLineId::new(),
            account_code: "4010".to_string(),
            party_id: None,
            line_type: LedgerLineType::MakingCharges,
            reference: LineReference::Transaction {
                transaction_id: TransactionId::new(),
            },
            group: "ab12cd34".to_string(),
            currency: "USD".parse().unwrap(),
            value: dec!(50),
            credit: Decimal::ZERO,
            cash_debit: dec!(10),
            cash_credit: dec!(2),
            gold_debit: dec!(1),
            gold_credit: Decimal::ZERO,
            voucher_number: "PV-1001".to_string(),
            voucher_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            description: None,
            created_by: "desk".to_string(),
            created_at: chrono::Utc::now(),
        };

        let reversed = line.clone().reversed();
        assert_eq!(reversed.value, line.credit);
        assert_eq!(reversed.credit, line.value);
        assert_eq!(reversed.cash_debit, line.cash_credit);
        assert_eq!(reversed.cash_credit, line.cash_debit);
        assert_eq!(reversed.gold_debit, line.gold_credit);
        assert_eq!(reversed.gold_credit, line.gold_debit);
        assert_eq!(reversed.clone().reversed().value, line.value);
    }
}
