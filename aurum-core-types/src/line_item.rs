use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::*;

/// One metal position within a transaction. Weights are grams; the
/// purity-difference weight is standard minus pure and may be negative.
/// The premium/discount amount carries its polarity in the sign: positive
/// is a premium, negative a discount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItemValues {
    pub stock_item_id: StockItemId,
    pub gross_weight: Decimal,
    pub purity: Decimal,
    pub pure_weight: Decimal,
    pub standard_pure_weight: Decimal,
    pub purity_diff_weight: Decimal,
    pub making_charges: Decimal,
    pub premium_discount: Decimal,
    pub vat_amount: Decimal,
    pub other_charges: Decimal,
    pub gold_rate: Decimal,
    pub gold_value: Decimal,
}
