use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::LineItemValues;

/// Aggregate money and weight totals of a transaction's line items.
///
/// Premium and discount accumulate separately: a line's signed
/// premium/discount amount lands in `premium` when positive and in
/// `discount` (as an absolute value) when negative, because the two post to
/// opposite sides of the ledger. `gold_bid_value` is the last observed rate
/// across the sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTotals {
    pub making_charges: Decimal,
    pub premium: Decimal,
    pub discount: Decimal,
    pub vat_amount: Decimal,
    pub other_charges: Decimal,
    pub gold_value: Decimal,
    pub pure_weight: Decimal,
    pub gross_weight: Decimal,
    pub standard_pure_weight: Decimal,
    pub purity_diff_weight: Decimal,
    pub gold_bid_value: Decimal,
}

impl TransactionTotals {
    pub fn for_line_items<'a>(items: impl IntoIterator<Item = &'a LineItemValues>) -> Self {
        let mut totals = TransactionTotals::default();
        for item in items {
            totals.making_charges += item.making_charges;
            if item.premium_discount < Decimal::ZERO {
                totals.discount += item.premium_discount.abs();
            } else {
                totals.premium += item.premium_discount;
            }
            totals.vat_amount += item.vat_amount;
            totals.other_charges += item.other_charges;
            totals.gold_value += item.gold_value;
            totals.pure_weight += item.pure_weight;
            totals.gross_weight += item.gross_weight;
            totals.standard_pure_weight += item.standard_pure_weight;
            totals.purity_diff_weight += item.purity_diff_weight;
            totals.gold_bid_value = item.gold_rate;
        }
        totals
    }

    /// Full price of a priced (fix or hedge) trade: metal value plus all
    /// charges, net of discount.
    pub fn total_price(&self) -> Decimal {
        self.gold_value + self.making_charges + self.premium - self.discount
            + self.vat_amount
            + self.other_charges
    }

    /// Cash owed on an unfixed trade, where the metal itself stays unpriced:
    /// making charges plus premium, net of discount, plus other charges.
    pub fn charges_total(&self) -> Decimal {
        self.making_charges + self.premium - self.discount + self.other_charges
    }
}
