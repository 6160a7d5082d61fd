use rust_decimal::Decimal;

use aurum_types::fixing::{FixingKind, FixingValues};
use aurum_types::totals::TransactionTotals;

use crate::primitives::{SettlementMode, TransactionKind};

/// Signed change to a party's running position. Positive moves the
/// balance toward the party (the house owes more), negative away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceDelta {
    pub gold: Decimal,
    pub cash: Decimal,
}

impl BalanceDelta {
    pub fn reversed(self) -> Self {
        Self {
            gold: -self.gold,
            cash: -self.cash,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.gold.is_zero() && self.cash.is_zero()
    }
}

/// The `(kind, mode)` delta matrix. Sale negates purchase of the same
/// mode, and each return kind negates its forward kind, so only the
/// purchase column is written out.
pub(crate) fn delta_for(
    kind: TransactionKind,
    mode: SettlementMode,
    totals: &TransactionTotals,
) -> BalanceDelta {
    let purchase = match mode {
        SettlementMode::Fix => BalanceDelta {
            gold: Decimal::ZERO,
            cash: -totals.total_price(),
        },
        SettlementMode::Unfix => BalanceDelta {
            gold: totals.pure_weight,
            cash: -totals.charges_total(),
        },
        SettlementMode::Hedge => BalanceDelta {
            gold: totals.pure_weight,
            cash: -totals.total_price(),
        },
    };
    match kind {
        TransactionKind::Purchase | TransactionKind::SaleReturn => purchase,
        TransactionKind::Sale | TransactionKind::PurchaseReturn => purchase.reversed(),
    }
}

/// A purchase fixing hands metal back to the house and credits the party
/// the struck amount; a sale fixing is the negation.
pub(crate) fn delta_for_fixing(fixing: &FixingValues) -> BalanceDelta {
    let purchase = BalanceDelta {
        gold: -fixing.weight_grams,
        cash: fixing.amount(),
    };
    match fixing.kind {
        FixingKind::Purchase => purchase,
        FixingKind::Sale => purchase.reversed(),
    }
}
