use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartyValues {
    pub id: PartyId,
    pub account_code: String,
    pub name: String,
    pub status: PartyStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl PartyValues {
    pub fn is_active(&self) -> bool {
        self.status == PartyStatus::Active
    }
}

/// Running position of a counterparty. Gold is a single figure in grams;
/// cash is tracked per settlement currency. Positive means the house owes
/// the party, negative means the party owes the house.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyBalances {
    pub gold_grams: Decimal,
    pub cash: HashMap<Currency, Decimal>,
}

impl PartyBalances {
    pub fn cash_balance(&self, currency: &Currency) -> Decimal {
        self.cash.get(currency).copied().unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_currency_reads_as_zero() {
        let mut balances = PartyBalances::default();
        let usd: Currency = "USD".parse().unwrap();
        assert_eq!(balances.cash_balance(&usd), Decimal::ZERO);

        balances.cash.insert(usd.clone(), dec!(-1250.75));
        assert_eq!(balances.cash_balance(&usd), dec!(-1250.75));
        let aed: Currency = "AED".parse().unwrap();
        assert_eq!(balances.cash_balance(&aed), Decimal::ZERO);
    }
}
