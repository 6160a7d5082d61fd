use chrono::{DateTime, NaiveDate, Utc};
use derive_builder::Builder;
use rust_decimal::Decimal;

pub use aurum_types::fixing::{FixingKind, FixingValues};

use crate::primitives::{Currency, FixingId, PartyId};

/// A rate fixing event waiting to be recorded.
#[derive(Builder, Clone, Debug)]
pub struct NewFixing {
    #[builder(setter(into), default = "FixingId::new()")]
    pub(crate) id: FixingId,
    pub(crate) kind: FixingKind,
    #[builder(default)]
    pub(crate) hedged: bool,
    #[builder(setter(into))]
    pub(crate) party_id: PartyId,
    #[builder(setter(into))]
    pub(crate) currency: Currency,
    pub(crate) weight_grams: Decimal,
    pub(crate) rate: Decimal,
    #[builder(default)]
    pub(crate) premium: Decimal,
    #[builder(default)]
    pub(crate) discount: Decimal,
    #[builder(setter(into))]
    pub(crate) reference_number: String,
    pub(crate) fixing_date: NaiveDate,
    #[builder(setter(strip_option, into), default)]
    pub(crate) description: Option<String>,
    #[builder(setter(into))]
    pub(crate) created_by: String,
}

impl NewFixing {
    pub fn builder() -> NewFixingBuilder {
        NewFixingBuilder::default()
    }

    pub(crate) fn into_values(self, now: DateTime<Utc>) -> FixingValues {
        FixingValues {
            id: self.id,
            kind: self.kind,
            hedged: self.hedged,
            party_id: self.party_id,
            currency: self.currency,
            weight_grams: self.weight_grams,
            rate: self.rate,
            premium: self.premium,
            discount: self.discount,
            reference_number: self.reference_number,
            fixing_date: self.fixing_date,
            description: self.description,
            created_by: self.created_by,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn it_builds() -> anyhow::Result<()> {
        let new_fixing = NewFixing::builder()
            .kind(FixingKind::Purchase)
            .party_id(PartyId::new())
            .currency("INR".parse::<Currency>()?)
            .weight_grams(dec!(100))
            .rate(dec!(65))
            .reference_number("FIX-1001")
            .fixing_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
            .created_by("desk")
            .build()?;
        assert!(!new_fixing.hedged);
        assert_eq!(new_fixing.premium, Decimal::ZERO);
        let values = new_fixing.into_values(Utc::now());
        assert_eq!(values.amount(), dec!(6500));
        Ok(())
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_fixing = NewFixing::builder().build();
        assert!(new_fixing.is_err());
    }
}
