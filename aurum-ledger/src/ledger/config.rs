use derive_builder::Builder;

use aurum_types::ledger_line::LedgerLineType;

#[derive(Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct AurumLedgerConfig {
    #[builder(setter(into, strip_option), default)]
    pub(super) pg_con: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub(super) max_connections: Option<u32>,
    #[builder(default)]
    pub(super) exec_migrations: bool,
    #[builder(setter(into, strip_option), default)]
    pub(super) pool: Option<sqlx::PgPool>,
    #[builder(default)]
    pub(super) accounts: PostingAccounts,
}

impl AurumLedgerConfig {
    pub fn builder() -> AurumLedgerConfigBuilder {
        AurumLedgerConfigBuilder::default()
    }
}

impl AurumLedgerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match (self.pg_con.as_ref(), self.pool.as_ref()) {
            (None, None) | (Some(None), None) | (None, Some(None)) => {
                return Err("One of pg_con or pool must be set".to_string())
            }
            (Some(_), Some(_)) => return Err("Only one of pg_con or pool must be set".to_string()),
            _ => (),
        }
        Ok(())
    }
}

/// Chart-of-accounts codes the engine posts charge and stock lines
/// against. Party-facing and summary lines resolve to the counterparty's
/// own account code instead and never consult this table.
#[derive(Clone, Debug)]
pub struct PostingAccounts {
    pub making_charges: String,
    pub vat: String,
    pub premium: String,
    pub discount: String,
    pub other_charges: String,
    pub gold: String,
    pub gold_stock: String,
    pub purity_difference: String,
}

impl Default for PostingAccounts {
    fn default() -> Self {
        Self {
            making_charges: "EXP-MAKING".to_string(),
            vat: "TAX-VAT".to_string(),
            premium: "EXP-PREMIUM".to_string(),
            discount: "INC-DISCOUNT".to_string(),
            other_charges: "EXP-OTHER".to_string(),
            gold: "AST-GOLD".to_string(),
            gold_stock: "AST-GOLD-STOCK".to_string(),
            purity_difference: "AST-PURITY-DIFF".to_string(),
        }
    }
}

impl PostingAccounts {
    pub(crate) fn code_for(&self, line_type: LedgerLineType) -> Option<&str> {
        use LedgerLineType::*;
        match line_type {
            MakingCharges => Some(&self.making_charges),
            Vat => Some(&self.vat),
            Premium => Some(&self.premium),
            Discount => Some(&self.discount),
            OtherCharges => Some(&self.other_charges),
            Gold => Some(&self.gold),
            GoldStock => Some(&self.gold_stock),
            PurityDifference => Some(&self.purity_difference),
            PartyCashBalance | PartyGoldBalance | PurchaseFixing | SalesFixing
            | HedgePurchaseFixing | HedgeSalesFixing => None,
        }
    }
}
