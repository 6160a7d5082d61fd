use serde::{Deserialize, Serialize};

crate::entity_id! { TransactionId }
crate::entity_id! { LedgerLineId }
crate::entity_id! { PartyId }
crate::entity_id! { FixingId }
crate::entity_id! { StockItemId }

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DebitOrCredit {
    Debit,
    Credit,
}

impl Default for DebitOrCredit {
    fn default() -> Self {
        Self::Credit
    }
}

impl DebitOrCredit {
    pub fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// The commercial shape of a trade: forward purchases and sales plus their
/// return counterparts. Returns always post as the exact reversal of the
/// forward kind they undo.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Purchase,
    Sale,
    PurchaseReturn,
    SaleReturn,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Purchase => "purchase",
            TransactionKind::Sale => "sale",
            TransactionKind::PurchaseReturn => "purchaseReturn",
            TransactionKind::SaleReturn => "saleReturn",
        }
    }

    pub fn is_return(self) -> bool {
        matches!(
            self,
            TransactionKind::PurchaseReturn | TransactionKind::SaleReturn
        )
    }

    /// The kind whose posting a return reverses; forward kinds map to
    /// themselves.
    pub fn forward_kind(self) -> TransactionKind {
        match self {
            TransactionKind::PurchaseReturn => TransactionKind::Purchase,
            TransactionKind::SaleReturn => TransactionKind::Sale,
            other => other,
        }
    }

    /// Whether physical stock leaves the house for this kind. Purchases and
    /// sale returns bring metal in; sales and purchase returns move it out.
    pub fn is_stock_deduction(self) -> bool {
        matches!(
            self,
            TransactionKind::Sale | TransactionKind::PurchaseReturn
        )
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
#[error("Unknown transaction kind: {0}")]
pub struct ParseTransactionKindError(String);

impl std::str::FromStr for TransactionKind {
    type Err = ParseTransactionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(TransactionKind::Purchase),
            "sale" => Ok(TransactionKind::Sale),
            "purchaseReturn" => Ok(TransactionKind::PurchaseReturn),
            "saleReturn" => Ok(TransactionKind::SaleReturn),
            other => Err(ParseTransactionKindError(other.to_string())),
        }
    }
}

/// How the metal price of a trade settles. Exactly one mode is active per
/// transaction, resolved from the header flags.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMode {
    Fix,
    Unfix,
    Hedge,
}

impl SettlementMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SettlementMode::Fix => "fix",
            SettlementMode::Unfix => "unfix",
            SettlementMode::Hedge => "hedge",
        }
    }
}

impl std::fmt::Display for SettlementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PartyStatus {
    Active,
    Locked,
}

impl Default for PartyStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Posted,
    Voided,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        Self::Posted
    }
}

/// An upper-case alphabetic currency code ("AED", "USD", …). Party cash
/// balances are keyed by it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn code(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ParseCurrencyError {
    #[error("Currency code must be 3 characters.")]
    WrongLength,
    #[error("Currency code must be upper-case ASCII letters.")]
    InvalidCharacter,
}

impl std::str::FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 {
            Err(ParseCurrencyError::WrongLength)
        } else if !s.chars().all(|c| c.is_ascii_uppercase()) {
            Err(ParseCurrencyError::InvalidCharacter)
        } else {
            Ok(Currency(s.to_string()))
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
