use crate::domain::currency::Currency;
use crate::domain::money::Amount;
use crate::domain::validation::FieldError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two mutually exclusive payment methods. Selecting one arms the
/// matching provider's dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Wallet,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Card => f.write_str("card"),
            PaymentMethod::Wallet => f.write_str("wallet"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "wallet" | "paypal" => Ok(PaymentMethod::Wallet),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Raw card form input, required only when the card method is selected.
/// The hosted-card provider tokenizes this; it is never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub name_on_card: String,
}

impl CardDetails {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.card_number.trim().is_empty() {
            errors.push(FieldError::new("card_number", "Card number is required"));
        }
        if self.expiry.trim().is_empty() {
            errors.push(FieldError::new("expiry", "Expiry date is required"));
        }
        if self.cvv.trim().is_empty() {
            errors.push(FieldError::new("cvv", "CVV is required"));
        }
        if self.name_on_card.trim().is_empty() {
            errors.push(FieldError::new("name_on_card", "Name on card is required"));
        }
        errors
    }
}

/// The identity both providers receive alongside the charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerIdentity {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// The derived inputs handed to whichever provider is armed.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub amount: Amount,
    pub currency: Currency,
    pub payer: PayerIdentity,
    pub card: Option<CardDetails>,
    pub description: String,
    /// Merchant-side reference carried through to the provider.
    pub reference: String,
}

/// What a provider reports back on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum PaymentReceipt {
    /// Hosted card element: a tokenized payment method plus an intent id.
    Card {
        intent_id: String,
        method_id: String,
        amount_minor: i64,
        currency: Currency,
    },
    /// Redirect wallet: provider-managed order and payer identifiers.
    Wallet {
        order_id: String,
        payer_id: String,
        amount_minor: i64,
        currency: Currency,
    },
    /// Zero-total orders never reach a provider.
    NoCharge { currency: Currency },
}

impl PaymentReceipt {
    pub fn amount_minor(&self) -> i64 {
        match self {
            PaymentReceipt::Card { amount_minor, .. }
            | PaymentReceipt::Wallet { amount_minor, .. } => *amount_minor,
            PaymentReceipt::NoCharge { .. } => 0,
        }
    }

    pub fn method_label(&self) -> &'static str {
        match self {
            PaymentReceipt::Card { .. } => "card",
            PaymentReceipt::Wallet { .. } => "wallet",
            PaymentReceipt::NoCharge { .. } => "none",
        }
    }
}

/// Everything a provider can report on failure. The engine normalizes
/// all of these into a single failure record shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{0}")]
    Declined(String),
    #[error("Payment was cancelled by user")]
    Cancelled,
    #[error("invalid charge request: {0}")]
    Invalid(String),
    #[error("network error: {0}")]
    Network(String),
}
