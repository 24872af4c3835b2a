use crate::domain::customer::CustomerInfo;
use crate::domain::payment::{CardDetails, PaymentMethod};
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

/// One checkout attempt as read from a batch CSV. String fields mirror
/// raw form input; empty means the field was left blank.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CheckoutRequest {
    pub plan: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub existing_user: bool,
    #[serde(default)]
    pub terms: bool,
    #[serde(default)]
    pub coupon: String,
    pub method: PaymentMethod,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

impl CheckoutRequest {
    pub fn customer(&self) -> CustomerInfo {
        CustomerInfo {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            address1: self.address1.clone(),
            city: self.city.clone(),
            postal_code: self.postal_code.clone(),
            country: if self.country.is_empty() {
                "US".to_string()
            } else {
                self.country.clone()
            },
            password: self.password.clone(),
            existing_user: self.existing_user,
            agree_terms: self.terms,
        }
    }

    /// Card details for card-method rows; the cardholder name defaults to
    /// the billing name.
    pub fn card_details(&self) -> Option<CardDetails> {
        match self.method {
            PaymentMethod::Card => Some(CardDetails {
                card_number: self.card_number.clone(),
                expiry: self.expiry.clone(),
                cvv: self.cvv.clone(),
                name_on_card: format!("{} {}", self.first_name, self.last_name),
            }),
            PaymentMethod::Wallet => None,
        }
    }
}

/// Streams checkout requests from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record
/// lengths, yielding `Result<CheckoutRequest>` lazily so large batches
/// never load into memory at once.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<CheckoutRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
