use crate::domain::payment::{ChargeRequest, PaymentReceipt, ProviderError};
use crate::domain::ports::PaymentProvider;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The card number that always declines, mirroring the provider's
/// documented test card.
pub const DECLINE_CARD: &str = "4000000000000002";

/// Simulated hosted-card provider.
///
/// Tokenizes the card input into a payment-method reference and resolves
/// the charge as a payment intent, the way the real embedded element
/// does. Stores nothing beyond a charge counter; can be armed to fail for
/// exercising the error path.
pub struct CardGateway {
    latency: Option<Duration>,
    fail_next: Arc<RwLock<bool>>,
    charges: Arc<RwLock<u64>>,
}

impl CardGateway {
    pub fn new() -> Self {
        Self {
            latency: None,
            fail_next: Arc::new(RwLock::new(false)),
            charges: Arc::new(RwLock::new(0)),
        }
    }

    /// Adds a fixed delay per charge, standing in for the provider's
    /// network round-trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Arms the next charge to fail.
    pub async fn set_fail_next(&self, fail: bool) {
        *self.fail_next.write().await = fail;
    }

    pub async fn charge_count(&self) -> u64 {
        *self.charges.read().await
    }
}

impl Default for CardGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProvider for CardGateway {
    async fn charge(&self, request: ChargeRequest) -> Result<PaymentReceipt, ProviderError> {
        {
            let mut fail = self.fail_next.write().await;
            if *fail {
                *fail = false;
                return Err(ProviderError::Network(
                    "card processor unreachable".to_string(),
                ));
            }
        }

        let card = request
            .card
            .ok_or_else(|| ProviderError::Invalid("card details are required".to_string()))?;

        let digits: String = card.card_number.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 12 {
            return Err(ProviderError::Invalid("invalid card number".to_string()));
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if digits == DECLINE_CARD {
            return Err(ProviderError::Declined("Your card was declined".to_string()));
        }

        *self.charges.write().await += 1;
        tracing::debug!(payer = %request.payer.email, "card tokenized and charged");

        Ok(PaymentReceipt::Card {
            intent_id: format!("pi_{}", Uuid::new_v4().simple()),
            method_id: format!("pm_{}", Uuid::new_v4().simple()),
            amount_minor: request.amount.minor_units(),
            currency: request.currency,
        })
    }
}
