use crate::domain::payment::{ChargeRequest, PaymentReceipt, ProviderError};
use crate::domain::ports::PaymentProvider;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Simulated redirect-wallet provider.
///
/// The real integration renders its own button and manages the
/// approve/capture exchange; here the whole round-trip collapses into one
/// call that either captures, errors, or reports a user cancellation.
pub struct WalletGateway {
    latency: Option<Duration>,
    fail_next: Arc<RwLock<bool>>,
    cancel_next: Arc<RwLock<bool>>,
}

impl WalletGateway {
    pub fn new() -> Self {
        Self {
            latency: None,
            fail_next: Arc::new(RwLock::new(false)),
            cancel_next: Arc::new(RwLock::new(false)),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Arms the next charge to fail at the provider.
    pub async fn set_fail_next(&self, fail: bool) {
        *self.fail_next.write().await = fail;
    }

    /// Arms the next charge to be abandoned by the payer.
    pub async fn set_cancel_next(&self, cancel: bool) {
        *self.cancel_next.write().await = cancel;
    }
}

impl Default for WalletGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProvider for WalletGateway {
    async fn charge(&self, request: ChargeRequest) -> Result<PaymentReceipt, ProviderError> {
        {
            let mut cancel = self.cancel_next.write().await;
            if *cancel {
                *cancel = false;
                return Err(ProviderError::Cancelled);
            }
        }
        {
            let mut fail = self.fail_next.write().await;
            if *fail {
                *fail = false;
                return Err(ProviderError::Network(
                    "wallet provider unreachable".to_string(),
                ));
            }
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        tracing::debug!(
            payer = %request.payer.email,
            reference = %request.reference,
            "wallet order approved and captured"
        );

        Ok(PaymentReceipt::Wallet {
            order_id: Uuid::new_v4().to_string(),
            payer_id: Uuid::new_v4().simple().to_string(),
            amount_minor: request.amount.minor_units(),
            currency: request.currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::currency::Currency;
    use crate::domain::money::Amount;
    use crate::domain::payment::PayerIdentity;
    use rust_decimal_macros::dec;

    fn request() -> ChargeRequest {
        ChargeRequest {
            amount: Amount::new(dec!(19.99)).unwrap(),
            currency: Currency::Usd,
            payer: PayerIdentity {
                email: "dean@uni.edu".to_string(),
                first_name: "Sam".to_string(),
                last_name: "Lee".to_string(),
                phone: Some("+1 555 0100".to_string()),
            },
            card: None,
            description: "Horizon Plays Subscription".to_string(),
            reference: "HZP-2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_capture_yields_wallet_receipt() {
        let gateway = WalletGateway::new();
        let receipt = gateway.charge(request()).await.unwrap();

        let PaymentReceipt::Wallet {
            order_id,
            payer_id,
            amount_minor,
            ..
        } = receipt
        else {
            panic!("expected a wallet receipt");
        };
        assert!(!order_id.is_empty());
        assert!(!payer_id.is_empty());
        assert_eq!(amount_minor, 1999);
    }

    #[tokio::test]
    async fn test_cancellation() {
        let gateway = WalletGateway::new();
        gateway.set_cancel_next(true).await;

        assert_eq!(
            gateway.charge(request()).await.unwrap_err(),
            ProviderError::Cancelled
        );
        // Single-shot arming.
        assert!(gateway.charge(request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_failure() {
        let gateway = WalletGateway::new();
        gateway.set_fail_next(true).await;
        assert!(matches!(
            gateway.charge(request()).await,
            Err(ProviderError::Network(_))
        ));
    }
}
