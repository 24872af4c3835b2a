use crate::domain::customer::CustomerInfo;
use crate::domain::payment::PaymentReceipt;
use crate::domain::plan::Plan;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Generates a merchant order reference. Also used as the reference id on
/// failure records.
pub fn order_reference() -> String {
    format!("HZP-{}", Utc::now().timestamp_millis())
}

/// The single record produced on payment success. Write-once: handed to
/// the confirmation view through the transient hand-off store and never
/// persisted server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub plan: Plan,
    pub customer: CustomerInfo,
    pub payment: PaymentReceipt,
    pub total: Decimal,
    pub discount: Decimal,
    pub coupon: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// The single record produced on payment failure, normalized from any
/// provider error. Handed to the error view the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentFailure {
    pub message: String,
    pub reference: String,
    pub timestamp: DateTime<Utc>,
}

impl PaymentFailure {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reference: order_reference(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_reference_prefix() {
        let reference = order_reference();
        assert!(reference.starts_with("HZP-"));
        assert!(reference["HZP-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_failure_record_carries_reference_and_timestamp() {
        let failure = PaymentFailure::now("Payment was cancelled by user");
        assert!(failure.reference.starts_with("HZP-"));
        assert_eq!(failure.message, "Payment was cancelled by user");
    }
}
