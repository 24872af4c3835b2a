use crate::domain::checkout::{CheckoutWizard, Step};
use crate::domain::order::{Order, PaymentFailure, order_reference};
use crate::domain::payment::{
    CardDetails, ChargeRequest, PaymentMethod, PaymentReceipt, PayerIdentity,
};
use crate::domain::ports::{HandoffStoreBox, PaymentProviderBox};
use crate::domain::validation::{FieldError, ValidationErrors};
use crate::error::Result;
use chrono::Utc;

const ORDER_DESCRIPTION: &str = "Horizon Plays Subscription";

/// Terminal outcome of a checkout. Provider failures are not `Err`: they
/// are normalized into a failure record and reported here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Payment succeeded; carries the order id written to the hand-off slot.
    Confirmed(String),
    /// Payment failed; carries the failure reference id.
    Failed(String),
}

/// Terminates checkout wizards.
///
/// Owns both provider integrations and the hand-off store. Exactly one of
/// the two providers is dispatched per completion, chosen by the selected
/// payment method; every completion writes exactly one hand-off record.
pub struct CheckoutEngine {
    card: PaymentProviderBox,
    wallet: PaymentProviderBox,
    handoff: HandoffStoreBox,
}

impl CheckoutEngine {
    pub fn new(
        card: PaymentProviderBox,
        wallet: PaymentProviderBox,
        handoff: HandoffStoreBox,
    ) -> Self {
        Self {
            card,
            wallet,
            handoff,
        }
    }

    /// Completes a wizard sitting on the payment step.
    ///
    /// Card payments require complete card details; their absence is a
    /// validation error, not a provider failure. Once dispatched there is
    /// no retry and no cancellation from this side.
    pub async fn complete(
        &self,
        wizard: &CheckoutWizard,
        method: PaymentMethod,
        card_details: Option<CardDetails>,
    ) -> Result<CheckoutOutcome> {
        if wizard.step() != Step::Payment {
            return Err(ValidationErrors(vec![FieldError::new(
                "step",
                "Checkout has not reached the payment step",
            )])
            .into());
        }

        let card_details = match method {
            PaymentMethod::Card => {
                let details = card_details.unwrap_or_default();
                let errors = details.validate();
                if !errors.is_empty() {
                    return Err(ValidationErrors(errors).into());
                }
                Some(details)
            }
            PaymentMethod::Wallet => None,
        };

        let total = wizard.total();
        let reference = order_reference();

        let charged = if total.is_zero() {
            // Free plans and 100%-off coupons never reach a provider.
            Ok(PaymentReceipt::NoCharge {
                currency: wizard.currency(),
            })
        } else {
            let request = ChargeRequest {
                amount: total,
                currency: wizard.currency(),
                payer: PayerIdentity {
                    email: wizard.customer.email.clone(),
                    first_name: wizard.customer.first_name.clone(),
                    last_name: wizard.customer.last_name.clone(),
                    phone: (!wizard.customer.phone.is_empty())
                        .then(|| wizard.customer.phone.clone()),
                },
                card: card_details,
                description: ORDER_DESCRIPTION.to_string(),
                reference: reference.clone(),
            };
            let provider = match method {
                PaymentMethod::Card => &self.card,
                PaymentMethod::Wallet => &self.wallet,
            };
            tracing::debug!(%reference, total = %total.value(), ?method, "dispatching payment");
            provider.charge(request).await
        };

        match charged {
            Ok(receipt) => {
                let order = Order {
                    order_id: reference.clone(),
                    plan: wizard.plan().clone(),
                    customer: wizard.customer.clone(),
                    payment: receipt,
                    total: total.value(),
                    discount: wizard.discount().value(),
                    coupon: wizard.coupon().map(|c| c.code.clone()),
                    timestamp: Utc::now(),
                };
                self.handoff.put_order(order).await?;
                tracing::info!(order_id = %reference, "order confirmed");
                Ok(CheckoutOutcome::Confirmed(reference))
            }
            Err(provider_error) => {
                let failure = PaymentFailure::now(provider_error.to_string());
                let failure_reference = failure.reference.clone();
                self.handoff.put_failure(failure).await?;
                tracing::warn!(reference = %failure_reference, error = %provider_error, "payment failed");
                Ok(CheckoutOutcome::Failed(failure_reference))
            }
        }
    }
}
