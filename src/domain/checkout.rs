use crate::domain::coupon::{self, Coupon};
use crate::domain::currency::Currency;
use crate::domain::customer::CustomerInfo;
use crate::domain::money::Amount;
use crate::domain::plan::{Plan, PlanId};
use crate::domain::validation::{FieldError, ValidationErrors};
use rust_decimal::Decimal;
use serde::Serialize;

/// The wizard's linear steps. Forward movement past `Billing` is gated on
/// validation; backward movement never re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    PlanReview,
    Billing,
    Payment,
}

/// Price breakdown shown on the order summary. All values are USD base
/// amounts; `display_total` applies the selected display currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub plan_name: String,
    pub base_price: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub coupon: Option<String>,
    pub display_total: String,
}

/// The checkout wizard: `PlanReview -> Billing -> Payment`, collecting
/// customer data and an optional coupon along the way. Terminal success
/// and error states are reached through the engine, not the wizard.
#[derive(Debug, Clone)]
pub struct CheckoutWizard {
    plan: Plan,
    currency: Currency,
    step: Step,
    pub customer: CustomerInfo,
    coupon: Option<Coupon>,
}

impl CheckoutWizard {
    /// Starts a wizard at the plan-review step. Unknown plan ids are
    /// rejected before any wizard exists.
    pub fn new(plan: &str, currency: Currency) -> crate::error::Result<Self> {
        let id: PlanId = plan.parse()?;
        Ok(Self {
            plan: Plan::get(id),
            currency,
            step: Step::PlanReview,
            customer: CustomerInfo::default(),
            coupon: None,
        })
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Moves one step forward. Leaving `Billing` requires every mandatory
    /// field; on failure the wizard stays put and the errors name the
    /// offending fields. `Payment` has no forward step.
    pub fn advance(&mut self) -> Result<Step, ValidationErrors> {
        match self.step {
            Step::PlanReview => {
                self.step = Step::Billing;
            }
            Step::Billing => {
                let errors = self.customer.validate_billing();
                if !errors.is_empty() {
                    return Err(ValidationErrors(errors));
                }
                self.step = Step::Payment;
            }
            Step::Payment => {}
        }
        Ok(self.step)
    }

    /// Re-enters the previous step without re-validating anything.
    pub fn back(&mut self) -> Step {
        self.step = match self.step {
            Step::PlanReview | Step::Billing => Step::PlanReview,
            Step::Payment => Step::Billing,
        };
        self.step
    }

    /// Case-insensitive lookup against the fixed coupon table. An unknown
    /// code surfaces a field-level error and changes nothing.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Coupon, FieldError> {
        match coupon::lookup(code) {
            Some(coupon) => {
                self.coupon = Some(coupon.clone());
                Ok(coupon)
            }
            None => Err(FieldError::new("coupon", "Invalid coupon code")),
        }
    }

    /// Removes an applied coupon, restoring the base plan price.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// Discount in USD: `round2(price * pct / 100)`, zero without a coupon.
    pub fn discount(&self) -> Amount {
        match &self.coupon {
            Some(coupon) => self.plan.usd_price.percent(coupon.percent),
            None => Amount::ZERO,
        }
    }

    /// Final USD price after discount.
    pub fn total(&self) -> Amount {
        self.plan.usd_price - self.discount()
    }

    pub fn summary(&self) -> OrderSummary {
        let total = self.total();
        OrderSummary {
            plan_name: self.plan.name.clone(),
            base_price: self.plan.usd_price.value(),
            discount: self.discount().value(),
            total: total.value(),
            coupon: self.coupon.as_ref().map(|c| c.code.clone()),
            display_total: self.currency.format(total.value()),
        }
    }
}
