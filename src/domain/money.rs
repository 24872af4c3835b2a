use crate::error::CheckoutError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// Rounds a monetary value to 2 decimal places, midpoint away from zero.
///
/// All displayed prices, discounts, and totals go through this so that
/// a 20% coupon on $9.99 is pinned to a $2.00 discount.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A non-negative monetary amount.
///
/// Wrapper around `rust_decimal::Decimal` to enforce domain rules and
/// provide type safety for price calculations. Zero is allowed because
/// the Basic plan is free.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, CheckoutError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(CheckoutError::InvalidAmount(
                "Amount must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The given percentage of this amount, rounded to 2 decimals.
    pub fn percent(&self, pct: u8) -> Amount {
        Self(round2(self.0 * Decimal::from(pct) / dec!(100)))
    }

    /// The amount expressed in minor units (cents), the convention used
    /// by the hosted-card provider. Saturates on overflow.
    pub fn minor_units(&self) -> i64 {
        (self.0 * dec!(100)).round().to_i64().unwrap_or(i64::MAX)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = CheckoutError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Sub for Amount {
    type Output = Self;

    // Clamped at zero so a discount can never drive a total negative.
    fn sub(self, rhs: Self) -> Self::Output {
        Self((self.0 - rhs.0).max(Decimal::ZERO))
    }
}
