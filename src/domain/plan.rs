use crate::domain::money::Amount;
use crate::error::CheckoutError;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four subscription tiers. Immutable reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Basic,
    Advanced,
    Academic,
    Commercial,
}

impl PlanId {
    pub const ALL: [PlanId; 4] = [
        PlanId::Basic,
        PlanId::Advanced,
        PlanId::Academic,
        PlanId::Commercial,
    ];
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanId::Basic => "basic",
            PlanId::Advanced => "advanced",
            PlanId::Academic => "academic",
            PlanId::Commercial => "commercial",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanId {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(PlanId::Basic),
            "advanced" => Ok(PlanId::Advanced),
            "academic" => Ok(PlanId::Academic),
            "commercial" => Ok(PlanId::Commercial),
            other => Err(CheckoutError::UnknownPlan(other.to_string())),
        }
    }
}

/// A plan snapshot as carried through the wizard and into the order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub usd_price: Amount,
    pub period: String,
    pub description: String,
}

impl Plan {
    /// Looks up a plan in the fixed catalog.
    pub fn get(id: PlanId) -> Plan {
        let (name, price, period, description) = match id {
            PlanId::Basic => (
                "Basic",
                dec!(0),
                "forever",
                "Perfect for teachers getting started",
            ),
            PlanId::Advanced => (
                "Advanced",
                dec!(9.99),
                "per month",
                "For serious educators and trainers",
            ),
            PlanId::Academic => (
                "Academic",
                dec!(19.99),
                "per month",
                "Perfect for schools and institutions",
            ),
            PlanId::Commercial => (
                "Commercial",
                dec!(49.99),
                "per month",
                "For businesses and large organizations",
            ),
        };
        // Catalog prices are non-negative by construction.
        let usd_price = Amount::new(price).unwrap_or(Amount::ZERO);
        Plan {
            id,
            name: name.to_string(),
            usd_price,
            period: period.to_string(),
            description: description.to_string(),
        }
    }

    pub fn catalog() -> Vec<Plan> {
        PlanId::ALL.into_iter().map(Plan::get).collect()
    }
}
