use crate::domain::money::round2;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Static USD to CAD exchange rate. In a real deployment this would come
/// from a rates service.
pub const USD_TO_CAD_RATE: Decimal = dec!(1.35);

/// Display currency preference. Catalog prices are always stored in USD;
/// CAD is a presentation-time conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    #[default]
    Cad,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Cad => "C$",
        }
    }

    /// Converts a USD base price into this currency, rounded to 2 decimals.
    pub fn convert(&self, usd_price: Decimal) -> Decimal {
        match self {
            Currency::Usd => usd_price,
            Currency::Cad => round2(usd_price * USD_TO_CAD_RATE),
        }
    }

    /// Formats a USD base price for display in this currency. Whole
    /// amounts drop their decimals ("$0", "C$27").
    pub fn format(&self, usd_price: Decimal) -> String {
        let converted = self.convert(usd_price);
        if converted == converted.trunc() {
            format!("{}{}", self.symbol(), converted.normalize())
        } else {
            format!("{}{:.2}", self.symbol(), converted)
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "cad" => Ok(Currency::Cad),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}
