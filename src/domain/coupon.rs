use serde::{Deserialize, Serialize};

/// The fixed table of valid discount codes. Not sourced from any
/// external service.
pub const COUPON_TABLE: [(&str, u8); 4] = [
    ("WELCOME20", 20),
    ("STUDENT50", 50),
    ("TEACHER30", 30),
    ("SAVE10", 10),
];

/// A discount code mapped to a percentage reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Canonical (uppercase) form of the code.
    pub code: String,
    pub percent: u8,
}

/// Case-insensitive lookup against the fixed coupon table. Unknown codes
/// yield `None`.
pub fn lookup(code: &str) -> Option<Coupon> {
    let canonical = code.trim().to_ascii_uppercase();
    COUPON_TABLE
        .iter()
        .find(|(known, _)| *known == canonical)
        .map(|(known, percent)| Coupon {
            code: (*known).to_string(),
            percent: *percent,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let coupon = lookup("welcome20").unwrap();
        assert_eq!(coupon.code, "WELCOME20");
        assert_eq!(coupon.percent, 20);

        assert_eq!(lookup(" Student50 ").unwrap().percent, 50);
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        assert!(lookup("FAKE10").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_all_known_codes() {
        for (code, percent) in COUPON_TABLE {
            assert_eq!(lookup(code).unwrap().percent, percent);
        }
    }
}
