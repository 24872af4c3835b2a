use crate::domain::validation::FieldError;
use serde::{Deserialize, Serialize};

/// Customer and billing details collected on the billing step.
///
/// Every field is an owned string mirroring raw form input; validation
/// happens at the step gate, not on mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub address1: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
    /// Required for new customers only.
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub existing_user: bool,
    #[serde(default)]
    pub agree_terms: bool,
}

fn default_country() -> String {
    "US".to_string()
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            address1: String::new(),
            city: String::new(),
            postal_code: String::new(),
            country: default_country(),
            password: String::new(),
            existing_user: false,
            agree_terms: false,
        }
    }
}

impl CustomerInfo {
    /// Validates the mandatory billing fields. Returns one error per
    /// offending field; an empty vec means the billing step may advance.
    pub fn validate_billing(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        }
        if self.first_name.trim().is_empty() {
            errors.push(FieldError::new("first_name", "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError::new("last_name", "Last name is required"));
        }
        if self.address1.trim().is_empty() {
            errors.push(FieldError::new("address1", "Address is required"));
        }
        if self.city.trim().is_empty() {
            errors.push(FieldError::new("city", "City is required"));
        }
        if self.postal_code.trim().is_empty() {
            errors.push(FieldError::new("postal_code", "Postal code is required"));
        }
        if !self.agree_terms {
            errors.push(FieldError::new(
                "agree_terms",
                "You must agree to the terms",
            ));
        }
        if !self.existing_user && self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        errors
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
