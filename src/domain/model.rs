use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculationRequest {
    pub income: f64,
    pub deductions: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationStatus {
    Pending,
}

impl CalculationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationStatus::Pending => "Pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(CalculationStatus::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for CalculationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Created once per request and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub tax_amount: f64,
    pub status: CalculationStatus,
}

impl TaxCalculationResult {
    pub fn pending(tax_amount: f64) -> Self {
        Self {
            tax_amount,
            status: CalculationStatus::Pending,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
}

impl UserCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRecord {
    pub username: String,
    pub request: TaxCalculationRequest,
    pub result: TaxCalculationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCalculation {
    pub id: i64,
    pub username: String,
    pub income: f64,
    pub deductions: f64,
    pub tax_amount: f64,
    pub status: CalculationStatus,
    pub calculated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub request: TaxCalculationRequest,
    pub taxable_income: f64,
    pub result: TaxCalculationResult,
    /// `None` when the record store rejected the save.
    pub record_id: Option<i64>,
}

impl SubmissionOutcome {
    pub fn is_saved(&self) -> bool {
        self.record_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_hides_password() {
        let credential = UserCredential::new("admin", "admin123");
        let debug = format!("{:?}", credential);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("admin123"));
    }

    #[test]
    fn test_status_text_round_trips_through_storage_form() {
        let status = CalculationStatus::Pending;
        assert_eq!(CalculationStatus::parse(status.as_str()), Some(status));
        assert_eq!(CalculationStatus::parse("Approved"), None);
    }
}
