use crate::core::tax;
use crate::core::{
    CalculationRecord, CredentialVerifier, RecordStore, StoredCalculation, SubmissionOutcome,
    TaxCalculationRequest, TaxCalculationResult,
};
use crate::utils::error::{Result, TaxError};
use crate::utils::validation::parse_amount;

/// Proof that the credential gate was passed. Only `CalculatorSession::login`
/// hands these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: String,
}

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.username
    }
}

pub struct CalculatorSession<V: CredentialVerifier, S: RecordStore> {
    verifier: V,
    store: S,
}

impl<V: CredentialVerifier, S: RecordStore> CalculatorSession<V, S> {
    pub fn new(verifier: V, store: S) -> Self {
        Self { verifier, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser> {
        if self.verifier.validate(username, password) {
            tracing::info!("User '{}' logged in", username);
            Ok(AuthenticatedUser {
                username: username.to_string(),
            })
        } else {
            tracing::warn!("Rejected login for user '{}'", username);
            Err(TaxError::InvalidCredentials {
                username: username.to_string(),
            })
        }
    }

    /// Parses both fields before anything else happens, so a bad value never
    /// reaches the store.
    pub async fn submit(
        &self,
        user: &AuthenticatedUser,
        income: &str,
        deductions: &str,
    ) -> Result<SubmissionOutcome> {
        let request = TaxCalculationRequest {
            income: parse_amount("income", income)?,
            deductions: parse_amount("deductions", deductions)?,
        };
        Ok(self.calculate(user, request).await)
    }

    /// Evaluate then persist. A failed save is logged and reflected in
    /// `record_id`, never returned as an error.
    pub async fn calculate(
        &self,
        user: &AuthenticatedUser,
        request: TaxCalculationRequest,
    ) -> SubmissionOutcome {
        let taxable_income = tax::taxable_income(request.income, request.deductions);
        let result =
            TaxCalculationResult::pending(tax::compute_tax(request.income, request.deductions));

        tracing::debug!(
            "Calculated tax {} on taxable income {} for '{}'",
            result.tax_amount,
            taxable_income,
            user.username
        );

        let record = CalculationRecord {
            username: user.username.clone(),
            request,
            result,
        };

        let record_id = match self.store.save(&record).await {
            Ok(id) => {
                tracing::info!("Tax record {} saved for '{}'", id, user.username);
                Some(id)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to save tax record for '{}': {} (Category: {:?})",
                    user.username,
                    e,
                    e.category()
                );
                None
            }
        };

        SubmissionOutcome {
            request,
            taxable_income,
            result,
            record_id,
        }
    }

    pub async fn history(&self, user: &AuthenticatedUser) -> Result<Vec<StoredCalculation>> {
        self.store.history(&user.username).await
    }
}
