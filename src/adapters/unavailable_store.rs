use crate::core::{CalculationRecord, RecordStore, StoredCalculation};
use crate::utils::error::{Result, TaxError};
use async_trait::async_trait;

/// Stand-in used when the database could not be opened at startup.
/// Calculations still run; every save and lookup reports the original cause.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> TaxError {
        TaxError::StoreUnavailable {
            message: self.reason.clone(),
        }
    }
}

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn save(&self, _record: &CalculationRecord) -> Result<i64> {
        Err(self.error())
    }

    async fn history(&self, _username: &str) -> Result<Vec<StoredCalculation>> {
        Err(self.error())
    }
}
