pub mod session;
pub mod tax;

pub use crate::domain::model::{
    CalculationRecord, CalculationStatus, StoredCalculation, SubmissionOutcome,
    TaxCalculationRequest, TaxCalculationResult, UserCredential,
};
pub use crate::domain::ports::{ConfigProvider, CredentialVerifier, RecordStore};
pub use crate::utils::error::Result;
