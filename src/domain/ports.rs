use crate::domain::model::{CalculationRecord, StoredCalculation, UserCredential};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Login gate. Callers only ever see the boolean.
pub trait CredentialVerifier: Send + Sync {
    fn validate(&self, username: &str, password: &str) -> bool;
}

/// Append-only store of calculation attempts.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts one row and returns its id.
    async fn save(&self, record: &CalculationRecord) -> Result<i64>;

    /// All rows saved for `username`, newest first.
    async fn history(&self, username: &str) -> Result<Vec<StoredCalculation>>;
}

pub trait ConfigProvider: Send + Sync {
    fn database_path(&self) -> &str;
    fn credential(&self) -> UserCredential;
    fn auth_source(&self) -> &str;
}

impl<T: CredentialVerifier + ?Sized> CredentialVerifier for Arc<T> {
    fn validate(&self, username: &str, password: &str) -> bool {
        (**self).validate(username, password)
    }
}

/// Lets one store instance be shared, or chosen at runtime behind `Arc<dyn RecordStore>`.
#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn save(&self, record: &CalculationRecord) -> Result<i64> {
        (**self).save(record).await
    }

    async fn history(&self, username: &str) -> Result<Vec<StoredCalculation>> {
        (**self).history(username).await
    }
}
