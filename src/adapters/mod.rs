// Adapters layer: concrete implementations of the domain ports.

pub mod credentials;
pub mod sqlite_store;
pub mod unavailable_store;

pub use credentials::StaticCredentialVerifier;
pub use sqlite_store::{DatabaseCredentialVerifier, SqliteRecordStore};
pub use unavailable_store::UnavailableStore;
