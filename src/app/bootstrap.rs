use crate::adapters::{
    DatabaseCredentialVerifier, SqliteRecordStore, StaticCredentialVerifier, UnavailableStore,
};
use crate::core::session::CalculatorSession;
use crate::core::{ConfigProvider, CredentialVerifier, RecordStore};
use crate::utils::error::{Result, TaxError};
use std::sync::Arc;

pub type DynSession = CalculatorSession<Arc<dyn CredentialVerifier>, Arc<dyn RecordStore>>;

fn open_store<C: ConfigProvider>(config: &C) -> Result<Arc<SqliteRecordStore>> {
    let store = SqliteRecordStore::open(config.database_path())?;
    store.initialize(&config.credential())?;
    Ok(Arc::new(store))
}

/// Wires verifier and store from configuration.
///
/// A database that cannot be opened or initialised is logged and replaced by
/// `UnavailableStore`, so calculations keep working without persistence. The
/// one exception is `auth.source = "database"`, where there is nothing to log
/// in against and the error is returned.
pub fn build_session<C: ConfigProvider>(config: &C) -> Result<DynSession> {
    let opened = open_store(config);

    let store: Arc<dyn RecordStore> = match &opened {
        Ok(store) => store.clone() as Arc<dyn RecordStore>,
        Err(e) => {
            tracing::error!(
                "Database initialization error: {} (continuing without persistence)",
                e
            );
            Arc::new(UnavailableStore::new(e.to_string()))
        }
    };

    let verifier: Arc<dyn CredentialVerifier> = match config.auth_source() {
        "database" => match opened {
            Ok(store) => Arc::new(DatabaseCredentialVerifier::new(
                store,
                config.credential().username,
            )),
            Err(e) => {
                return Err(TaxError::ConfigError {
                    message: format!(
                        "auth.source = \"database\" but the database is unavailable: {}",
                        e
                    ),
                });
            }
        },
        _ => Arc::new(StaticCredentialVerifier::new(config.credential())),
    };

    tracing::debug!("Using '{}' credential source", config.auth_source());
    Ok(CalculatorSession::new(verifier, store))
}
