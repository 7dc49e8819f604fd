pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::Cli;

pub use crate::adapters::{SqliteRecordStore, StaticCredentialVerifier, UnavailableStore};
pub use crate::app::{build_session, InteractiveShell};
pub use crate::config::AppConfig;
pub use crate::core::{session::CalculatorSession, tax::compute_tax};
pub use crate::utils::error::{Result, TaxError};
