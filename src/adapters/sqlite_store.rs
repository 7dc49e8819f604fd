use crate::core::{
    CalculationRecord, CalculationStatus, CredentialVerifier, RecordStore, StoredCalculation,
    UserCredential,
};
use crate::utils::error::{Result, TaxError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// SQLite-backed store for the `Users` and `TaxCalculations` tables.
pub struct SqliteRecordStore {
    db: Mutex<Connection>,
}

impl SqliteRecordStore {
    const SCHEMA: &'static str = r"
        CREATE TABLE IF NOT EXISTS Users (
            Username TEXT PRIMARY KEY,
            Password TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS TaxCalculations (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            Username TEXT REFERENCES Users(Username),
            Income REAL,
            Deductions REAL,
            TaxAmount REAL,
            Status TEXT NOT NULL DEFAULT 'Pending',
            CalculationDate TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_tax_calculations_username
        ON TaxCalculations(Username);
    ";

    /// Open or create the database file. Tables are created by `initialize`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Connection::open(path)?;
        tracing::debug!("Opened database at {}", path.display());
        Self::configure(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory()?;
        Self::configure(db)
    }

    fn configure(db: Connection) -> Result<Self> {
        db.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { db: Mutex::new(db) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| TaxError::StoreUnavailable {
            message: "database connection lock poisoned".to_string(),
        })
    }

    /// Create both tables if absent and make sure `seed` exists in `Users`
    /// with its current password. Safe to call on every startup.
    pub fn initialize(&self, seed: &UserCredential) -> Result<()> {
        let db = self.conn()?;
        db.execute_batch(Self::SCHEMA)?;

        let existing: Option<String> = db
            .query_row(
                "SELECT Password FROM Users WHERE Username = ?1",
                params![seed.username],
                |row| row.get(0),
            )
            .optional()?;

        match existing {
            None => {
                db.execute(
                    "INSERT INTO Users (Username, Password) VALUES (?1, ?2)",
                    params![seed.username, seed.password],
                )?;
                tracing::info!("Default user '{}' created", seed.username);
            }
            Some(stored) if stored != seed.password => {
                db.execute(
                    "UPDATE Users SET Password = ?2 WHERE Username = ?1",
                    params![seed.username, seed.password],
                )?;
                tracing::info!("Password for user '{}' updated from config", seed.username);
            }
            Some(_) => tracing::debug!("Default user '{}' already present", seed.username),
        }

        tracing::info!("Database schema verified");
        Ok(())
    }

    pub fn user_count(&self) -> Result<i64> {
        let db = self.conn()?;
        let count = db.query_row("SELECT COUNT(*) FROM Users", [], |row| row.get(0))?;
        Ok(count)
    }

    fn stored_calculation(row: &Row<'_>) -> rusqlite::Result<StoredCalculation> {
        let status: String = row.get(5)?;
        let status = CalculationStatus::parse(&status).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("unknown calculation status '{}'", status).into(),
            )
        })?;

        let calculated_at: String = row.get(6)?;
        let calculated_at = NaiveDateTime::parse_from_str(&calculated_at, SQLITE_TIMESTAMP_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

        Ok(StoredCalculation {
            id: row.get(0)?,
            username: row.get(1)?,
            income: row.get(2)?,
            deductions: row.get(3)?,
            tax_amount: row.get(4)?,
            status,
            calculated_at,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn save(&self, record: &CalculationRecord) -> Result<i64> {
        let db = self.conn()?;
        db.execute(
            "INSERT INTO TaxCalculations (Username, Income, Deductions, TaxAmount, Status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.username,
                record.request.income,
                record.request.deductions,
                record.result.tax_amount,
                record.result.status.as_str(),
            ],
        )?;
        Ok(db.last_insert_rowid())
    }

    async fn history(&self, username: &str) -> Result<Vec<StoredCalculation>> {
        let db = self.conn()?;
        let mut stmt = db.prepare(
            "SELECT ID, Username, Income, Deductions, TaxAmount, Status, CalculationDate
             FROM TaxCalculations
             WHERE Username = ?1
             ORDER BY ID DESC",
        )?;

        let rows = stmt.query_map(params![username], Self::stored_calculation)?;
        let mut calculations = Vec::new();
        for row in rows {
            calculations.push(row?);
        }
        Ok(calculations)
    }
}

/// Checks logins against the `Users` table, but only for the configured
/// username. Older rows stay in `Users` for their history and cannot log in.
pub struct DatabaseCredentialVerifier {
    store: Arc<SqliteRecordStore>,
    username: String,
}

impl DatabaseCredentialVerifier {
    pub fn new(store: Arc<SqliteRecordStore>, username: impl Into<String>) -> Self {
        Self {
            store,
            username: username.into(),
        }
    }
}

impl CredentialVerifier for DatabaseCredentialVerifier {
    fn validate(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }

        let Ok(db) = self.store.conn() else {
            return false;
        };

        let stored: rusqlite::Result<Option<String>> = db
            .query_row(
                "SELECT Password FROM Users WHERE Username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional();

        match stored {
            Ok(Some(stored)) => stored == password,
            Ok(None) => false,
            Err(e) => {
                tracing::error!("Credential lookup failed: {}", e);
                false
            }
        }
    }
}
