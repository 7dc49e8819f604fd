use std::sync::Arc;
use taxdesk::adapters::DatabaseCredentialVerifier;
use taxdesk::core::{
    CalculationRecord, CalculationStatus, CredentialVerifier, RecordStore, TaxCalculationRequest,
    TaxCalculationResult, UserCredential,
};
use taxdesk::SqliteRecordStore;
use tempfile::TempDir;

fn seed() -> UserCredential {
    UserCredential::new("admin", "admin123")
}

fn record(username: &str, income: f64, deductions: f64) -> CalculationRecord {
    CalculationRecord {
        username: username.to_string(),
        request: TaxCalculationRequest { income, deductions },
        result: TaxCalculationResult::pending(taxdesk::compute_tax(income, deductions)),
    }
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("tax.sqlite");

    {
        let store = SqliteRecordStore::open(&db_path).unwrap();
        store.initialize(&seed()).unwrap();
        store.save(&record("admin", 300_000.0, 0.0)).await.unwrap();
        store.save(&record("admin", 700_000.0, 100_000.0)).await.unwrap();
    }

    let store = SqliteRecordStore::open(&db_path).unwrap();
    store.initialize(&seed()).unwrap();
    assert_eq!(store.user_count().unwrap(), 1);

    let history = store.history("admin").await.unwrap();
    assert_eq!(history.len(), 2);

    // newest first
    assert!(history[0].id > history[1].id);
    assert_eq!(history[0].income, 700_000.0);
    assert_eq!(history[0].deductions, 100_000.0);
    assert!((history[0].tax_amount - 32_500.0).abs() < 1e-6);
    assert!((history[1].tax_amount - 2_500.0).abs() < 1e-6);

    for row in &history {
        assert_eq!(row.username, "admin");
        assert_eq!(row.status, CalculationStatus::Pending);
    }
}

#[tokio::test]
async fn test_calculation_date_defaults_to_now() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    store.initialize(&seed()).unwrap();

    let before = chrono::Utc::now().naive_utc() - chrono::Duration::seconds(5);
    store.save(&record("admin", 1_200_000.0, 0.0)).await.unwrap();
    let after = chrono::Utc::now().naive_utc() + chrono::Duration::seconds(5);

    let history = store.history("admin").await.unwrap();
    let saved_at = history[0].calculated_at;
    assert!(saved_at >= before && saved_at <= after, "{}", saved_at);
}

#[tokio::test]
async fn test_history_is_scoped_to_user() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    store.initialize(&seed()).unwrap();
    store
        .initialize(&UserCredential::new("clerk", "pw"))
        .unwrap();

    store.save(&record("admin", 300_000.0, 0.0)).await.unwrap();
    store.save(&record("clerk", 600_000.0, 0.0)).await.unwrap();
    store.save(&record("clerk", 900_000.0, 0.0)).await.unwrap();

    assert_eq!(store.history("admin").await.unwrap().len(), 1);
    assert_eq!(store.history("clerk").await.unwrap().len(), 2);
    assert!(store.history("nobody").await.unwrap().is_empty());
}

#[test]
fn test_reseed_with_new_password_replaces_old_one() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    store.initialize(&seed()).unwrap();
    store
        .initialize(&UserCredential::new("admin", "changed"))
        .unwrap();
    assert_eq!(store.user_count().unwrap(), 1);

    let verifier = DatabaseCredentialVerifier::new(Arc::new(store), "admin");
    assert!(verifier.validate("admin", "changed"));
    assert!(!verifier.validate("admin", "admin123"));
}
