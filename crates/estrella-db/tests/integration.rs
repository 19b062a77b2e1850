//! Offline tests for estrella-db pool configuration and DDL.
//! These tests do not require a live database connection.

use estrella_core::{AppConfig, Environment, TABLE_NAMES};
use estrella_db::schema::{CREATE_STATEMENTS, DROP_STATEMENTS};
use estrella_db::{connect_pool_from_app_config, DbError, PoolConfig};
use std::path::PathBuf;

fn app_config(database_url: Option<&str>) -> AppConfig {
    AppConfig {
        database_url: database_url.map(str::to_string),
        env: Environment::Test,
        log_level: "info".to_string(),
        seed_csv_path: PathBuf::from("sampled_products.csv"),
        expanded_csv_path: PathBuf::from("csv_expandido.csv"),
        sample_rows: 10_000,
        sample_year: 2024,
        rng_seed: None,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        db_insert_batch_rows: 1_000,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config(Some("postgres://example")));
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn connecting_without_database_url_fails_before_any_io() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let err = runtime
        .block_on(connect_pool_from_app_config(&app_config(None)))
        .unwrap_err();
    assert!(matches!(err, DbError::MissingDatabaseUrl));
    assert_eq!(err.to_string(), "DATABASE_URL is not set");
}

#[test]
fn ddl_covers_every_star_schema_table() {
    for name in TABLE_NAMES {
        assert!(DROP_STATEMENTS.iter().any(|s| s.contains(name)));
        assert!(CREATE_STATEMENTS.iter().any(|s| s.contains(name)));
    }
}

#[test]
fn fact_table_references_all_five_dimensions() {
    let fact = CREATE_STATEMENTS
        .iter()
        .find(|s| s.starts_with("CREATE TABLE hechos_productos"))
        .expect("fact DDL");
    for dim in &TABLE_NAMES[..5] {
        assert!(fact.contains(&format!("REFERENCES {dim} (")), "no FK to {dim}");
    }
}
