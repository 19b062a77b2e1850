use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let database_url = lookup("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());
    let env = parse_environment(&or_default("ESTRELLA_ENV", "development"))?;
    let log_level = or_default("ESTRELLA_LOG_LEVEL", "info");

    let seed_csv_path = PathBuf::from(or_default("ESTRELLA_SEED_CSV", "sampled_products.csv"));
    let expanded_csv_path =
        PathBuf::from(or_default("ESTRELLA_EXPANDED_CSV", "csv_expandido.csv"));

    let sample_rows: usize = parse_var(
        &or_default("ESTRELLA_SAMPLE_ROWS", "10000"),
        "ESTRELLA_SAMPLE_ROWS",
    )?;
    let sample_year: i32 = parse_var(
        &or_default("ESTRELLA_SAMPLE_YEAR", "2024"),
        "ESTRELLA_SAMPLE_YEAR",
    )?;
    let rng_seed = match lookup("ESTRELLA_RNG_SEED") {
        Ok(raw) if !raw.trim().is_empty() => Some(parse_var::<u64>(&raw, "ESTRELLA_RNG_SEED")?),
        _ => None,
    };

    let db_max_connections: u32 = parse_var(
        &or_default("ESTRELLA_DB_MAX_CONNECTIONS", "5"),
        "ESTRELLA_DB_MAX_CONNECTIONS",
    )?;
    let db_min_connections: u32 = parse_var(
        &or_default("ESTRELLA_DB_MIN_CONNECTIONS", "1"),
        "ESTRELLA_DB_MIN_CONNECTIONS",
    )?;
    let db_acquire_timeout_secs: u64 = parse_var(
        &or_default("ESTRELLA_DB_ACQUIRE_TIMEOUT_SECS", "10"),
        "ESTRELLA_DB_ACQUIRE_TIMEOUT_SECS",
    )?;
    let db_insert_batch_rows: usize = parse_var(
        &or_default("ESTRELLA_DB_INSERT_BATCH_ROWS", "1000"),
        "ESTRELLA_DB_INSERT_BATCH_ROWS",
    )?;
    if db_insert_batch_rows == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ESTRELLA_DB_INSERT_BATCH_ROWS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        seed_csv_path,
        expanded_csv_path,
        sample_rows,
        sample_year,
        rng_seed,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        db_insert_batch_rows,
    })
}

fn parse_var<T>(raw: &str, var: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ESTRELLA_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
