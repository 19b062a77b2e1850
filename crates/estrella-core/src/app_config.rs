use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Only required by commands that touch the database.
    pub database_url: Option<String>,
    pub env: Environment,
    pub log_level: String,
    /// Seed sample read by the expander.
    pub seed_csv_path: PathBuf,
    /// Expander output, and the star-schema builder's input.
    pub expanded_csv_path: PathBuf,
    pub sample_rows: usize,
    pub sample_year: i32,
    pub rng_seed: Option<u64>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub db_insert_batch_rows: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("seed_csv_path", &self.seed_csv_path)
            .field("expanded_csv_path", &self.expanded_csv_path)
            .field("sample_rows", &self.sample_rows)
            .field("sample_year", &self.sample_year)
            .field("rng_seed", &self.rng_seed)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("db_insert_batch_rows", &self.db_insert_batch_rows)
            .finish()
    }
}
