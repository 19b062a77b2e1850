pub mod app_config;
pub mod columns;
pub mod config;
pub mod star;

pub use app_config::{AppConfig, Environment};
pub use columns::{translate_column, COLUMN_MAPPING};
pub use config::{load_app_config, load_app_config_from_env};
pub use star::{
    Brand, CalendarDay, Category, Keyed, Product, ProductFact, Rating, StarSchema, TABLE_NAMES,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
