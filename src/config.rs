//! Runtime configuration, loaded once from the environment at process
//! start and passed into the core by reference.

use config::{Config as ConfigSource, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database_url: String,
    pub page_max_limit: i64,
    pub default_page_limit: i64,
    pub default_currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        ConfigSource::builder()
            .add_source(Environment::with_prefix("ACCOUNTING_KERNEL"))
            .set_override("database_url", "postgresql://localhost/accounting_kernel")?
            .set_override("page_max_limit", 100)?
            .set_override("default_page_limit", 10)?
            .set_override("default_currency", "USD")?
            .build()?
            .try_deserialize()
    }
}
