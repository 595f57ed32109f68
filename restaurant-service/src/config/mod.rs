use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_env_parsed, is_production};
use service_core::error::AppError;
use service_core::observability::{LogFormat, TracingSettings};
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub query: QueryConfig,
    pub tracing: TracingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Largest `limit` a caller may ask for.
    pub max_limit: i64,
    /// Limit applied by `/restaurants` when none is given.
    pub default_limit: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_limit: 1000,
            default_limit: 20,
        }
    }
}

impl RestaurantConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        let config = RestaurantConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("restaurants"), is_prod)?,
                collection: get_env(
                    "MONGODB_COLLECTION",
                    Some("restaurants_collection"),
                    is_prod,
                )?,
            },
            query: QueryConfig {
                max_limit: get_env_parsed("QUERY_MAX_LIMIT", Some("1000"), is_prod)?,
                default_limit: get_env_parsed("QUERY_DEFAULT_LIMIT", Some("20"), is_prod)?,
            },
            tracing: TracingSettings {
                log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
                log_format: get_env("LOG_FORMAT", Some("json"), is_prod)?
                    .parse::<LogFormat>()
                    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        };

        config.query.validate()?;
        Ok(config)
    }
}

impl QueryConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.max_limit < 1 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "QUERY_MAX_LIMIT must be at least 1, got {}",
                self.max_limit
            )));
        }
        if !(1..=self.max_limit).contains(&self.default_limit) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "QUERY_DEFAULT_LIMIT must be between 1 and {}, got {}",
                self.max_limit,
                self.default_limit
            )));
        }
        Ok(())
    }
}
