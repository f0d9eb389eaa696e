use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::persist::RetryPolicy;
use crate::store::MAX_BATCH_SIZE;

/// Key the item list has always been stored under.
pub const DEFAULT_STORAGE_KEY: &str = "todo-20240622";
pub const DEFAULT_BATCH_SIZE: usize = 3;
pub const DEFAULT_BATCH_TITLE_PREFIX: &str = "テスト_タスク_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage_key: String,
    pub batch_size: usize,
    pub batch_title_prefix: String,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_title_prefix: DEFAULT_BATCH_TITLE_PREFIX.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Parses TOML; missing keys keep their defaults.
    #[tracing::instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(text)?;
        cfg.validate()?;
        debug!(storage_key = %cfg.storage_key, batch_size = cfg.batch_size, "parsed config");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::Invalid {
                field: "batch_size",
                reason: format!("{} exceeds the limit of {MAX_BATCH_SIZE}", self.batch_size),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "retry.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(ConfigError::Invalid {
                field: "retry.base_delay_ms",
                reason: format!(
                    "{} exceeds retry.max_delay_ms ({})",
                    self.retry.base_delay_ms, self.retry.max_delay_ms
                ),
            });
        }
        Ok(())
    }
}
