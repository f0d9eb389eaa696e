use thiserror::Error;

use crate::filter::Filter;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("no ids left to assign")]
    IdsExhausted,

    #[error("batch of {count} items exceeds the limit of {max}")]
    BatchTooLarge { count: usize, max: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("items are still loading")]
    NotReady,

    #[error("item {id} is completed; uncheck it before editing the title")]
    Locked { id: u64 },

    #[error("editing is disabled in the {filter} view")]
    EditingDisabled { filter: Filter },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored items under {key} are malformed: {reason}")]
    Malformed { key: String, reason: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PersistError {
    /// Only storage failures can succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PersistError::Storage(StorageError::Write(_) | StorageError::Io(_))
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter '{0}' (expected all, completed, unchecked or trash)")]
pub struct UnknownFilter(pub String);
