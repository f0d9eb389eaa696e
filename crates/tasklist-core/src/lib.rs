//! Task list core: the item store, filter views and snapshot persistence
//! shared by the browser frontend and the command-line driver.

pub mod config;
pub mod error;
pub mod filter;
pub mod item;
pub mod persist;
pub mod session;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, PersistError, SessionError, StorageError, StoreError};
pub use filter::{Filter, FilterCounts};
pub use item::{Item, ItemPatch};
pub use persist::{Persistence, RetryPolicy, SaveOutcome, Snapshot};
pub use session::{LoadState, Session};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{ItemStore, MAX_BATCH_SIZE};
