//! Persistence layer: durable keyed string storage.
//!
//! The snapshot store only needs a simple key -> string capability with
//! get / set / remove and no transactions, schema or expiry. This module
//! defines that capability as the [`KeyValueStorage`] trait and provides
//! three backends:
//!
//! - [`MemoryStorage`]: process-local map, optionally capped by a byte quota.
//! - [`FileStorage`]: a single JSON object file rewritten atomically.
//! - [`PostgresStorage`]: a `kv_store` table accessed through `sqlx::PgPool`.
//!
//! [`StorageBackend`] dispatches over the three so the service layer can
//! hold one concrete type chosen at startup.

pub mod file;
pub mod memory;
pub mod postgres;

use std::future::Future;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;

use crate::config::{AdminConfig, StorageKind};

/// Errors reported by a [`KeyValueStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem read or write failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Writing the value would exceed the backend's capacity.
    #[error("quota exceeded: needed {needed} bytes, {available} available")]
    QuotaExceeded {
        /// Bytes required by the rejected write.
        needed: usize,
        /// Bytes still available before the write.
        available: usize,
    },

    /// Stored content could not be decoded.
    #[error("corrupt data under key {key}: {reason}")]
    Corrupt {
        /// Key whose content is unreadable.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// A lock guarding in-process state was poisoned.
    #[error("lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

/// Simple durable key -> string storage.
///
/// Every call is a whole-value operation: `set` replaces the stored value
/// entirely, so callers never observe partial writes.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Runtime-selected storage backend.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Process-local, lost on restart.
    Memory(MemoryStorage),
    /// JSON file on local disk.
    File(FileStorage),
    /// PostgreSQL `kv_store` table.
    Postgres(PostgresStorage),
}

impl StorageBackend {
    /// Builds the backend selected by `STORAGE_BACKEND`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the data directory cannot be created
    /// or the database cannot be reached or migrated.
    pub async fn from_config(config: &AdminConfig) -> Result<Self, StorageError> {
        match config.storage_backend {
            StorageKind::Memory => Ok(Self::Memory(MemoryStorage::new())),
            StorageKind::File => Ok(Self::File(FileStorage::open(&config.storage_path).await?)),
            StorageKind::Postgres => Ok(Self::Postgres(
                PostgresStorage::connect(&config.database_url, config.database_max_connections)
                    .await?,
            )),
        }
    }

    /// Short backend name used in logs and the health endpoint.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::File(_) => "file",
            Self::Postgres(_) => "postgres",
        }
    }
}

impl KeyValueStorage for StorageBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Memory(storage) => storage.get(key).await,
            Self::File(storage) => storage.get(key).await,
            Self::Postgres(storage) => storage.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Memory(storage) => storage.set(key, value).await,
            Self::File(storage) => storage.set(key, value).await,
            Self::Postgres(storage) => storage.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::Memory(storage) => storage.remove(key).await,
            Self::File(storage) => storage.remove(key).await,
            Self::Postgres(storage) => storage.remove(key).await,
        }
    }
}
