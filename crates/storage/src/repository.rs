use async_trait::async_trait;
use memcard_core::model::{CardId, Category};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Tab-scoped key/value state.
///
/// Models the per-tab storage the front end keeps: values live exactly as
/// long as the store instance and are never shared across runs of the
/// process.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key has never been set.
    async fn get(&self, key: &str) -> Result<String, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be accessed.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Drop every key in the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be accessed.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Generated runtime resources: the category index and the per-category
/// default card orders.
#[async_trait]
pub trait RuntimeStore: Send + Sync {
    /// Remove every generated runtime resource, leaving an empty runtime area.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if existing resources cannot be removed.
    async fn clear_all(&self) -> Result<(), StorageError>;

    /// Write the category index, one category per line, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the index cannot be written.
    async fn write_category_index(&self, categories: &[Category]) -> Result<(), StorageError>;

    /// Read the category index back, preserving its stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the index has never been written.
    async fn read_category_index(&self) -> Result<Vec<Category>, StorageError>;

    /// Write one category's default card order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sequence cannot be written.
    async fn write_default_sequence(
        &self,
        category: &Category,
        card_ids: &[CardId],
    ) -> Result<(), StorageError>;

    /// Read one category's default card order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no order was written for the
    /// category.
    async fn read_default_sequence(&self, category: &Category) -> Result<Vec<CardId>, StorageError>;
}

/// Source of the card-list definition text.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read the raw card-list text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no card list exists.
    async fn read_catalog(&self) -> Result<String, StorageError>;
}

/// Simple in-memory session store for testing and engine-embedded use.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<String, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(key).cloned().ok_or(StorageError::NotFound)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clear();
        Ok(())
    }
}

/// In-memory runtime store mirroring the generated file tree.
#[derive(Clone, Default)]
pub struct InMemoryRuntimeStore {
    index: Arc<Mutex<Option<Vec<Category>>>>,
    sequences: Arc<Mutex<HashMap<Category, Vec<CardId>>>>,
}

impl InMemoryRuntimeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RuntimeStore for InMemoryRuntimeStore {
    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut index = self
            .index
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut sequences = self
            .sequences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *index = None;
        sequences.clear();
        Ok(())
    }

    async fn write_category_index(&self, categories: &[Category]) -> Result<(), StorageError> {
        let mut guard = self
            .index
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(categories.to_vec());
        Ok(())
    }

    async fn read_category_index(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self
            .index
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }

    async fn write_default_sequence(
        &self,
        category: &Category,
        card_ids: &[CardId],
    ) -> Result<(), StorageError> {
        let mut guard = self
            .sequences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(category.clone(), card_ids.to_vec());
        Ok(())
    }

    async fn read_default_sequence(&self, category: &Category) -> Result<Vec<CardId>, StorageError> {
        let guard = self
            .sequences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(category).cloned().ok_or(StorageError::NotFound)
    }
}

/// In-memory catalog source holding a fixed card-list text.
#[derive(Clone, Default)]
pub struct InMemoryCatalogSource {
    text: Arc<Mutex<Option<String>>>,
}

impl InMemoryCatalogSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(Mutex::new(Some(text.into()))),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn read_catalog(&self) -> Result<String, StorageError> {
        let guard = self
            .text
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }
}

/// Aggregates the storage ports behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session: Arc<dyn SessionStore>,
    pub runtime: Arc<dyn RuntimeStore>,
    pub catalog: Arc<dyn CatalogSource>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            session: Arc::new(InMemorySessionStore::new()),
            runtime: Arc::new(InMemoryRuntimeStore::new()),
            catalog: Arc::new(InMemoryCatalogSource::new()),
        }
    }

    /// In-memory backends with the catalog already populated.
    #[must_use]
    pub fn in_memory_with_catalog(text: impl Into<String>) -> Self {
        Self {
            session: Arc::new(InMemorySessionStore::new()),
            runtime: Arc::new(InMemoryRuntimeStore::new()),
            catalog: Arc::new(InMemoryCatalogSource::with_text(text)),
        }
    }
}
