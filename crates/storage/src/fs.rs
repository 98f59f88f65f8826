use async_trait::async_trait;
use memcard_core::model::{CardId, Category};
use memcard_core::{ResourceLayout, StudyConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

use crate::repository::{
    CatalogSource, InMemorySessionStore, RuntimeStore, Storage, StorageError,
};

fn io_err(error: std::io::Error) -> StorageError {
    if error.kind() == std::io::ErrorKind::NotFound {
        StorageError::NotFound
    } else {
        StorageError::Io(error.to_string())
    }
}

fn parse_categories(text: &str) -> Result<Vec<Category>, StorageError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            Category::new(line).map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .collect()
}

fn parse_card_ids(text: &str) -> Result<Vec<CardId>, StorageError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| CardId::new(line).map_err(|e| StorageError::Serialization(e.to_string())))
        .collect()
}

fn join_lines<T: AsRef<str>>(items: impl Iterator<Item = T>) -> String {
    let mut text = String::new();
    for item in items {
        text.push_str(item.as_ref());
        text.push('\n');
    }
    text
}

/// Card-list source backed by `config/card-list.txt` in the resource tree.
#[derive(Clone)]
pub struct FsCatalogSource {
    path: PathBuf,
}

impl FsCatalogSource {
    #[must_use]
    pub fn new(layout: &ResourceLayout) -> Self {
        Self {
            path: layout.card_list_file(),
        }
    }
}

#[async_trait]
impl CatalogSource for FsCatalogSource {
    async fn read_catalog(&self) -> Result<String, StorageError> {
        fs::read_to_string(&self.path).await.map_err(io_err)
    }
}

/// Runtime store writing the category index and per-category default orders
/// as plain-text files under the resource tree's `runtime/` directory.
#[derive(Clone)]
pub struct FsRuntimeStore {
    layout: ResourceLayout,
}

impl FsRuntimeStore {
    #[must_use]
    pub fn new(layout: ResourceLayout) -> Self {
        Self { layout }
    }

    async fn ensure_runtime_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.layout.runtime_dir())
            .await
            .map_err(io_err)
    }
}

#[async_trait]
impl RuntimeStore for FsRuntimeStore {
    async fn clear_all(&self) -> Result<(), StorageError> {
        let runtime_dir = self.layout.runtime_dir();
        let mut entries = match fs::read_dir(&runtime_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return fs::create_dir_all(&runtime_dir).await.map_err(io_err);
            }
            Err(e) => return Err(io_err(e)),
        };
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if entry.file_type().await.map_err(io_err)?.is_file() {
                fs::remove_file(&path).await.map_err(io_err)?;
            }
        }
        Ok(())
    }

    async fn write_category_index(&self, categories: &[Category]) -> Result<(), StorageError> {
        self.ensure_runtime_dir().await?;
        let text = join_lines(categories.iter().map(Category::as_str));
        fs::write(self.layout.category_index_file(), text)
            .await
            .map_err(io_err)
    }

    async fn read_category_index(&self) -> Result<Vec<Category>, StorageError> {
        let text = fs::read_to_string(self.layout.category_index_file())
            .await
            .map_err(io_err)?;
        parse_categories(&text)
    }

    async fn write_default_sequence(
        &self,
        category: &Category,
        card_ids: &[CardId],
    ) -> Result<(), StorageError> {
        self.ensure_runtime_dir().await?;
        let text = join_lines(card_ids.iter().map(CardId::as_str));
        fs::write(self.layout.category_sequence_file(category), text)
            .await
            .map_err(io_err)
    }

    async fn read_default_sequence(&self, category: &Category) -> Result<Vec<CardId>, StorageError> {
        let text = fs::read_to_string(self.layout.category_sequence_file(category))
            .await
            .map_err(io_err)?;
        parse_card_ids(&text)
    }
}

/// Read the study configuration file, falling back to defaults when the file
/// is missing or unreadable.
pub async fn load_study_config(layout: &ResourceLayout) -> StudyConfig {
    match fs::read_to_string(layout.config_file()).await {
        Ok(text) => StudyConfig::parse(&text),
        Err(_) => StudyConfig::default(),
    }
}

impl Storage {
    /// Build a `Storage` with file-backed catalog and runtime stores.
    ///
    /// Session state stays in memory: it models per-tab browser state and is
    /// never meant to outlive the process.
    #[must_use]
    pub fn filesystem(layout: &ResourceLayout) -> Self {
        Self {
            session: Arc::new(InMemorySessionStore::new()),
            runtime: Arc::new(FsRuntimeStore::new(layout.clone())),
            catalog: Arc::new(FsCatalogSource::new(layout)),
        }
    }
}
