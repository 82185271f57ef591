use super::DbState;
use crate::error::StorageError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Where the workspace snapshot lives.
///
/// Persistence is last-write-wins: every save replaces the whole snapshot.
pub trait Repository: Send {
    /// The stored snapshot, or `None` when nothing has been stored yet.
    ///
    /// A snapshot that exists but cannot be read is an error, never `None`.
    fn load_snapshot(&self) -> Result<Option<DbState>, StorageError>;

    fn save_snapshot(&mut self, state: &DbState) -> Result<(), StorageError>;
}

/// Keeps the snapshot in memory. Useful for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    snapshot: Option<DbState>,
    saves: usize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(state: DbState) -> Self {
        Self {
            snapshot: Some(state),
            saves: 0,
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Repository for MemoryRepository {
    fn load_snapshot(&self) -> Result<Option<DbState>, StorageError> {
        Ok(self.snapshot.clone())
    }

    fn save_snapshot(&mut self, state: &DbState) -> Result<(), StorageError> {
        self.snapshot = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Environment variable overriding [`StoreConfig::directory`].
pub const DATA_DIR_ENV: &str = "FORMSCULPTOR_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub directory: PathBuf,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            storage_key: "formSculptor_db".to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults, with the directory taken from `FORMSCULPTOR_DATA_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(directory) = std::env::var(DATA_DIR_ENV) {
            if !directory.is_empty() {
                config.directory = PathBuf::from(directory);
            }
        }
        config
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// `<directory>/<storage_key>.json`
    pub fn snapshot_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", self.storage_key))
    }
}

/// Stores the snapshot as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    config: StoreConfig,
}

impl JsonFileRepository {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl Repository for JsonFileRepository {
    fn load_snapshot(&self) -> Result<Option<DbState>, StorageError> {
        let path = self.config.snapshot_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No snapshot at '{}'", path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Unreadable {
                path: path.display().to_string(),
                source,
            })
    }

    fn save_snapshot(&mut self, state: &DbState) -> Result<(), StorageError> {
        let path = self.config.snapshot_path();
        let io_error = |source| StorageError::Io {
            path: path.display().to_string(),
            source,
        };
        fs::create_dir_all(&self.config.directory).map_err(io_error)?;
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&path, json).map_err(io_error)?;
        log::info!("Saved snapshot to '{}'", path.display());
        Ok(())
    }
}
