mod adapter;
mod backend;
mod memory;
mod sqlite;

pub use adapter::{Key, Store};
pub use backend::KeyValueStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::config::IronfitConfig;
use crate::error::{IronfitError, Result};

/// Enum wrapper for the key-value media. Dispatches to the concrete
/// implementation so the adapter and repositories stay non-generic.
pub enum Storage {
    Sqlite(SqliteStore),
    Memory(MemoryStore),
}

impl Storage {
    /// Fresh process-local storage.
    pub fn in_memory() -> Self {
        Storage::Memory(MemoryStore::new())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Storage::Sqlite(_) => "sqlite",
            Storage::Memory(_) => "memory",
        }
    }
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Storage::Sqlite(s) => s.get(key),
            Storage::Memory(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Storage::Sqlite(s) => s.set(key, value),
            Storage::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self {
            Storage::Sqlite(s) => s.remove(key),
            Storage::Memory(s) => s.remove(key),
        }
    }
}

/// Create a storage backend from the given configuration.
pub fn create_backend(config: &IronfitConfig) -> Result<Storage> {
    match config.storage.backend.as_str() {
        "sqlite" => {
            let path = match &config.storage.path {
                Some(p) => std::path::PathBuf::from(p),
                None => default_sqlite_path()?,
            };
            let store = SqliteStore::open(&path)?;
            Ok(Storage::Sqlite(store))
        }
        "memory" => Ok(Storage::in_memory()),
        other => Err(IronfitError::Config(format!(
            "unknown storage backend: {other}"
        ))),
    }
}

/// Open the adapter described by `config`: backend plus key namespace.
pub fn open_store(config: &IronfitConfig) -> Result<Store> {
    let backend = create_backend(config)?;
    Ok(Store::with_namespace(
        backend,
        config.storage.namespace.clone(),
    ))
}

/// Default SQLite path: `~/.config/ironfit/ironfit.db`
pub fn default_sqlite_path() -> Result<std::path::PathBuf> {
    dirs::config_dir()
        .map(|p| p.join("ironfit").join("ironfit.db"))
        .ok_or_else(|| IronfitError::Config("cannot determine config directory".to_string()))
}
