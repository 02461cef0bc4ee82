//! Key-value persistence
//!
//! String keys, JSON string values. Backends:
//! - `MemoryStore`: process-lifetime only (tests, fallback)
//! - `FileStore`: one JSON file per key in the local data directory (native)
//! - `LocalStore`: browser LocalStorage (wasm32)

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage failure. Callers treat every variant as recoverable.
#[derive(Debug)]
pub enum StoreError {
    /// Backend cannot be reached (no data dir, LocalStorage disabled, ...)
    Unavailable(String),
    /// Key contains characters the backend cannot store
    InvalidKey(String),
    /// Underlying I/O failure
    Io(std::io::Error),
    /// Value could not be encoded
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(why) => write!(f, "storage unavailable: {why}"),
            StoreError::InvalidKey(key) => write!(f, "invalid storage key {key:?}"),
            StoreError::Io(e) => write!(f, "storage I/O error: {e}"),
            StoreError::Encode(e) => write!(f, "failed to encode value: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Local, string-keyed persistent store
pub trait KeyValueStore {
    /// Read the raw value for `key` (`None` if never written)
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, durably before returning
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read and decode a JSON value, keeping backend failures apart from
/// missing data.
///
/// Corrupt JSON is logged and reported as `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&json) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("Ignoring corrupt value under {key:?}: {e}");
            Ok(None)
        }
    }
}

/// Read and decode a JSON value.
///
/// Missing keys, unreachable backends and corrupt JSON all yield `None`;
/// the latter two are logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    read_json(store, key).unwrap_or_else(|e| {
        log::warn!("Failed to read {key:?}: {e}");
        None
    })
}

/// Encode a value as JSON and write it
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(StoreError::Encode)?;
    store.set(key, &json)
}

/// In-memory store; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{KeyValueStore, StoreError};

    /// Directory of `<key>.json` files
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        /// Store rooted at an explicit directory (created on first write)
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// Store under the user's local data directory
        pub fn in_data_dir() -> Result<Self, StoreError> {
            dirs::data_local_dir()
                .map(|dir| Self::new(dir.join("breakout")))
                .ok_or_else(|| StoreError::Unavailable("no local data directory".to_string()))
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
            let valid = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid {
                return Err(StoreError::InvalidKey(key.to_string()));
            }
            Ok(self.dir.join(format!("{key}.json")))
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            let path = self.path_for(key)?;
            match fs::read_to_string(&path) {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let path = self.path_for(key)?;
            fs::create_dir_all(&self.dir)?;
            // Temp file then rename; the old value stays intact until the swap
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, value)?;
            fs::rename(&tmp, &path)?;
            log::debug!("Wrote {key:?} to {:?}", path);
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::{KeyValueStore, StoreError};

    /// Browser LocalStorage
    pub struct LocalStore {
        storage: web_sys::Storage,
    }

    impl LocalStore {
        pub fn open() -> Result<Self, StoreError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .map(|storage| Self { storage })
                .ok_or_else(|| StoreError::Unavailable("LocalStorage disabled".to_string()))
        }
    }

    impl KeyValueStore for LocalStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.storage
                .get_item(key)
                .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            // Quota errors surface here
            self.storage
                .set_item(key, value)
                .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
        }
    }
}
