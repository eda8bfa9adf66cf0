use super::SettingsStore;
use crate::error::SettingsError;
use crate::event;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Settings store persisted as a bincode-encoded map in a single file.
///
/// The file is read once on [`FileStore::open`]. Every `set` rewrites the whole
/// file. Write failures are logged and the in-memory value is kept, so the model
/// keeps running with the new selection for this session.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file starts an empty store.
    ///
    /// # Errors
    /// - `SettingsError::Io` if the file exists but cannot be read.
    /// - `SettingsError::Decode` if the file content is not a valid settings map.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read(&path) {
            Ok(bytes) => Self::decode(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                event!("No settings at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(SettingsError::Io(e)),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path { &self.path }

    fn decode(bytes: &[u8]) -> Result<BTreeMap<String, i64>, SettingsError> {
        let (values, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(SettingsError::Decode)?;
        Ok(values)
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str, default: i64) -> i64 { self.values.get(key).copied().unwrap_or(default) }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            crate::warn!("Failed to persist {key}={value} to {}: {e:?}", self.path.display());
        }
    }

    /// Rewrites the whole file from the in-memory map.
    fn flush(&self) -> Result<(), SettingsError> {
        let bytes = bincode::serde::encode_to_vec(&self.values, bincode::config::standard())
            .map_err(SettingsError::Encode)?;
        fs::write(&self.path, bytes).map_err(SettingsError::Io)
    }
}
