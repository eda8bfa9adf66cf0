//! Key/value store that keeps the pilot's source selections across sessions.

mod file_store;
mod memory_store;

use crate::error::SettingsError;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Whether the DME window is shown.
pub const SHOW_DME_KEY: &str = "HSI.ShowDme";
/// Source of bearing pointer 1.
pub const BRG1_SOURCE_KEY: &str = "HSI.Brg1Src";
/// Source of bearing pointer 2.
pub const BRG2_SOURCE_KEY: &str = "HSI.Brg2Src";
/// Receiver feeding the DME window.
pub const DME_SOURCE_KEY: &str = "HSI.DmeSrc";

/// Key under which the source of bearing pointer `pointer` (1 or 2) is stored.
pub fn bearing_source_key(pointer: u8) -> Option<&'static str> {
    match pointer {
        1 => Some(BRG1_SOURCE_KEY),
        2 => Some(BRG2_SOURCE_KEY),
        _ => None,
    }
}

/// Read/write contract of the host's settings persistence.
///
/// Values are read once when the model is built and written through on every pilot
/// action. `set` must not fail the caller. Storage problems are reported by the
/// store itself and surface again through [`SettingsStore::flush`].
pub trait SettingsStore {
    fn get(&self, key: &str, default: i64) -> i64;
    fn set(&mut self, key: &str, value: i64);

    /// Writes every held value to the backing storage.
    ///
    /// # Errors
    /// - `SettingsError` if the backing storage rejected the write.
    fn flush(&self) -> Result<(), SettingsError> { Ok(()) }

    fn get_bool(&self, key: &str, default: bool) -> bool { self.get(key, i64::from(default)) != 0 }
    fn set_bool(&mut self, key: &str, value: bool) { self.set(key, i64::from(value)); }
}
