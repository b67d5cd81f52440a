// THEORY:
// Configuration persistence sits behind one small trait so the engine never
// knows whether it is talking to flash, a file, or a test fixture. The
// contract is deliberately blob-shaped: the store moves whole-configuration
// snapshots (the fixed-layout blob from `config`), never individual fields,
// so a reader can never observe a half-written configuration.
//
// "Nothing persisted yet" is a first-class outcome, not a failure:
// `load_or_default` maps it onto the built-in defaults, which is what the
// boot path does on a fresh device. Real I/O errors surface to the caller
// unretried.

use crate::core_modules::config::DetectorConfig;
use crate::core_modules::error::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Whole-struct configuration persistence.
pub trait ConfigStore {
    fn load(&self) -> Result<DetectorConfig, StoreError>;
    fn save(&mut self, config: &DetectorConfig) -> Result<(), StoreError>;

    /// Loads the persisted configuration, falling back to the defaults when
    /// none exists yet. Other failures still surface.
    fn load_or_default(&self) -> Result<DetectorConfig, StoreError> {
        match self.load() {
            Ok(config) => {
                log::info!("configuration loaded from store");
                Ok(config)
            }
            Err(StoreError::NotFound) => {
                log::info!("no persisted configuration, using defaults");
                Ok(DetectorConfig::default())
            }
            Err(err) => Err(err),
        }
    }
}

/// File-backed store: one blob file, replaced atomically on save
/// (write to a sibling temp file, then rename over the target).
#[derive(Debug)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<DetectorConfig, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(err) => return Err(StoreError::Io(err)),
        };
        DetectorConfig::from_blob(&bytes)
    }

    fn save(&mut self, config: &DetectorConfig) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, config.to_blob())?;
        fs::rename(&tmp, &self.path)?;
        log::info!("configuration saved to {}", self.path.display());
        Ok(())
    }
}

/// RAM-backed store. Starts empty; useful for tests and for hosts that
/// manage persistence elsewhere.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blob: Option<Vec<u8>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<DetectorConfig, StoreError> {
        match &self.blob {
            Some(blob) => DetectorConfig::from_blob(blob),
            None => Err(StoreError::NotFound),
        }
    }

    fn save(&mut self, config: &DetectorConfig) -> Result<(), StoreError> {
        self.blob = Some(config.to_blob().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::config::CONFIG_BLOB_LEN;

    #[test]
    fn empty_store_reports_not_found() {
        let store = MemoryConfigStore::new();
        assert!(matches!(store.load(), Err(StoreError::NotFound)));
    }

    #[test]
    fn load_or_default_falls_back_to_defaults() {
        let store = MemoryConfigStore::new();
        assert_eq!(store.load_or_default().unwrap(), DetectorConfig::default());
    }

    #[test]
    fn saved_configuration_loads_back_wholesale() {
        let mut store = MemoryConfigStore::new();
        let mut config = DetectorConfig::default();
        config.min_area = 1500;
        config.bands[2].h_max = 200;

        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
        assert_eq!(store.load_or_default().unwrap(), config);
    }

    #[test]
    fn corrupt_blob_surfaces_as_malformed() {
        let mut store = MemoryConfigStore::new();
        store.blob = Some(vec![0u8; CONFIG_BLOB_LEN - 3]);
        assert!(matches!(store.load(), Err(StoreError::Malformed)));
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let path = std::env::temp_dir().join("band_vision_store_test.cfg");
        let _ = fs::remove_file(&path);

        let mut store = FileConfigStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::NotFound)));

        let mut config = DetectorConfig::default();
        config.frame_decimation = 3;
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);

        let _ = fs::remove_file(&path);
    }
}
