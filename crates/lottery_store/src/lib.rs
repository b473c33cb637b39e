//! Lottery store: on-disk configuration record and session snapshots.
mod config_store;
mod persist;
mod session_file;

pub use config_store::{ConfigStore, CONFIG_FILENAME};
pub use persist::{ensure_data_dir, AtomicFileWriter, StoreError};
pub use session_file::{SavedSession, SessionFile, SESSION_FILENAME};

use std::path::{Path, PathBuf};

/// Everything persisted for one data directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
    config: ConfigStore,
    session: SessionFile,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            config: ConfigStore::new(dir.clone()),
            session: SessionFile::new(dir.clone()),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn session(&self) -> &SessionFile {
        &self.session
    }

    /// Removes the session snapshot and the configuration record.
    ///
    /// Without the record the application returns to configuration entry.
    pub fn erase(&self) -> Result<(), StoreError> {
        self.session.delete()?;
        self.config.delete()?;
        Ok(())
    }
}
