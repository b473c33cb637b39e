use std::path::PathBuf;

use lottery_core::DrawSessionConfig;
use lottery_logging::{lottery_debug, lottery_info};

use crate::persist::{read_optional, remove_optional, AtomicFileWriter, StoreError};

pub const CONFIG_FILENAME: &str = "list.json";

/// The saved draw configuration. Its presence means a session is set up.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILENAME)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Loads the record, `None` when nothing is stored.
    pub fn load(&self) -> Result<Option<DrawSessionConfig>, StoreError> {
        let path = self.path();
        lottery_debug!("Loading configuration from {:?}", path);
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };
        let config = serde_json::from_str(&content).map_err(|err| StoreError::Decode {
            path: path.clone(),
            message: err.to_string(),
        })?;
        lottery_info!("Loaded configuration from {:?}", path);
        Ok(Some(config))
    }

    pub fn save(&self, config: &DrawSessionConfig) -> Result<PathBuf, StoreError> {
        let content = serde_json::to_string_pretty(config).map_err(|err| StoreError::Encode {
            what: "configuration",
            message: err.to_string(),
        })?;
        let path = AtomicFileWriter::new(self.dir.clone()).write(CONFIG_FILENAME, &content)?;
        lottery_info!(
            "Saved configuration ({} names, {} draws) to {:?}",
            config.names().len(),
            config.draws().len(),
            path
        );
        Ok(path)
    }

    /// Deletes the record. A missing record is not an error.
    pub fn delete(&self) -> Result<bool, StoreError> {
        let existed = remove_optional(&self.path())?;
        lottery_info!("Configuration record removed (existed: {})", existed);
        Ok(existed)
    }
}
