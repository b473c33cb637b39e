use std::path::PathBuf;

use chrono::Utc;
use lottery_core::SessionSnapshot;
use lottery_logging::{lottery_debug, lottery_info};
use serde::{Deserialize, Serialize};

use crate::persist::{read_optional, remove_optional, AtomicFileWriter, StoreError};

pub const SESSION_FILENAME: &str = "session.ron";

/// A snapshot as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    pub saved_utc: String,
    pub snapshot: SessionSnapshot,
}

/// Latest session progress, kept so an interrupted session can be resumed.
#[derive(Debug, Clone)]
pub struct SessionFile {
    dir: PathBuf,
}

impl SessionFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILENAME)
    }

    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<PathBuf, StoreError> {
        let saved = SavedSession {
            saved_utc: Utc::now().to_rfc3339(),
            snapshot: snapshot.clone(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content =
            ron::ser::to_string_pretty(&saved, pretty).map_err(|err| StoreError::Encode {
                what: "session snapshot",
                message: err.to_string(),
            })?;
        let path = AtomicFileWriter::new(self.dir.clone()).write(SESSION_FILENAME, &content)?;
        lottery_debug!("Saved session snapshot to {:?}", path);
        Ok(path)
    }

    pub fn load(&self) -> Result<Option<SavedSession>, StoreError> {
        let path = self.path();
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };
        let saved: SavedSession = ron::from_str(&content).map_err(|err| StoreError::Decode {
            path: path.clone(),
            message: err.to_string(),
        })?;
        lottery_info!(
            "Loaded session snapshot saved at {} from {:?}",
            saved.saved_utc,
            path
        );
        Ok(Some(saved))
    }

    pub fn delete(&self) -> Result<bool, StoreError> {
        remove_optional(&self.path())
    }
}
