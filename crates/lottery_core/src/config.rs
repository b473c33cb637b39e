use serde::{Deserialize, Serialize};

use lottery_logging::lottery_warn;

use crate::names::dedupe;
use crate::DrawError;

/// Main winners prefilled for a new draw definition on the setup screen.
pub const DEFAULT_MAIN_COUNT: usize = 3;
/// Backup winners prefilled for a new draw definition on the setup screen.
pub const DEFAULT_BACKUP_COUNT: usize = 2;

/// One round of the session: a title and how many winners it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawDefinition {
    pub title: String,
    pub main_count: usize,
    pub backup_count: usize,
}

impl DrawDefinition {
    pub fn new(title: impl Into<String>, main_count: usize, backup_count: usize) -> Self {
        Self {
            title: title.into(),
            main_count,
            backup_count,
        }
    }

    /// Number of distinct names a draw of this round samples.
    ///
    /// Saturates; validation rejects definitions whose sum would overflow.
    pub fn total(&self) -> usize {
        self.main_count.saturating_add(self.backup_count)
    }

    pub(crate) fn validate(&self, position: usize) -> Result<(), DrawError> {
        if self.title.trim().is_empty() {
            return Err(DrawError::InvalidConfig(format!(
                "draw {} has an empty title",
                position + 1
            )));
        }
        if self.main_count == 0 {
            return Err(DrawError::InvalidConfig(format!(
                "draw '{}' needs at least one main winner",
                self.title
            )));
        }
        if self.main_count.checked_add(self.backup_count).is_none() {
            return Err(DrawError::InvalidConfig(format!(
                "draw '{}' asks for more winners than can be counted",
                self.title
            )));
        }
        Ok(())
    }
}

/// Immutable description of a session: the full name list and the ordered draws.
///
/// Serializes as `{"names": [...], "draws": [{"title", "main_count", "backup_count"}]}`
/// and validates on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigRecord", into = "ConfigRecord")]
pub struct DrawSessionConfig {
    names: Vec<String>,
    draws: Vec<DrawDefinition>,
}

#[derive(Serialize, Deserialize)]
struct ConfigRecord {
    names: Vec<String>,
    draws: Vec<DrawDefinition>,
}

impl DrawSessionConfig {
    /// Validates and builds a configuration.
    ///
    /// Repeated names are collapsed to their first occurrence so the pool
    /// never holds duplicates.
    pub fn new(names: Vec<String>, draws: Vec<DrawDefinition>) -> Result<Self, DrawError> {
        if names.is_empty() {
            return Err(DrawError::InvalidConfig("name list is empty".into()));
        }
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(DrawError::InvalidConfig("name list contains an empty name".into()));
        }
        if draws.is_empty() {
            return Err(DrawError::InvalidConfig("no draws defined".into()));
        }
        for (position, draw) in draws.iter().enumerate() {
            draw.validate(position)?;
        }

        let (names, repeated) = dedupe(names);
        if !repeated.is_empty() {
            lottery_warn!(
                "Configuration repeated {} names; keeping first occurrences",
                repeated.len()
            );
        }
        Ok(Self { names, draws })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn draws(&self) -> &[DrawDefinition] {
        &self.draws
    }
}

impl TryFrom<ConfigRecord> for DrawSessionConfig {
    type Error = DrawError;

    fn try_from(record: ConfigRecord) -> Result<Self, Self::Error> {
        Self::new(record.names, record.draws)
    }
}

impl From<DrawSessionConfig> for ConfigRecord {
    fn from(config: DrawSessionConfig) -> Self {
        Self {
            names: config.names,
            draws: config.draws,
        }
    }
}
