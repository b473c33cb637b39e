use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{DrawDefinition, DrawError, DrawSession, DrawSessionConfig, RoundResult};

/// Persistable copy of a session's progress.
///
/// Every field is required by [`SessionSnapshot::restore`]; they are optional
/// here so an incomplete record surfaces as [`DrawError::CorruptSnapshot`]
/// instead of a decoder error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub names: Option<Vec<String>>,
    #[serde(default)]
    pub pool: Option<Vec<String>>,
    #[serde(default)]
    pub current_index: Option<usize>,
    #[serde(default)]
    pub history: Option<BTreeMap<usize, RoundResult>>,
}

impl SessionSnapshot {
    pub fn export(session: &DrawSession) -> Self {
        Self {
            names: Some(session.config().names().to_vec()),
            pool: Some(session.pool().to_vec()),
            current_index: Some(session.current_index()),
            history: Some(session.history().clone()),
        }
    }

    /// Rebuilds a session against `definitions`, checking every invariant
    /// the engine relies on.
    pub fn restore(self, definitions: &[DrawDefinition]) -> Result<DrawSession, DrawError> {
        let names = self.names.ok_or_else(|| missing("names"))?;
        let pool = self.pool.ok_or_else(|| missing("pool"))?;
        let current_index = self.current_index.ok_or_else(|| missing("current_index"))?;
        let history = self.history.ok_or_else(|| missing("history"))?;

        let config = DrawSessionConfig::new(names, definitions.to_vec())
            .map_err(|err| DrawError::CorruptSnapshot(err.to_string()))?;

        if current_index > definitions.len() {
            return Err(DrawError::CorruptSnapshot(format!(
                "index {current_index} is beyond {} draws",
                definitions.len()
            )));
        }

        let known: HashSet<&String> = config.names().iter().collect();
        let mut seen = HashSet::new();
        for name in &pool {
            if !known.contains(name) {
                return Err(DrawError::CorruptSnapshot(format!(
                    "pool entry '{name}' is not in the name list"
                )));
            }
            if !seen.insert(name) {
                return Err(DrawError::CorruptSnapshot(format!(
                    "pool entry '{name}' appears twice"
                )));
            }
        }

        for (round, result) in &history {
            let definition = definitions.get(*round).ok_or_else(|| {
                DrawError::CorruptSnapshot(format!("history holds unknown round {round}"))
            })?;
            check_round(*round, result, definition, &known)?;
        }

        Ok(DrawSession::from_parts(config, pool, current_index, history))
    }
}

impl DrawSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::export(self)
    }

    pub fn restore(
        snapshot: SessionSnapshot,
        definitions: &[DrawDefinition],
    ) -> Result<Self, DrawError> {
        snapshot.restore(definitions)
    }
}

fn check_round(
    round: usize,
    result: &RoundResult,
    definition: &DrawDefinition,
    known: &HashSet<&String>,
) -> Result<(), DrawError> {
    if result.main_winners.len() != definition.main_count
        || result.backup_winners.len() != definition.backup_count
    {
        return Err(DrawError::CorruptSnapshot(format!(
            "round {round} winner counts do not match '{}'",
            definition.title
        )));
    }
    let mut seen = HashSet::new();
    for name in result.main_winners.iter().chain(&result.backup_winners) {
        if !known.contains(name) || !seen.insert(name) {
            return Err(DrawError::CorruptSnapshot(format!(
                "round {round} has an invalid winner '{name}'"
            )));
        }
    }
    Ok(())
}

fn missing(field: &str) -> DrawError {
    DrawError::CorruptSnapshot(format!("missing field '{field}'"))
}
