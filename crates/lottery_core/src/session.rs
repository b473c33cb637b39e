use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use lottery_logging::{lottery_audit, lottery_debug, lottery_info};

use crate::{DrawDefinition, DrawError, DrawSessionConfig};

/// Which winners of the current round leave the pool when advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalScope {
    MainOnly,
    MainAndBackup,
}

/// Cached outcome of one round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundResult {
    pub main_winners: Vec<String>,
    pub backup_winners: Vec<String>,
}

impl RoundResult {
    /// Names removed from the pool when advancing with `scope`.
    pub fn winners(&self, scope: RemovalScope) -> impl Iterator<Item = &String> {
        let backups = match scope {
            RemovalScope::MainOnly => &[][..],
            RemovalScope::MainAndBackup => &self.backup_winners[..],
        };
        self.main_winners.iter().chain(backups)
    }
}

/// Position of the session in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Round `i` has no cached result.
    AwaitingDraw(usize),
    /// Round `i` has a cached result that can be committed or re-drawn.
    Drawn(usize),
    /// Every round has been advanced past.
    Completed,
}

/// Returned by [`DrawSession::reset`]; the caller must erase any persisted record.
#[must_use = "the persisted record must be erased after a reset"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSignal {
    pub rounds_discarded: usize,
}

/// The draw session engine.
///
/// Owns the live pool, the round pointer and the per-round history. The pool
/// only ever shrinks; navigating back never puts names back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSession {
    config: DrawSessionConfig,
    pool: Vec<String>,
    current_index: usize,
    history: BTreeMap<usize, RoundResult>,
}

impl DrawSession {
    pub fn new(config: DrawSessionConfig) -> Self {
        lottery_info!(
            "New draw session: {} names, {} draws",
            config.names().len(),
            config.draws().len()
        );
        Self {
            pool: config.names().to_vec(),
            config,
            current_index: 0,
            history: BTreeMap::new(),
        }
    }

    /// Rebuilds a session from parts that have already been validated.
    pub(crate) fn from_parts(
        config: DrawSessionConfig,
        pool: Vec<String>,
        current_index: usize,
        history: BTreeMap<usize, RoundResult>,
    ) -> Self {
        Self {
            config,
            pool,
            current_index,
            history,
        }
    }

    pub fn config(&self) -> &DrawSessionConfig {
        &self.config
    }

    pub fn definitions(&self) -> &[DrawDefinition] {
        self.config.draws()
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn history(&self) -> &BTreeMap<usize, RoundResult> {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        if self.current_index >= self.definitions().len() {
            Phase::Completed
        } else if self.history.contains_key(&self.current_index) {
            Phase::Drawn(self.current_index)
        } else {
            Phase::AwaitingDraw(self.current_index)
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase() == Phase::Completed
    }

    /// Definition of the round the pointer is on, `None` once completed.
    pub fn current_definition(&self) -> Option<&DrawDefinition> {
        self.definitions().get(self.current_index)
    }

    /// Cached result of the round the pointer is on.
    pub fn current_result(&self) -> Option<&RoundResult> {
        self.history.get(&self.current_index)
    }

    /// Checks that the current round can be drawn from the live pool.
    pub fn ensure_drawable(&self) -> Result<&DrawDefinition, DrawError> {
        let definition = self
            .current_definition()
            .ok_or(DrawError::SessionCompleted)?;
        let needed = definition.total();
        if self.pool.len() < needed {
            return Err(DrawError::InsufficientCandidates {
                round: self.current_index,
                needed,
                available: self.pool.len(),
            });
        }
        Ok(definition)
    }

    /// Samples the winners of the current round, replacing any cached result.
    ///
    /// Every subset of the required size is equally likely.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&RoundResult, DrawError> {
        let definition = self.ensure_drawable()?;
        let main_count = definition.main_count;
        let needed = definition.total();

        // Indices come back in random order, so the split below is unbiased.
        let mut picked: Vec<String> = rand::seq::index::sample(rng, self.pool.len(), needed)
            .iter()
            .map(|i| self.pool[i].clone())
            .collect();
        let backup_winners = picked.split_off(main_count);
        let result = RoundResult {
            main_winners: picked,
            backup_winners,
        };

        let round = self.current_index;
        lottery_audit!(
            "Round {} '{}' drawn: main={:?} backup={:?}",
            round + 1,
            self.definitions()[round].title,
            result.main_winners,
            result.backup_winners
        );
        self.history.insert(round, result);
        Ok(&self.history[&round])
    }

    /// Commits the current round's winners and moves to the next round.
    ///
    /// Names already gone from the pool are skipped silently.
    pub fn advance(&mut self, scope: RemovalScope) -> Result<Phase, DrawError> {
        let round = self.current_index;
        if self.current_definition().is_none() {
            return Err(DrawError::SessionCompleted);
        }
        let result = self
            .history
            .get(&round)
            .ok_or(DrawError::RoundNotDrawn { round })?;

        let before = self.pool.len();
        let leaving: Vec<&String> = result.winners(scope).collect();
        self.pool.retain(|name| !leaving.contains(&name));
        self.current_index += 1;

        lottery_audit!(
            "Round {} committed ({:?}), removed {} names, {} remain",
            round + 1,
            scope,
            before - self.pool.len(),
            self.pool.len()
        );
        Ok(self.phase())
    }

    /// Moves the pointer one round back. The pool is left as it is.
    pub fn go_back(&mut self) -> Result<Phase, DrawError> {
        if self.current_index == 0 {
            return Err(DrawError::NoPreviousRound);
        }
        self.current_index -= 1;
        lottery_debug!("Went back to round {}", self.current_index);
        Ok(self.phase())
    }

    /// Removes an arbitrary name from the pool.
    pub fn remove_name(&mut self, name: &str) -> Result<(), DrawError> {
        if self.is_completed() {
            return Err(DrawError::SessionCompleted);
        }
        let position = self
            .pool
            .iter()
            .position(|candidate| candidate == name)
            .ok_or_else(|| DrawError::NameNotFound(name.to_string()))?;
        self.pool.remove(position);
        lottery_debug!("Removed '{}' from pool, {} remain", name, self.pool.len());
        Ok(())
    }

    /// Discards the whole session.
    pub fn reset(self) -> ResetSignal {
        lottery_info!(
            "Session reset after {} drawn rounds",
            self.history.len()
        );
        ResetSignal {
            rounds_discarded: self.history.len(),
        }
    }
}
