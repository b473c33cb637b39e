use crate::{DrawSessionConfig, RemovalScope, SessionSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Setup: append a draw definition.
    DrawAdded {
        title: String,
        main_count: usize,
        backup_count: usize,
    },
    /// Setup: drop the most recently added draw definition.
    LastDrawRemoved,
    /// Setup: user edited the names box.
    NamesChanged(String),
    /// Setup: fill the names box with the built-in sample list.
    SampleNamesRequested,
    /// Setup: save the configuration and start drawing.
    SetupSubmitted,
    /// A stored configuration was found at startup.
    ConfigLoaded(DrawSessionConfig),
    /// A stored configuration plus a saved session should be resumed.
    SessionRestored {
        config: DrawSessionConfig,
        snapshot: SessionSnapshot,
    },
    /// User pressed the draw button; starts the countdown.
    DrawRequested,
    /// Countdown display update for countdown `id`.
    CountdownTick { id: u64, remaining: u8 },
    /// Countdown `id` ran out; `seed` feeds the sampler.
    CountdownElapsed { id: u64, seed: u64 },
    /// User aborted the countdown.
    CountdownCancelled,
    /// Commit the current winners and move on.
    AdvanceClicked(RemovalScope),
    BackClicked,
    RemoveNameSubmitted(String),
    ShowPoolToggled,
    ResetClicked,
    ResetConfirmed,
    ResetDeclined,
    /// Storage erased the persisted record after a confirmed reset.
    PersistedDeleted,
    /// A storage effect failed.
    StorageFailed(String),
    QuitClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
