use crate::{DrawSessionConfig, SessionSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SaveConfig(DrawSessionConfig),
    SaveSnapshot(SessionSnapshot),
    /// Erase the stored configuration and session.
    DeletePersisted,
    /// Run countdown `id`, reporting ticks and completion under that id.
    StartCountdown { id: u64, seconds: u8 },
    CancelCountdown,
    Quit,
}
