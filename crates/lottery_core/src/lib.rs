//! Lottery core: draw session engine and the pure application state machine.
mod config;
mod effect;
mod error;
mod msg;
mod names;
mod session;
mod snapshot;
mod state;
mod update;
mod view_model;

pub use config::{DrawDefinition, DrawSessionConfig, DEFAULT_BACKUP_COUNT, DEFAULT_MAIN_COUNT};
pub use effect::Effect;
pub use error::DrawError;
pub use msg::Msg;
pub use names::{
    parse_names, DuplicateNamesDetected, ParsedNames, DUPLICATE_PREVIEW_LIMIT, SAMPLE_NAMES,
};
pub use session::{DrawSession, Phase, RemovalScope, ResetSignal, RoundResult};
pub use snapshot::SessionSnapshot;
pub use state::{AppState, Notice, Severity, DEFAULT_COUNTDOWN_SECONDS};
pub use update::update;
pub use view_model::{AppViewModel, DrawingView, ScreenKind, SetupView};
