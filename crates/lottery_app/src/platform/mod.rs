pub mod app;
pub mod effects;
pub mod logging;
pub mod persistence;
pub mod settings;
pub mod ui;

use lottery_core::Msg;

pub use app::run_app;

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum Event {
    /// A message for the core state machine.
    Core(Msg),
    /// One line typed by the operator.
    Input(String),
    /// Standard input reached end of file.
    InputClosed,
}
