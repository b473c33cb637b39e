use crate::{DrawDefinition, Notice, Phase, RoundResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenKind {
    #[default]
    Setup,
    Drawing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: ScreenKind,
    pub setup: Option<SetupView>,
    pub drawing: Option<DrawingView>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupView {
    pub draws: Vec<DrawDefinition>,
    /// Non-empty lines currently entered in the names box.
    pub name_count: usize,
    pub default_main_count: usize,
    pub default_backup_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingView {
    pub remaining: usize,
    /// 1-based, one past `round_count` once completed.
    pub round_number: usize,
    pub round_count: usize,
    pub title: Option<String>,
    pub phase: Phase,
    pub result: Option<RoundResult>,
    pub countdown: Option<u8>,
    pub draw_label: &'static str,
    pub can_draw: bool,
    pub can_advance: bool,
    pub can_go_back: bool,
    pub confirm_reset: bool,
    /// Present while the participant list is toggled on.
    pub pool: Option<Vec<String>>,
}
