use crate::view_model::{AppViewModel, DrawingView, ScreenKind, SetupView};
use crate::{DrawDefinition, DrawSession, Phase, DEFAULT_BACKUP_COUNT, DEFAULT_MAIN_COUNT};

/// Seconds counted down before a draw unless configured otherwise.
pub const DEFAULT_COUNTDOWN_SECONDS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Message shown to the operator until the next one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// Configuration entry in progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SetupDraft {
    pub(crate) draws: Vec<DrawDefinition>,
    pub(crate) names_text: String,
}

/// A running countdown. Messages from any other id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Countdown {
    pub(crate) id: u64,
    pub(crate) remaining: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DrawingScreen {
    pub(crate) session: DrawSession,
    pub(crate) countdown: Option<Countdown>,
    pub(crate) confirm_reset: bool,
    /// Waiting for the persisted record to be erased.
    pub(crate) reset_pending: bool,
    pub(crate) show_pool: bool,
}

impl DrawingScreen {
    pub(crate) fn new(session: DrawSession) -> Self {
        Self {
            session,
            countdown: None,
            confirm_reset: false,
            reset_pending: false,
            show_pool: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Screen {
    Setup(SetupDraft),
    Drawing(Box<DrawingScreen>),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Setup(SetupDraft::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) screen: Screen,
    pub(crate) countdown_seconds: u8,
    /// Id handed to the next countdown.
    pub(crate) next_countdown_id: u64,
    pub(crate) notice: Option<Notice>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_countdown(DEFAULT_COUNTDOWN_SECONDS)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state whose draws are preceded by `seconds` of countdown (0 disables it).
    pub fn with_countdown(seconds: u8) -> Self {
        Self {
            screen: Screen::default(),
            countdown_seconds: seconds,
            next_countdown_id: 1,
            notice: None,
            dirty: true,
        }
    }

    /// The running session, if the draw screen is active.
    pub fn session(&self) -> Option<&DrawSession> {
        match &self.screen {
            Screen::Drawing(drawing) => Some(&drawing.session),
            Screen::Setup(_) => None,
        }
    }

    pub fn countdown_active(&self) -> bool {
        matches!(&self.screen, Screen::Drawing(drawing) if drawing.countdown.is_some())
    }

    pub fn view(&self) -> AppViewModel {
        match &self.screen {
            Screen::Setup(draft) => AppViewModel {
                screen: ScreenKind::Setup,
                setup: Some(SetupView {
                    draws: draft.draws.clone(),
                    name_count: count_lines(&draft.names_text),
                    default_main_count: DEFAULT_MAIN_COUNT,
                    default_backup_count: DEFAULT_BACKUP_COUNT,
                }),
                drawing: None,
                notice: self.notice.clone(),
                dirty: self.dirty,
            },
            Screen::Drawing(drawing) => AppViewModel {
                screen: ScreenKind::Drawing,
                setup: None,
                drawing: Some(drawing_view(drawing)),
                notice: self.notice.clone(),
                dirty: self.dirty,
            },
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }
}

fn drawing_view(drawing: &DrawingScreen) -> DrawingView {
    let session = &drawing.session;
    let phase = session.phase();
    let idle = drawing.countdown.is_none() && !drawing.reset_pending;
    DrawingView {
        remaining: session.pool().len(),
        round_number: session.current_index() + 1,
        round_count: session.definitions().len(),
        title: session.current_definition().map(|d| d.title.clone()),
        phase,
        result: session.current_result().cloned(),
        countdown: drawing.countdown.map(|countdown| countdown.remaining),
        draw_label: match phase {
            Phase::Drawn(_) => "Draw again",
            Phase::AwaitingDraw(_) | Phase::Completed => "Start draw",
        },
        can_draw: idle && !matches!(phase, Phase::Completed),
        can_advance: idle && matches!(phase, Phase::Drawn(_)),
        can_go_back: idle && session.current_index() > 0,
        confirm_reset: drawing.confirm_reset,
        pool: drawing.show_pool.then(|| session.pool().to_vec()),
    }
}

fn count_lines(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}
