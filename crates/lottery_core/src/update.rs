use rand::rngs::StdRng;
use rand::SeedableRng;

use lottery_logging::{lottery_info, lottery_warn};

use crate::state::{Countdown, DrawingScreen, Screen};
use crate::{
    parse_names, AppState, DrawDefinition, DrawError, DrawSession, DrawSessionConfig, Effect,
    Msg, Notice, Phase, RemovalScope, SessionSnapshot, SAMPLE_NAMES,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DrawAdded {
            title,
            main_count,
            backup_count,
        } => add_draw(&mut state, DrawDefinition::new(title.trim(), main_count, backup_count)),
        Msg::LastDrawRemoved => {
            if let Screen::Setup(draft) = &mut state.screen {
                if draft.draws.pop().is_some() {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::NamesChanged(text) => {
            if let Screen::Setup(draft) = &mut state.screen {
                draft.names_text = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SampleNamesRequested => {
            if let Screen::Setup(draft) = &mut state.screen {
                draft.names_text = SAMPLE_NAMES.to_string();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SetupSubmitted => submit_setup(&mut state),
        Msg::ConfigLoaded(config) => {
            if !matches!(state.screen, Screen::Setup(_)) {
                return (state, Vec::new());
            }
            enter_session(&mut state, DrawSession::new(config), None)
        }
        Msg::SessionRestored { config, snapshot } => {
            if !matches!(state.screen, Screen::Setup(_)) {
                return (state, Vec::new());
            }
            resume_session(&mut state, config, snapshot)
        }
        Msg::DrawRequested => request_draw(&mut state),
        Msg::CountdownTick { id, remaining } => {
            if let Screen::Drawing(drawing) = &mut state.screen {
                if let Some(countdown) = drawing.countdown.as_mut().filter(|c| c.id == id) {
                    countdown.remaining = remaining;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::CountdownElapsed { id, seed } => perform_draw(&mut state, id, seed),
        Msg::CountdownCancelled => cancel_countdown(&mut state),
        Msg::AdvanceClicked(scope) => advance(&mut state, scope),
        Msg::BackClicked => go_back(&mut state),
        Msg::RemoveNameSubmitted(name) => remove_name(&mut state, name.trim()),
        Msg::ShowPoolToggled => {
            if let Screen::Drawing(drawing) = &mut state.screen {
                drawing.show_pool = !drawing.show_pool;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if let Screen::Drawing(drawing) = &mut state.screen {
                if !drawing.reset_pending {
                    drawing.confirm_reset = true;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::ResetConfirmed => confirm_reset(&mut state),
        Msg::ResetDeclined => {
            if let Screen::Drawing(drawing) = &mut state.screen {
                if drawing.confirm_reset {
                    drawing.confirm_reset = false;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::PersistedDeleted => {
            finish_reset(&mut state);
            Vec::new()
        }
        Msg::StorageFailed(message) => {
            if let Screen::Drawing(drawing) = &mut state.screen {
                drawing.reset_pending = false;
            }
            state.set_notice(Notice::error(format!("Storage error: {message}")));
            Vec::new()
        }
        Msg::QuitClicked => {
            let mut effects = Vec::with_capacity(2);
            if let Screen::Drawing(drawing) = &mut state.screen {
                if drawing.countdown.take().is_some() {
                    effects.push(Effect::CancelCountdown);
                }
            }
            effects.push(Effect::Quit);
            effects
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn add_draw(state: &mut AppState, definition: DrawDefinition) -> Vec<Effect> {
    let Screen::Setup(draft) = &mut state.screen else {
        return Vec::new();
    };
    match definition.validate(draft.draws.len()) {
        Ok(()) => {
            draft.draws.push(definition);
            state.notice = None;
            state.mark_dirty();
        }
        Err(err) => state.set_notice(Notice::error(err.to_string())),
    }
    Vec::new()
}

fn submit_setup(state: &mut AppState) -> Vec<Effect> {
    let Screen::Setup(draft) = &mut state.screen else {
        return Vec::new();
    };
    if draft.draws.is_empty() {
        state.set_notice(Notice::error("Add at least one draw before starting"));
        return Vec::new();
    }
    let parsed = match parse_names(&draft.names_text) {
        Ok(parsed) => parsed,
        Err(err) => {
            state.set_notice(Notice::error(err.to_string()));
            return Vec::new();
        }
    };
    let config = match DrawSessionConfig::new(parsed.names, draft.draws.clone()) {
        Ok(config) => config,
        Err(err) => {
            state.set_notice(Notice::error(err.to_string()));
            return Vec::new();
        }
    };

    let notice = match parsed.duplicates {
        Some(duplicates) => Notice::warning(duplicates.summary()),
        None => Notice::info(format!(
            "Saved {} names and {} draws",
            config.names().len(),
            config.draws().len()
        )),
    };
    let mut effects = vec![Effect::SaveConfig(config.clone())];
    effects.extend(enter_session(state, DrawSession::new(config), Some(notice)));
    effects
}

fn resume_session(
    state: &mut AppState,
    config: DrawSessionConfig,
    snapshot: SessionSnapshot,
) -> Vec<Effect> {
    match snapshot.restore(config.draws()) {
        Ok(session) => {
            lottery_info!("Resumed session at round {}", session.current_index());
            enter_session(state, session, Some(Notice::info("Resumed saved session")))
        }
        Err(err) => {
            lottery_warn!("Saved session rejected: {}", err);
            let notice = Notice::warning(format!("Could not resume ({err}); starting fresh"));
            enter_session(state, DrawSession::new(config), Some(notice))
        }
    }
}

fn enter_session(
    state: &mut AppState,
    session: DrawSession,
    notice: Option<Notice>,
) -> Vec<Effect> {
    let snapshot = session.snapshot();
    state.screen = Screen::Drawing(Box::new(DrawingScreen::new(session)));
    state.notice = notice;
    state.mark_dirty();
    vec![Effect::SaveSnapshot(snapshot)]
}

/// Returns why the draw screen cannot take navigation input right now.
fn busy_reason(drawing: &DrawingScreen) -> Option<&'static str> {
    if drawing.reset_pending {
        Some("Reset in progress")
    } else if drawing.countdown.is_some() {
        Some("Wait for the countdown to finish or cancel it")
    } else {
        None
    }
}

fn request_draw(state: &mut AppState) -> Vec<Effect> {
    let Screen::Drawing(drawing) = &mut state.screen else {
        return Vec::new();
    };
    if busy_reason(drawing).is_some() {
        return Vec::new();
    }
    // Checked before the countdown so an impossible draw never counts down.
    let check = drawing.session.ensure_drawable().map(|_| ());
    if let Err(err) = check {
        state.set_notice(Notice::error(err.to_string()));
        return Vec::new();
    }
    let seconds = state.countdown_seconds;
    let id = state.next_countdown_id;
    state.next_countdown_id += 1;
    drawing.countdown = Some(Countdown {
        id,
        remaining: seconds,
    });
    state.notice = None;
    state.mark_dirty();
    vec![Effect::StartCountdown { id, seconds }]
}

fn perform_draw(state: &mut AppState, id: u64, seed: u64) -> Vec<Effect> {
    let Screen::Drawing(drawing) = &mut state.screen else {
        return Vec::new();
    };
    if drawing.countdown.map(|countdown| countdown.id) != Some(id) {
        lottery_warn!("Ignoring completion of stale countdown {}", id);
        return Vec::new();
    }
    drawing.countdown = None;
    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = drawing.session.draw(&mut rng).map(|_| ());
    let snapshot = drawing.session.snapshot();
    match outcome {
        Ok(()) => {
            state.notice = None;
            state.mark_dirty();
            vec![Effect::SaveSnapshot(snapshot)]
        }
        Err(err) => {
            state.set_notice(Notice::error(err.to_string()));
            Vec::new()
        }
    }
}

fn cancel_countdown(state: &mut AppState) -> Vec<Effect> {
    let Screen::Drawing(drawing) = &mut state.screen else {
        return Vec::new();
    };
    if drawing.countdown.take().is_none() {
        return Vec::new();
    }
    // A completion that races this message carries a stale id.
    state.set_notice(Notice::info("Countdown cancelled"));
    vec![Effect::CancelCountdown]
}

fn advance(state: &mut AppState, scope: RemovalScope) -> Vec<Effect> {
    navigate(state, |session| session.advance(scope))
}

fn go_back(state: &mut AppState) -> Vec<Effect> {
    navigate(state, DrawSession::go_back)
}

fn navigate(
    state: &mut AppState,
    step: impl FnOnce(&mut DrawSession) -> Result<Phase, DrawError>,
) -> Vec<Effect> {
    let Screen::Drawing(drawing) = &mut state.screen else {
        return Vec::new();
    };
    if let Some(reason) = busy_reason(drawing) {
        state.set_notice(Notice::warning(reason));
        return Vec::new();
    }
    let outcome = step(&mut drawing.session);
    let snapshot = drawing.session.snapshot();
    match outcome {
        Ok(Phase::Completed) => state.set_notice(Notice::info("All draws completed.")),
        Ok(_) => {
            state.notice = None;
            state.mark_dirty();
        }
        Err(err) => {
            state.set_notice(Notice::error(err.to_string()));
            return Vec::new();
        }
    }
    vec![Effect::SaveSnapshot(snapshot)]
}

fn remove_name(state: &mut AppState, name: &str) -> Vec<Effect> {
    let Screen::Drawing(drawing) = &mut state.screen else {
        return Vec::new();
    };
    if name.is_empty() {
        return Vec::new();
    }
    if let Some(reason) = busy_reason(drawing) {
        state.set_notice(Notice::warning(reason));
        return Vec::new();
    }
    let outcome = drawing.session.remove_name(name);
    let snapshot = drawing.session.snapshot();
    match outcome {
        Ok(()) => {
            state.set_notice(Notice::info(format!("'{name}' removed from the list")));
            vec![Effect::SaveSnapshot(snapshot)]
        }
        Err(err @ DrawError::NameNotFound(_)) => {
            state.set_notice(Notice::warning(err.to_string()));
            Vec::new()
        }
        Err(err) => {
            state.set_notice(Notice::error(err.to_string()));
            Vec::new()
        }
    }
}

fn confirm_reset(state: &mut AppState) -> Vec<Effect> {
    let Screen::Drawing(drawing) = &mut state.screen else {
        return Vec::new();
    };
    if !drawing.confirm_reset {
        return Vec::new();
    }
    drawing.confirm_reset = false;
    drawing.reset_pending = true;
    let mut effects = Vec::with_capacity(2);
    if drawing.countdown.take().is_some() {
        effects.push(Effect::CancelCountdown);
    }
    effects.push(Effect::DeletePersisted);
    state.mark_dirty();
    effects
}

fn finish_reset(state: &mut AppState) {
    let pending = matches!(&state.screen, Screen::Drawing(drawing) if drawing.reset_pending);
    if !pending {
        return;
    }
    if let Screen::Drawing(drawing) = std::mem::take(&mut state.screen) {
        let signal = drawing.session.reset();
        state.set_notice(Notice::info(format!(
            "Draw reset; {} drawn rounds discarded",
            signal.rounds_discarded
        )));
    }
}
