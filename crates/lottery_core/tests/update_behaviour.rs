use std::sync::Once;

use lottery_core::{
    update, AppState, DrawDefinition, DrawSessionConfig, Effect, Msg, Phase, RemovalScope,
    ScreenKind, SessionSnapshot, Severity,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(lottery_logging::initialize_for_tests);
}

fn add_draw(state: AppState, title: &str, main_count: usize, backup_count: usize) -> AppState {
    update(
        state,
        Msg::DrawAdded {
            title: title.to_string(),
            main_count,
            backup_count,
        },
    )
    .0
}

fn submit(state: AppState, names: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::NamesChanged(names.to_string()));
    update(state, Msg::SetupSubmitted)
}

/// Two rounds over six names, drawing immediately after setup.
fn started() -> AppState {
    let state = add_draw(AppState::with_countdown(3), "First", 2, 1);
    let state = add_draw(state, "Second", 1, 0);
    submit(state, "A\nB\nC\nD\nE\nF\n").0
}

/// Id of the countdown started by `effects`.
fn countdown_id(effects: &[Effect]) -> u64 {
    match effects {
        [Effect::StartCountdown { id, .. }] => *id,
        other => panic!("expected a countdown, got {other:?}"),
    }
}

fn draw_now(state: AppState, seed: u64) -> (AppState, Vec<Effect>) {
    let (state, effects) = update(state, Msg::DrawRequested);
    let id = countdown_id(&effects);
    update(state, Msg::CountdownElapsed { id, seed })
}

fn config() -> DrawSessionConfig {
    DrawSessionConfig::new(
        vec!["A".into(), "B".into(), "C".into()],
        vec![DrawDefinition::new("Only", 1, 0)],
    )
    .unwrap()
}

#[test]
fn setup_submission_saves_config_and_starts_session() {
    init_logging();
    let state = add_draw(AppState::new(), "  Prize  ", 2, 1);
    let (mut state, effects) = submit(state, " A\nB\n\nC\nD\n");

    assert_eq!(effects.len(), 2);
    let Effect::SaveConfig(config) = &effects[0] else {
        panic!("expected SaveConfig, got {:?}", effects[0]);
    };
    assert_eq!(config.names(), ["A", "B", "C", "D"]);
    assert_eq!(config.draws(), [DrawDefinition::new("Prize", 2, 1)]);
    assert!(matches!(effects[1], Effect::SaveSnapshot(_)));

    let view = state.view();
    assert_eq!(view.screen, ScreenKind::Drawing);
    let drawing = view.drawing.unwrap();
    assert_eq!(drawing.remaining, 4);
    assert_eq!(drawing.title.as_deref(), Some("Prize"));
    assert_eq!(drawing.phase, Phase::AwaitingDraw(0));
    assert_eq!(drawing.draw_label, "Start draw");
    assert!(drawing.can_draw);
    assert!(!drawing.can_advance);
    assert!(!drawing.can_go_back);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn setup_reports_duplicates_as_warning() {
    let state = add_draw(AppState::new(), "Prize", 1, 0);
    let (state, effects) = submit(state, "A\nB\nA\n");

    assert!(!effects.is_empty());
    let notice = state.view().notice.unwrap();
    assert_eq!(notice.severity, Severity::Warning);
    assert!(notice.text.contains('A'));
    assert_eq!(state.session().unwrap().pool().len(), 2);
}

#[test]
fn setup_blocks_without_draws_or_names() {
    let (state, effects) = submit(AppState::new(), "A\n");
    assert!(effects.is_empty());
    assert_eq!(state.view().screen, ScreenKind::Setup);
    assert_eq!(state.view().notice.unwrap().severity, Severity::Error);

    let state = add_draw(state, "Prize", 1, 0);
    let (state, effects) = submit(state, "  \n\n");
    assert!(effects.is_empty());
    assert_eq!(state.view().screen, ScreenKind::Setup);
    assert_eq!(state.view().notice.unwrap().severity, Severity::Error);
}

#[test]
fn invalid_draw_definitions_are_rejected() {
    let state = add_draw(AppState::new(), "   ", 1, 0);
    let state = add_draw(state, "Zero main", 0, 2);
    let view = state.view();
    assert!(view.setup.unwrap().draws.is_empty());
    assert_eq!(view.notice.unwrap().severity, Severity::Error);

    let state = add_draw(state, "Fine", 3, 2);
    let (state, _) = update(state, Msg::LastDrawRemoved);
    assert!(state.view().setup.unwrap().draws.is_empty());
}

#[test]
fn sample_names_fill_the_names_box() {
    let (state, _) = update(AppState::new(), Msg::SampleNamesRequested);
    assert_eq!(state.view().setup.unwrap().name_count, 15);
}

#[test]
fn draw_goes_through_countdown() {
    init_logging();
    let (state, effects) = update(started(), Msg::DrawRequested);
    assert_eq!(effects, vec![Effect::StartCountdown { id: 1, seconds: 3 }]);
    assert!(state.countdown_active());

    let (state, effects) = update(state, Msg::CountdownTick { id: 1, remaining: 2 });
    assert!(effects.is_empty());
    let drawing = state.view().drawing.unwrap();
    assert_eq!(drawing.countdown, Some(2));
    assert!(!drawing.can_draw);
    assert!(!drawing.can_go_back);

    // A second press while counting down is ignored.
    let (state, effects) = update(state, Msg::DrawRequested);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::CountdownElapsed { id: 1, seed: 17 });
    assert!(matches!(effects.as_slice(), [Effect::SaveSnapshot(_)]));
    let drawing = state.view().drawing.unwrap();
    assert_eq!(drawing.countdown, None);
    assert_eq!(drawing.phase, Phase::Drawn(0));
    assert_eq!(drawing.draw_label, "Draw again");
    let result = drawing.result.unwrap();
    assert_eq!(result.main_winners.len(), 2);
    assert_eq!(result.backup_winners.len(), 1);
    assert!(drawing.can_advance);
}

#[test]
fn same_seed_draws_same_winners() {
    let (first, _) = draw_now(started(), 5);
    let (second, _) = draw_now(started(), 5);
    assert_eq!(
        first.view().drawing.unwrap().result,
        second.view().drawing.unwrap().result
    );
}

#[test]
fn cancelled_countdown_never_draws() {
    let (state, effects) = update(started(), Msg::DrawRequested);
    let id = countdown_id(&effects);
    let (state, effects) = update(state, Msg::CountdownCancelled);
    assert_eq!(effects, vec![Effect::CancelCountdown]);
    assert!(!state.countdown_active());

    // A completion racing the cancel is dropped.
    let (state, effects) = update(state, Msg::CountdownElapsed { id, seed: 3 });
    assert!(effects.is_empty());
    assert_eq!(state.view().drawing.unwrap().phase, Phase::AwaitingDraw(0));
    assert!(state.session().unwrap().history().is_empty());
}

#[test]
fn stale_completion_does_not_finish_a_new_countdown() {
    let (state, effects) = update(started(), Msg::DrawRequested);
    let first = countdown_id(&effects);
    let (state, _) = update(state, Msg::CountdownCancelled);
    let (state, effects) = update(state, Msg::DrawRequested);
    let second = countdown_id(&effects);
    assert_ne!(first, second);

    let (state, effects) = update(state, Msg::CountdownTick { id: first, remaining: 1 });
    assert!(effects.is_empty());
    assert_eq!(state.view().drawing.unwrap().countdown, Some(3));

    let (state, effects) = update(state, Msg::CountdownElapsed { id: first, seed: 3 });
    assert!(effects.is_empty());
    assert!(state.countdown_active());
    assert!(state.session().unwrap().history().is_empty());

    let (state, effects) = update(state, Msg::CountdownElapsed { id: second, seed: 3 });
    assert!(matches!(effects.as_slice(), [Effect::SaveSnapshot(_)]));
    assert!(!state.countdown_active());
    assert_eq!(state.view().drawing.unwrap().phase, Phase::Drawn(0));
}

#[test]
fn insufficient_candidates_do_not_start_countdown() {
    let state = add_draw(AppState::new(), "Big", 3, 2);
    let (state, _) = submit(state, "A\nB\nC\n");
    let (state, effects) = update(state, Msg::DrawRequested);

    assert!(effects.is_empty());
    assert!(!state.countdown_active());
    assert_eq!(state.view().notice.unwrap().severity, Severity::Error);
}

#[test]
fn advance_back_and_forward_reuses_result() {
    init_logging();
    let (state, _) = draw_now(started(), 11);
    let drawn = state.view().drawing.unwrap().result.unwrap();

    let (state, effects) = update(state, Msg::AdvanceClicked(RemovalScope::MainOnly));
    assert!(matches!(effects.as_slice(), [Effect::SaveSnapshot(_)]));
    let drawing = state.view().drawing.unwrap();
    assert_eq!(drawing.phase, Phase::AwaitingDraw(1));
    assert_eq!(drawing.round_number, 2);
    assert_eq!(drawing.remaining, 4);
    assert!(drawing.can_go_back);

    let (state, _) = update(state, Msg::BackClicked);
    let drawing = state.view().drawing.unwrap();
    assert_eq!(drawing.phase, Phase::Drawn(0));
    assert_eq!(drawing.result.as_ref(), Some(&drawn));
    assert_eq!(drawing.remaining, 4);

    let (state, _) = update(state, Msg::AdvanceClicked(RemovalScope::MainAndBackup));
    let drawing = state.view().drawing.unwrap();
    assert_eq!(drawing.remaining, 3);
    assert_eq!(state.session().unwrap().history()[&0], drawn);
}

#[test]
fn navigation_is_blocked_during_countdown() {
    let (state, _) = draw_now(started(), 1);
    let (state, _) = update(state, Msg::DrawRequested);
    let (state, effects) = update(state, Msg::AdvanceClicked(RemovalScope::MainOnly));

    assert!(effects.is_empty());
    assert_eq!(state.session().unwrap().current_index(), 0);
    assert_eq!(state.view().notice.unwrap().severity, Severity::Warning);
}

#[test]
fn completing_all_rounds_reports_completion() {
    let (state, _) = draw_now(started(), 2);
    let (state, _) = update(state, Msg::AdvanceClicked(RemovalScope::MainAndBackup));
    let (state, _) = draw_now(state, 3);
    let (state, _) = update(state, Msg::AdvanceClicked(RemovalScope::MainOnly));

    let view = state.view();
    let drawing = view.drawing.unwrap();
    assert_eq!(drawing.phase, Phase::Completed);
    assert_eq!(drawing.title, None);
    assert!(!drawing.can_draw);
    assert!(!drawing.can_advance);
    assert!(drawing.can_go_back);
    assert_eq!(view.notice.unwrap().text, "All draws completed.");

    let (state, effects) = update(state, Msg::DrawRequested);
    assert!(effects.is_empty());
    assert_eq!(state.view().notice.unwrap().severity, Severity::Error);
}

#[test]
fn remove_name_updates_pool_and_reports_missing() {
    let (state, effects) = update(started(), Msg::RemoveNameSubmitted(" C ".to_string()));
    assert!(matches!(effects.as_slice(), [Effect::SaveSnapshot(_)]));
    assert_eq!(state.view().drawing.unwrap().remaining, 5);
    assert_eq!(state.view().notice.unwrap().severity, Severity::Info);

    let (state, effects) = update(state, Msg::RemoveNameSubmitted("Z".to_string()));
    assert!(effects.is_empty());
    assert_eq!(state.view().drawing.unwrap().remaining, 5);
    assert_eq!(state.view().notice.unwrap().severity, Severity::Warning);
}

#[test]
fn remove_name_is_refused_during_countdown() {
    let (state, _) = update(started(), Msg::DrawRequested);
    let (state, effects) = update(state, Msg::RemoveNameSubmitted("C".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.view().drawing.unwrap().remaining, 6);
    assert_eq!(state.view().notice.unwrap().severity, Severity::Warning);
    assert!(state.countdown_active());
}

#[test]
fn overflowing_counts_are_rejected_at_setup() {
    let state = add_draw(AppState::new(), "Huge", usize::MAX, 1);
    let view = state.view();
    assert!(view.setup.unwrap().draws.is_empty());
    assert_eq!(view.notice.unwrap().severity, Severity::Error);
}

#[test]
fn huge_count_reports_insufficient_candidates() {
    let state = add_draw(AppState::new(), "Huge", usize::MAX, 0);
    let (state, _) = submit(state, "A
B
");
    let (state, effects) = update(state, Msg::DrawRequested);

    assert!(effects.is_empty());
    assert!(!state.countdown_active());
    assert_eq!(state.view().notice.unwrap().severity, Severity::Error);
}

#[test]
fn show_pool_toggles_listing() {
    let (state, _) = update(started(), Msg::ShowPoolToggled);
    assert_eq!(state.view().drawing.unwrap().pool.unwrap().len(), 6);
    let (state, _) = update(state, Msg::ShowPoolToggled);
    assert_eq!(state.view().drawing.unwrap().pool, None);
}

#[test]
fn reset_requires_confirmation_and_storage_ack() {
    let (state, _) = draw_now(started(), 8);

    let (state, effects) = update(state, Msg::ResetConfirmed);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::ResetClicked);
    assert!(state.view().drawing.unwrap().confirm_reset);
    let (state, _) = update(state, Msg::ResetDeclined);
    assert!(!state.view().drawing.unwrap().confirm_reset);

    let (state, _) = update(state, Msg::ResetClicked);
    let (state, effects) = update(state, Msg::ResetConfirmed);
    assert_eq!(effects, vec![Effect::DeletePersisted]);
    // Still on the draw screen until storage confirms.
    assert_eq!(state.view().screen, ScreenKind::Drawing);

    let (state, _) = update(state, Msg::PersistedDeleted);
    let view = state.view();
    assert_eq!(view.screen, ScreenKind::Setup);
    assert!(view.setup.unwrap().draws.is_empty());
    assert!(state.session().is_none());
}

#[test]
fn failed_delete_keeps_session() {
    let (state, _) = draw_now(started(), 8);
    let before = state.session().cloned();
    let (state, _) = update(state, Msg::ResetClicked);
    let (state, _) = update(state, Msg::ResetConfirmed);
    let (state, _) = update(state, Msg::StorageFailed("disk full".to_string()));

    assert_eq!(state.session().cloned(), before);
    assert_eq!(state.view().notice.unwrap().severity, Severity::Error);

    // Not pending anymore, so a late acknowledgement does nothing.
    let (state, _) = update(state, Msg::PersistedDeleted);
    assert_eq!(state.view().screen, ScreenKind::Drawing);
}

#[test]
fn reset_during_countdown_cancels_it() {
    let (state, _) = update(started(), Msg::DrawRequested);
    let (state, _) = update(state, Msg::ResetClicked);
    let (_state, effects) = update(state, Msg::ResetConfirmed);
    assert_eq!(effects, vec![Effect::CancelCountdown, Effect::DeletePersisted]);
}

#[test]
fn loaded_config_starts_fresh_session() {
    let (state, effects) = update(AppState::new(), Msg::ConfigLoaded(config()));
    assert!(matches!(effects.as_slice(), [Effect::SaveSnapshot(_)]));
    let drawing = state.view().drawing.unwrap();
    assert_eq!(drawing.phase, Phase::AwaitingDraw(0));
    assert_eq!(drawing.remaining, 3);
}

#[test]
fn restored_session_resumes_or_falls_back() {
    let snapshot = SessionSnapshot {
        names: Some(vec!["A".into(), "B".into(), "C".into()]),
        pool: Some(vec!["B".into()]),
        current_index: Some(1),
        history: Some(Default::default()),
    };
    let (state, _) = update(
        AppState::new(),
        Msg::SessionRestored {
            config: config(),
            snapshot: snapshot.clone(),
        },
    );
    let drawing = state.view().drawing.unwrap();
    assert_eq!(drawing.phase, Phase::Completed);
    assert_eq!(drawing.remaining, 1);

    let broken = SessionSnapshot {
        current_index: Some(9),
        ..snapshot
    };
    let (state, _) = update(
        AppState::new(),
        Msg::SessionRestored {
            config: config(),
            snapshot: broken,
        },
    );
    let view = state.view();
    assert_eq!(view.drawing.unwrap().phase, Phase::AwaitingDraw(0));
    assert_eq!(view.notice.unwrap().severity, Severity::Warning);
}

#[test]
fn quit_cancels_running_countdown() {
    let (state, _) = update(started(), Msg::DrawRequested);
    let (_state, effects) = update(state, Msg::QuitClicked);
    assert_eq!(effects, vec![Effect::CancelCountdown, Effect::Quit]);
}
