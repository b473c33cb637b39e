use lottery_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn drawing_messages_are_ignored_during_setup() {
    let state = AppState::new();
    for msg in [
        Msg::DrawRequested,
        Msg::CountdownElapsed { id: 1, seed: 1 },
        Msg::BackClicked,
        Msg::ResetConfirmed,
        Msg::PersistedDeleted,
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}
