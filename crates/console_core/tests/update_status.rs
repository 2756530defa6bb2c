use console_core::{update, AppState, Msg, StatusEvent, StatusSnapshot, Tone};

fn init_logging() {
    console_logging::initialize_for_tests();
}

fn polled(state: AppState, seq: u64, message: &str, percent: f64, running: bool) -> AppState {
    let (state, effects) = update(
        state,
        Msg::Status(StatusEvent::Polled {
            seq,
            snapshot: StatusSnapshot {
                message: message.to_string(),
                percent,
                running,
            },
        }),
    );
    assert!(effects.is_empty());
    state
}

fn failed(state: AppState, seq: u64) -> AppState {
    let (state, _) = update(
        state,
        Msg::Status(StatusEvent::PollFailed {
            seq,
            reason: "connection refused".to_string(),
        }),
    );
    state
}

#[test]
fn scenario_progress_completion_and_disconnect() {
    init_logging();
    // Scenario 4: running at 40%.
    let state = polled(AppState::new(), 1, "Chunk 4/10", 40.0, true);
    let view = state.view().status;
    assert_eq!(view.message, "Chunk 4/10");
    assert_eq!(view.percent_text, "40%");
    assert_eq!(view.bar_width, "40%");
    assert_eq!(view.badge_text, "Downloading");
    assert_eq!(view.badge_tone, Tone::Accent);

    // Scenario 6 (from the running state): a failed poll only touches the badge.
    let disconnected = failed(state.clone(), 2);
    let view = disconnected.view().status;
    assert_eq!(view.badge_text, "Disconnected");
    assert_eq!(view.badge_tone, Tone::Error);
    assert_eq!(view.message, "Chunk 4/10");
    assert_eq!(view.percent_text, "40%");
    assert_eq!(view.bar_width, "40%");

    // Scenario 5: completion.
    let state = polled(state, 3, "", 100.0, false);
    let view = state.view().status;
    assert_eq!(view.badge_text, "Completed");
    assert_eq!(view.badge_tone, Tone::Success);
    assert_eq!(view.bar_tone, Tone::Success);
    assert_eq!(view.bar_width, "100%");
}

#[test]
fn over_one_hundred_is_passed_through() {
    let state = polled(AppState::new(), 1, "overshoot", 137.25, true);
    let view = state.view().status;
    assert_eq!(view.bar_width, "137.25%");
    assert_eq!(view.percent_text, "137%");
    assert_eq!(view.percent, 137.25);
    assert_eq!(view.badge_text, "Completed");
}

#[test]
fn idle_below_one_hundred_keeps_previous_badge() {
    let state = polled(AppState::new(), 1, "Downloading", 55.0, true);
    let state = polled(state, 2, "Paused", 60.0, false);
    let view = state.view().status;
    assert_eq!(view.badge_text, "Downloading");
    assert_eq!(view.message, "Paused");
    assert_eq!(view.percent_text, "60%");

    // Starting from disconnected, the badge stays disconnected too.
    let state = failed(AppState::new(), 1);
    let state = polled(state, 2, "Waiting for torrent...", 0.0, false);
    assert_eq!(state.view().status.badge_text, "Disconnected");
    assert_eq!(state.view().status.message, "Waiting for torrent...");
}

#[test]
fn badge_recovers_after_reconnect() {
    let state = failed(AppState::new(), 1);
    let state = polled(state, 2, "Chunk 1/10", 10.0, true);
    assert_eq!(state.view().status.badge_text, "Downloading");
}

#[test]
fn bar_tone_stays_success_after_completion() {
    let state = polled(AppState::new(), 1, "done", 100.0, false);
    let state = polled(state, 2, "new run", 5.0, true);
    let view = state.view().status;
    assert_eq!(view.badge_text, "Downloading");
    assert_eq!(view.bar_tone, Tone::Success);
}

#[test]
fn older_poll_arriving_late_is_discarded() {
    let state = polled(AppState::new(), 2, "newer", 70.0, true);
    let mut state = polled(state, 1, "older", 20.0, true);
    assert_eq!(state.view().status.message, "newer");
    assert!(state.consume_dirty());

    let mut state = failed(state, 1);
    assert_eq!(state.view().status.badge_text, "Downloading");
    assert!(!state.consume_dirty());
}

#[test]
fn initial_status_is_connecting() {
    let view = AppState::new().view().status;
    assert_eq!(view.badge_text, "Connecting");
    assert_eq!(view.badge_tone, Tone::Neutral);
    assert_eq!(view.percent_text, "0%");
}
