use console_logging::{console_info, console_warn};

use crate::msg::{BrowserEvent, StatusEvent};
use crate::{AppState, BrowseRequest, Effect, Msg, Submission, MODAL_FADE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Upload(event) => {
            if state.upload.handle(event) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Browser(event) => update_browser(&mut state, event),
        Msg::Status(event) => {
            let changed = match event {
                StatusEvent::Polled { seq, snapshot } => state.status.apply_snapshot(seq, snapshot),
                StatusEvent::PollFailed { seq, reason } => state.status.apply_failure(seq, &reason),
            };
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DestinationEdited(text) => {
            if state.destination != text {
                state.destination = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SubmitFinished(result) => {
            state.submission = match result {
                Ok(()) => {
                    console_info!("Upload accepted by engine");
                    Submission::Accepted
                }
                Err(reason) => {
                    console_warn!("Upload failed: {}", reason);
                    Submission::Failed(reason)
                }
            };
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn update_browser(state: &mut AppState, event: BrowserEvent) -> Vec<Effect> {
    match event {
        BrowserEvent::Open { initial } => {
            let path = initial.unwrap_or_else(|| state.destination.clone());
            let request = state.browser.open(&path);
            issue(state, request)
        }
        BrowserEvent::FolderClicked { index } => {
            let Some(path) = state.browser.folder(index).map(|folder| folder.path.clone()) else {
                return Vec::new();
            };
            let request = state.browser.navigate(&path);
            issue(state, request)
        }
        BrowserEvent::HighlightMoved { delta } => {
            if state.browser.move_highlight(delta) {
                state.mark_dirty();
            }
            Vec::new()
        }
        BrowserEvent::SelectClicked => match state.browser.select() {
            Some((path, generation)) => {
                console_info!("Destination selected: {}", path);
                state.destination = path;
                state.mark_dirty();
                vec![hide_after_fade(generation)]
            }
            None => Vec::new(),
        },
        BrowserEvent::CloseClicked => match state.browser.close() {
            Some(generation) => {
                state.mark_dirty();
                vec![hide_after_fade(generation)]
            }
            None => Vec::new(),
        },
        BrowserEvent::Loaded { token, result } => {
            if state.browser.apply_listing(token, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        BrowserEvent::Failed { token, message } => {
            if state.browser.apply_failure(token, message) {
                state.mark_dirty();
            }
            Vec::new()
        }
        BrowserEvent::FadeElapsed { generation } => {
            if state.browser.finish_fade(generation) {
                state.mark_dirty();
            }
            Vec::new()
        }
    }
}

fn issue(state: &mut AppState, request: Option<BrowseRequest>) -> Vec<Effect> {
    match request {
        Some(BrowseRequest { token, path }) => {
            state.mark_dirty();
            vec![Effect::Browse { token, path }]
        }
        None => Vec::new(),
    }
}

fn hide_after_fade(generation: u64) -> Effect {
    Effect::HideModalAfter {
        generation,
        delay: MODAL_FADE,
    }
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.submission == Submission::Submitting {
        return Vec::new();
    }
    let Some(file) = state.upload.selected() else {
        state.submission = Submission::Failed("No file selected".to_string());
        state.mark_dirty();
        return Vec::new();
    };
    let effect = Effect::SubmitUpload {
        file: file.path.clone(),
        destination: state.destination.clone(),
    };
    state.submission = Submission::Submitting;
    state.mark_dirty();
    vec![effect]
}
