//! Key and paste routing from the terminal into core messages.
//!
//! The terminal has no drag-and-drop, but most emulators paste the path of a
//! file dragged onto the window. A paste that resolves to existing files is
//! treated as a drop; anything else is ordinary text for the focused field.

use std::path::{Path, PathBuf};

use console_core::{
    AppViewModel, BrowserEvent, BrowserPhase, EventDisposition, Msg, SelectedFile, UploadEvent,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    File,
    Destination,
}

/// Input state that only the terminal layer cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub focus: Focus,
    pub file_input: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct Routed {
    pub msgs: Vec<Msg>,
    pub quit: bool,
    /// Local input changed and needs a redraw even without a core update.
    pub redraw: bool,
}

impl Routed {
    fn msg(msg: Msg) -> Self {
        Self {
            msgs: vec![msg],
            ..Self::default()
        }
    }

    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }
}

pub fn handle_key(input: &mut InputState, view: &AppViewModel, key: KeyEvent) -> Routed {
    if key.kind == KeyEventKind::Release {
        return Routed::default();
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return Routed {
            quit: true,
            ..Routed::default()
        };
    }

    if view.browser.phase != BrowserPhase::Closed {
        return handle_modal_key(view, key);
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            input.focus = match input.focus {
                Focus::File => Focus::Destination,
                Focus::Destination => Focus::File,
            };
            return Routed::redraw();
        }
        KeyCode::F(2) => return Routed::msg(open_browser()),
        KeyCode::Char('b') if ctrl => return Routed::msg(open_browser()),
        KeyCode::Char('u') if ctrl => return Routed::msg(Msg::SubmitClicked),
        _ => {}
    }

    match input.focus {
        Focus::File => handle_file_key(input, key),
        Focus::Destination => handle_destination_key(view, key),
    }
}

fn open_browser() -> Msg {
    Msg::Browser(BrowserEvent::Open { initial: None })
}

fn handle_modal_key(view: &AppViewModel, key: KeyEvent) -> Routed {
    let browser = &view.browser;
    let msg = match key.code {
        KeyCode::Esc => BrowserEvent::CloseClicked,
        KeyCode::Up | KeyCode::Char('k') => BrowserEvent::HighlightMoved { delta: -1 },
        KeyCode::Down | KeyCode::Char('j') => BrowserEvent::HighlightMoved { delta: 1 },
        KeyCode::PageUp => BrowserEvent::HighlightMoved { delta: -10 },
        KeyCode::PageDown => BrowserEvent::HighlightMoved { delta: 10 },
        KeyCode::Enter | KeyCode::Right if !browser.rows.is_empty() => {
            BrowserEvent::FolderClicked {
                index: browser.highlighted,
            }
        }
        KeyCode::Backspace | KeyCode::Left => {
            match browser.rows.iter().position(|row| row.name == "..") {
                Some(index) => BrowserEvent::FolderClicked { index },
                None => return Routed::default(),
            }
        }
        KeyCode::Char('s') => BrowserEvent::SelectClicked,
        _ => return Routed::default(),
    };
    Routed::msg(Msg::Browser(msg))
}

fn handle_file_key(input: &mut InputState, key: KeyEvent) -> Routed {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.file_input.push(ch);
            input.hint = None;
            Routed::redraw()
        }
        KeyCode::Backspace => {
            input.file_input.pop();
            Routed::redraw()
        }
        KeyCode::Enter => {
            let path = expand_home(input.file_input.trim());
            if path.is_file() {
                input.file_input.clear();
                input.hint = None;
                Routed::msg(Msg::Upload(UploadEvent::Picked(vec![
                    SelectedFile::from_path(path),
                ])))
            } else {
                input.hint = Some(format!("Not a file: {}", path.display()));
                Routed::redraw()
            }
        }
        _ => Routed::default(),
    }
}

fn handle_destination_key(view: &AppViewModel, key: KeyEvent) -> Routed {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut destination = view.destination.clone();
            destination.push(ch);
            Routed::msg(Msg::DestinationEdited(destination))
        }
        KeyCode::Backspace => {
            let mut destination = view.destination.clone();
            destination.pop();
            Routed::msg(Msg::DestinationEdited(destination))
        }
        KeyCode::Enter => Routed::msg(open_browser()),
        _ => Routed::default(),
    }
}

/// Routes a bracketed paste. Ignored while the directory modal is open.
pub fn handle_paste(input: &mut InputState, view: &AppViewModel, text: &str) -> Routed {
    if view.browser.phase != BrowserPhase::Closed {
        return Routed::default();
    }

    let files: Vec<SelectedFile> = parse_dropped_paths(text)
        .into_iter()
        .filter(|path| path.is_file())
        .map(SelectedFile::from_path)
        .collect();
    if !files.is_empty() {
        let event = UploadEvent::Dropped(files);
        // A drop is consumed; its text must not also land in a field.
        debug_assert_eq!(event.disposition(), EventDisposition::PreventDefault);
        return Routed::msg(Msg::Upload(event));
    }

    let text = text.trim_end_matches(['\r', '\n']);
    match input.focus {
        Focus::File => {
            input.file_input.push_str(text);
            Routed::redraw()
        }
        Focus::Destination => Routed::msg(Msg::DestinationEdited(format!(
            "{}{}",
            view.destination, text
        ))),
    }
}

/// Splits pasted text into paths the way a shell would read a dropped file
/// list: whitespace separated, with quoting, backslash escapes and `file://`
/// URLs.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    split_words(text)
        .into_iter()
        .map(|word| match word.strip_prefix("file://") {
            Some(_) => Url::parse(&word)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .unwrap_or_else(|| PathBuf::from(word)),
            None => expand_home(&word),
        })
        .collect()
}

fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    Path::new(raw).to_path_buf()
}
