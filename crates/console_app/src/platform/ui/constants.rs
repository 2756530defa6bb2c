use console_core::Tone;
use ratatui::style::Color;

pub const TITLE: &str = " peerwire console ";
pub const MODAL_TITLE: &str = " Choose destination ";

pub const MAIN_HINTS: &str =
    "Tab switch field | Enter pick file / browse | F2 browse | Ctrl+U submit | Ctrl+Q quit";
pub const MODAL_HINTS: &str = "Up/Down move | Enter open | Backspace up | s select | Esc close";

pub const MODAL_WIDTH_PERCENT: u16 = 70;
pub const MODAL_HEIGHT_PERCENT: u16 = 70;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::Gray,
        Tone::Accent => Color::Cyan,
        Tone::Success => Color::Green,
        Tone::Error => Color::Red,
    }
}
