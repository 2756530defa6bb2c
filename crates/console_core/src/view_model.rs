use crate::{BrowserPhase, Tone};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub drop_zone: DropZoneView,
    pub destination: String,
    pub browser: BrowserView,
    pub status: StatusView,
    pub submission: SubmissionView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropZoneView {
    pub label: String,
    pub active: bool,
    pub drag_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowserView {
    pub visible: bool,
    pub fading: bool,
    pub phase: BrowserPhase,
    pub current_path: String,
    pub rows: Vec<FolderRowView>,
    pub highlighted: usize,
    pub error: Option<String>,
    pub can_select: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRowView {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusView {
    pub message: String,
    pub percent_text: String,
    pub bar_width: String,
    /// Raw fill value behind `bar_width`.
    pub percent: f64,
    pub bar_tone: Tone,
    pub badge_text: String,
    pub badge_tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionView {
    pub in_flight: bool,
    pub notice: Option<String>,
    pub failed: bool,
}
