use crate::{BrowseResult, NavToken, PollSeq, StatusSnapshot, UploadEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    /// User asked for the directory modal; `None` starts from the destination field.
    Open { initial: Option<String> },
    /// User activated a folder row.
    FolderClicked { index: usize },
    /// Keyboard highlight moved by `delta` rows.
    HighlightMoved { delta: isize },
    /// User confirmed the displayed directory.
    SelectClicked,
    /// User dismissed the modal (close button, cancel, or Esc).
    CloseClicked,
    /// Engine delivered a listing.
    Loaded { token: NavToken, result: BrowseResult },
    /// Engine reported a failed browse.
    Failed { token: NavToken, message: String },
    /// Deferred modal removal fired.
    FadeElapsed { generation: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    Polled { seq: PollSeq, snapshot: StatusSnapshot },
    PollFailed { seq: PollSeq, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Upload(UploadEvent),
    Browser(BrowserEvent),
    Status(StatusEvent),
    /// User edited the destination field directly.
    DestinationEdited(String),
    /// User asked to hand the selected file to the engine.
    SubmitClicked,
    /// Engine finished the upload hand-off.
    SubmitFinished(Result<(), String>),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
