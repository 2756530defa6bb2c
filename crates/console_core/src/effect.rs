use std::path::PathBuf;
use std::time::Duration;

/// How long a closed modal stays drawn before it is removed.
pub const MODAL_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Browse {
        token: crate::NavToken,
        path: String,
    },
    /// Deliver `BrowserEvent::FadeElapsed { generation }` after `delay`.
    HideModalAfter { generation: u64, delay: Duration },
    SubmitUpload { file: PathBuf, destination: String },
}
