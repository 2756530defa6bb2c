//! Console engine: HTTP access to the transfer engine and background tasks.
mod client;
mod engine;
mod poller;
mod sink;
mod types;

pub use client::{ClientSettings, ConsoleApi, ReqwestConsoleApi, DEFAULT_SERVER};
pub use engine::EngineHandle;
pub use poller::{spawn_poller, PollPolicy, PollSettings, PollerGuard, DEFAULT_POLL_INTERVAL};
pub use sink::{ChannelEventSink, EventSink};
pub use types::{
    ApiError, DirectoryEntry, DirectoryListing, EngineError, EngineEvent, FailureKind,
    RequestToken, StatusReport,
};
