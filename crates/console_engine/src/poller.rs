//! Status polling task with an explicit lifetime.
//!
//! [`spawn_poller`] starts a task that requests `/status` on a fixed
//! interval and reports each result with a sequence number. The task runs
//! until its [`PollerGuard`] is stopped or dropped.

use std::sync::Arc;
use std::time::Duration;

use console_logging::console_info;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{ConsoleApi, EngineEvent, EventSink, RequestToken};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PollPolicy {
    /// Skip ticks while the previous request is still outstanding.
    #[default]
    SingleFlight,
    /// Issue a request on every tick, even if earlier ones have not returned.
    Overlapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub policy: PollPolicy,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            policy: PollPolicy::default(),
        }
    }
}

/// Owns a running poller. Dropping the guard cancels it.
pub struct PollerGuard {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerGuard {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancels the poller and waits until its task has exited. Requests
    /// started under the overlapping policy are cancelled too.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerGuard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub fn spawn_poller(
    runtime: &Handle,
    api: Arc<dyn ConsoleApi>,
    settings: PollSettings,
    sink: Arc<dyn EventSink>,
) -> PollerGuard {
    let cancel = CancellationToken::new();
    let task = runtime.spawn(run_poller(api, settings, sink, cancel.clone()));
    PollerGuard {
        cancel,
        task: Some(task),
    }
}

async fn run_poller(
    api: Arc<dyn ConsoleApi>,
    settings: PollSettings,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    console_info!(
        "Status poller started interval={:?} policy={:?}",
        settings.interval,
        settings.policy
    );
    // `interval` panics on a zero period.
    let mut ticker = time::interval(settings.interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut seq: RequestToken = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }
        seq += 1;

        match settings.policy {
            PollPolicy::SingleFlight => {
                let result = tokio::select! {
                    _ = cancel.cancelled() => break,
                    result = api.status() => result,
                };
                sink.emit(EngineEvent::StatusPolled { seq, result });
            }
            PollPolicy::Overlapping => {
                let api = api.clone();
                let sink = sink.clone();
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        result = api.status() => sink.emit(EngineEvent::StatusPolled { seq, result }),
                    }
                });
            }
        }
    }

    console_info!("Status poller stopped after {} polls", seq);
}
