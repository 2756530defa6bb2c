use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use console_logging::{console_debug, console_info};
use tokio::runtime::Runtime;

use crate::poller::{spawn_poller, PollSettings, PollerGuard};
use crate::sink::{ChannelEventSink, EventSink};
use crate::{ClientSettings, ConsoleApi, EngineError, EngineEvent, ReqwestConsoleApi, RequestToken};

enum EngineCommand {
    Browse { token: RequestToken, path: String },
    Upload { file: PathBuf, destination: String },
    Delay { generation: u64, delay: Duration },
}

/// Runs console IO on a private runtime and hands results back over a
/// channel. Nothing here touches console state; callers drain events and
/// apply them on their own thread.
pub struct EngineHandle {
    runtime: Runtime,
    api: Arc<dyn ConsoleApi>,
    sink: Arc<dyn EventSink>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let api = ReqwestConsoleApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn ConsoleApi>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("console-engine")
            .enable_all()
            .build()?;
        let (event_tx, event_rx) = mpsc::channel();

        Ok(Self {
            runtime,
            api,
            sink: Arc::new(ChannelEventSink::new(event_tx)),
            event_rx,
        })
    }

    pub fn browse(&self, token: RequestToken, path: impl Into<String>) {
        self.dispatch(EngineCommand::Browse {
            token,
            path: path.into(),
        });
    }

    pub fn upload(&self, file: PathBuf, destination: impl Into<String>) {
        self.dispatch(EngineCommand::Upload {
            file,
            destination: destination.into(),
        });
    }

    /// Emits [`EngineEvent::DelayElapsed`] once `delay` has passed.
    pub fn schedule(&self, generation: u64, delay: Duration) {
        self.dispatch(EngineCommand::Delay { generation, delay });
    }

    pub fn start_polling(&self, settings: PollSettings) -> PollerGuard {
        spawn_poller(
            self.runtime.handle(),
            self.api.clone(),
            settings,
            self.sink.clone(),
        )
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn dispatch(&self, command: EngineCommand) {
        let api = self.api.clone();
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            handle_command(api.as_ref(), command, sink.as_ref()).await;
        });
    }
}

async fn handle_command(api: &dyn ConsoleApi, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Browse { token, path } => {
            console_debug!("Browse token={} path={:?}", token, path);
            let result = api.browse(&path).await;
            sink.emit(EngineEvent::BrowseCompleted { token, result });
        }
        EngineCommand::Upload { file, destination } => {
            console_info!("Uploading {} to {:?}", file.display(), destination);
            let result = api.upload(&file, &destination).await;
            sink.emit(EngineEvent::UploadCompleted { result });
        }
        EngineCommand::Delay { generation, delay } => {
            tokio::time::sleep(delay).await;
            sink.emit(EngineEvent::DelayElapsed { generation });
        }
    }
}
