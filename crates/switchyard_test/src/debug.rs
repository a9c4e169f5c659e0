use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use switchyard_host::{DebugConfig, DebugHost, DebugSessionEvent};

/// How a [`ScriptedDebugHost`] reacts to `start_debugging`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DebugHostBehavior {
    /// Start the session and immediately emit started + terminated.
    AutoTerminate,
    /// Start the session and emit only the started event; the test emits
    /// the rest through [`ScriptedDebugHost::emit`].
    StartOnly,
    /// Report that no session could be started.
    RefuseToStart,
    /// Fail the start call outright.
    FailToStart,
}

/// In-memory debug host with a broadcast event stream, scriptable per
/// test.
pub struct ScriptedDebugHost {
    events: broadcast::Sender<DebugSessionEvent>,
    behavior: DebugHostBehavior,
    launched: Mutex<Vec<DebugConfig>>,
    sessions: Mutex<Vec<String>>,
}

impl ScriptedDebugHost {
    #[must_use]
    pub fn new(behavior: DebugHostBehavior) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            events,
            behavior,
            launched: Mutex::new(Vec::new()),
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// Configs passed to `start_debugging`, in launch order.
    #[must_use]
    pub fn launched(&self) -> Vec<DebugConfig> {
        self.launched.lock().unwrap().clone()
    }

    /// Session ids this host generated, in start order.
    #[must_use]
    pub fn sessions(&self) -> Vec<String> {
        self.sessions.lock().unwrap().clone()
    }

    /// Emits a raw session event to every subscriber.
    pub fn emit(&self, event: DebugSessionEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl DebugHost for ScriptedDebugHost {
    fn subscribe(&self) -> broadcast::Receiver<DebugSessionEvent> {
        self.events.subscribe()
    }

    async fn start_debugging(&self, config: DebugConfig) -> Result<bool> {
        let marker = config.session_marker.clone();
        self.launched.lock().unwrap().push(config);

        match self.behavior {
            DebugHostBehavior::FailToStart => Err(anyhow!("debug adapter unavailable")),
            DebugHostBehavior::RefuseToStart => Ok(false),
            DebugHostBehavior::StartOnly => {
                let session_id = Uuid::new_v4().to_string();
                self.sessions.lock().unwrap().push(session_id.clone());
                self.emit(DebugSessionEvent::Started { session_id, marker });
                Ok(true)
            }
            DebugHostBehavior::AutoTerminate => {
                let session_id = Uuid::new_v4().to_string();
                self.sessions.lock().unwrap().push(session_id.clone());
                self.emit(DebugSessionEvent::Started {
                    session_id: session_id.clone(),
                    marker,
                });
                self.emit(DebugSessionEvent::Terminated { session_id });
                Ok(true)
            }
        }
    }
}
