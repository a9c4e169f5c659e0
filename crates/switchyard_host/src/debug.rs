use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use switchyard_project::TestFramework;
use switchyard_project::path::SystemPathBuf;

/// A debug configuration handed to the host's debug service.
///
/// `session_marker` is stamped by the launcher immediately before the
/// session is started; the host is expected to echo it back on the
/// started event for that session.
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    pub name: String,
    pub cwd: Option<SystemPathBuf>,
    pub framework: Option<TestFramework>,
    pub session_marker: Option<String>,
}

impl DebugConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Host debug-session lifecycle events. These are global: every listener
/// sees every session, and has to filter for the ones it launched.
#[derive(Debug, Clone)]
pub enum DebugSessionEvent {
    Started {
        session_id: String,
        marker: Option<String>,
    },
    Terminated {
        session_id: String,
    },
}

/// The host editor's debug service.
#[async_trait]
pub trait DebugHost: Send + Sync {
    /// Subscribes to the global session event stream. Dropping the
    /// receiver is the release half of the subscription.
    fn subscribe(&self) -> broadcast::Receiver<DebugSessionEvent>;

    /// Asks the host to start a debug session for `config`. Returns
    /// whether the session was started at all; termination is reported
    /// through the event stream.
    async fn start_debugging(&self, config: DebugConfig) -> Result<bool>;
}

/// The contract execution adapters use to debug tests. Resolves when the
/// launched session has terminated or the token was cancelled.
#[async_trait]
pub trait DebugLauncher: Send + Sync {
    async fn launch(&self, config: DebugConfig, token: &CancellationToken) -> Result<()>;
}
