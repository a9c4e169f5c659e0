use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use switchyard_host::{DebugConfig, DebugHost, DebugLauncher, DebugSessionEvent};

/// Debug launcher that can run several sessions in parallel and still
/// tell them apart.
///
/// The host only exposes global started/terminated events, so every
/// launch stamps its configuration with a fresh marker, subscribes to the
/// event stream before starting, and resolves only when the session
/// carrying its marker terminates (or the run is cancelled). Dropping the
/// subscription on return releases the listener on every exit path.
pub struct SessionDebugLauncher {
    host: Arc<dyn DebugHost>,
}

impl SessionDebugLauncher {
    #[must_use]
    pub fn new(host: Arc<dyn DebugHost>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl DebugLauncher for SessionDebugLauncher {
    async fn launch(&self, mut config: DebugConfig, token: &CancellationToken) -> Result<()> {
        if token.is_cancelled() {
            return Ok(());
        }

        let marker = Uuid::new_v4().to_string();
        config.session_marker = Some(marker.clone());

        // Subscribe before the session can possibly start, or the started
        // event could slip past us.
        let mut events = self.host.subscribe();

        if !self.host.start_debugging(config).await? {
            tracing::error!("Failed to start debug session");
            return Ok(());
        }

        let mut session_id: Option<String> = None;
        loop {
            tokio::select! {
                () = token.cancelled() => return Ok(()),
                event = events.recv() => match event {
                    Ok(DebugSessionEvent::Started { session_id: id, marker: m })
                        if m.as_deref() == Some(marker.as_str()) =>
                    {
                        tracing::debug!("Debug session started: {id}");
                        session_id = Some(id);
                    }
                    Ok(DebugSessionEvent::Terminated { session_id: id })
                        if session_id.as_deref() == Some(id.as_str()) =>
                    {
                        tracing::debug!("Debug session terminated: {id}");
                        return Ok(());
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!("Missed {missed} debug session event(s)");
                    }
                    Err(RecvError::Closed) => return Ok(()),
                },
            }
        }
    }
}
