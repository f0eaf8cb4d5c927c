use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use lxcd_model::ContainerIdentity;

use crate::{error::DriverError, monitor::TerminalEvent, runtime::Container};

/// Resource-usage snapshot for a container-backed task.
///
/// The lifecycle surface of the runtime exposes no per-container accounting,
/// so the driver reports an explicit unsupported marker instead of an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatsSnapshot {
    /// Telemetry is not available for this driver.
    Unsupported,
}

/// Stateful handle bound to one container-backed task execution.
///
/// Composes the lifecycle monitor (spawned by the driver front-end) and the
/// identity codec, and exposes the task-driver contract to the surrounding
/// framework: identity, completion channel, live-update, kill and a
/// resource-usage snapshot.
///
/// A handle is running from the moment it is constructed. `kill` moves the
/// container towards termination; the terminal event observed through
/// [`wait`](Self::wait) is what marks the execution as actually finished.
pub struct LxcTaskHandle {
    container: Arc<dyn Container>,
    storage_path: PathBuf,
    /// Guarded because `update` may race `kill`/`id` across tasks.
    kill_timeout: Mutex<Duration>,
    max_kill_timeout: Duration,
    events: tokio::sync::Mutex<mpsc::Receiver<TerminalEvent>>,
}

impl std::fmt::Debug for LxcTaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LxcTaskHandle")
            .field("container", &self.container.name())
            .field("storage_path", &self.storage_path)
            .field("kill_timeout", &self.kill_timeout)
            .field("max_kill_timeout", &self.max_kill_timeout)
            .finish_non_exhaustive()
    }
}

impl LxcTaskHandle {
    pub(crate) fn new(
        container: Arc<dyn Container>,
        storage_path: PathBuf,
        kill_timeout: Duration,
        max_kill_timeout: Duration,
        events: mpsc::Receiver<TerminalEvent>,
    ) -> Self {
        Self {
            container,
            storage_path,
            kill_timeout: Mutex::new(kill_timeout),
            max_kill_timeout,
            events: tokio::sync::Mutex::new(events),
        }
    }

    /// Name of the container this handle is bound to.
    pub fn container_name(&self) -> &str {
        self.container.name()
    }

    /// Encode the current container identity as an opaque handle token.
    ///
    /// Reflects any `update`-driven timeout change, so a later `open`
    /// reconstructs the latest negotiated timeout rather than the original.
    pub fn id(&self) -> Result<String, DriverError> {
        let identity = ContainerIdentity::new(
            self.container.name(),
            self.storage_path.clone(),
            self.current_kill_timeout(),
        );
        identity.encode().map_err(DriverError::from)
    }

    /// Renegotiate the kill timeout.
    ///
    /// A zero request leaves the previous value unchanged; a non-zero request
    /// is clamped so the effective timeout never exceeds the configured
    /// ceiling. Idempotent.
    pub fn update(&self, requested: Duration) {
        if requested.is_zero() {
            return;
        }
        let effective = requested.min(self.max_kill_timeout);
        *self.lock_kill_timeout() = effective;
    }

    /// Terminate the container.
    ///
    /// Attempts a graceful shutdown bounded by the current kill timeout and
    /// escalates to a forced stop when the container has not stopped in
    /// time. The completion channel, fed by the lifecycle monitor, is the
    /// single source of truth for "actually exited": `kill` reports `Ok`
    /// even when the forced stop fails, and the degraded termination is
    /// logged for operators because the container may then still be running.
    pub async fn kill(&self) -> Result<(), DriverError> {
        let name = self.container.name().to_string();
        let timeout = self.current_kill_timeout();

        info!(container = %name, timeout = ?timeout, "shutting down container");
        if let Err(e) = self.container.shutdown(timeout).await {
            warn!(container = %name, error = %e, "graceful shutdown failed, forcing stop");
            if let Err(e) = self.container.stop().await {
                error!(
                    container = %name,
                    error = %e,
                    "forced stop failed, container may still be running"
                );
            }
        }
        Ok(())
    }

    /// Receive the terminal completion event.
    ///
    /// Yields the event at most once; the channel closes right after and
    /// every further call returns `None` immediately. Callers selecting on
    /// this should still guard with their own timeout.
    pub async fn wait(&self) -> Option<TerminalEvent> {
        self.events.lock().await.recv().await
    }

    /// Resource-usage snapshot for this task.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot::Unsupported
    }

    fn current_kill_timeout(&self) -> Duration {
        *self.lock_kill_timeout()
    }

    fn lock_kill_timeout(&self) -> std::sync::MutexGuard<'_, Duration> {
        self.kill_timeout.lock().unwrap_or_else(|e| e.into_inner())
    }
}
