//! Background watcher that detects container termination exactly once.
use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tracing::{debug, error, warn};

use crate::runtime::Container;

/// How long a single runtime wait call may block before being re-issued.
const WAIT_POLL_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// First retry delay after a failed wait call.
const RETRY_BACKOFF_FIRST: Duration = Duration::from_secs(1);

/// Upper bound for the retry delay.
const RETRY_BACKOFF_MAX: Duration = Duration::from_secs(30);

/// Consecutive wait failures tolerated before the container is presumed
/// stuck and the monitor gives up.
const MAX_WAIT_FAILURES: u32 = 10;

/// Terminal completion record published once the container is observed
/// stopped.
///
/// Carries no exit status: the lifecycle surface of the runtime does not
/// report one.
#[derive(Clone, Debug)]
pub struct TerminalEvent {
    /// Name of the container that stopped.
    pub container: String,
}

/// Spawn the lifecycle monitor for `container`.
///
/// The monitor blocks on the runtime's bounded wait primitive in a loop and
/// publishes exactly one [`TerminalEvent`] when the container reaches the
/// stopped state, then closes the channel by dropping the sender. It runs on
/// its own task so `start`/`open` return without blocking on container exit,
/// and it self-terminates after publishing.
pub(crate) fn spawn(
    container: Arc<dyn Container>,
    events: mpsc::Sender<TerminalEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move { run(container, events).await })
}

async fn run(container: Arc<dyn Container>, events: mpsc::Sender<TerminalEvent>) {
    let name = container.name().to_string();
    let mut failures: u32 = 0;
    let mut backoff = RETRY_BACKOFF_FIRST;

    loop {
        match container.wait_stopped(WAIT_POLL_TIMEOUT).await {
            Ok(true) => break,
            Ok(false) => {
                // Bounded wait elapsed or woke spuriously; re-issue it.
                debug!(container = %name, "wait returned without stop, re-issuing");
                failures = 0;
                backoff = RETRY_BACKOFF_FIRST;
            }
            Err(e) => {
                failures += 1;
                if failures >= MAX_WAIT_FAILURES {
                    error!(
                        container = %name,
                        error = %e,
                        "monitor stuck: wait retries exhausted, giving up without completion"
                    );
                    return;
                }
                warn!(container = %name, error = %e, "wait call failed, retrying");
                sleep(backoff).await;
                backoff = (backoff * 2).min(RETRY_BACKOFF_MAX);
            }
        }
    }

    debug!(container = %name, "container stopped");
    let _ = events.send(TerminalEvent { container: name }).await;
}
