use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Minimal identifying state of a running container.
///
/// This is the *sole* information needed to rediscover a container after the
/// managing agent process restarts: the container name, the runtime storage
/// path it lives under, and the last negotiated kill timeout. The serialized
/// form is handed to the surrounding framework as an opaque token and
/// round-tripped verbatim through [`encode`](Self::encode) /
/// [`decode`](Self::decode).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerIdentity {
    /// Container name, derived as `<taskName>-<allocId>` at creation time.
    pub container_name: String,

    /// Runtime storage path the container was created under.
    pub storage_path: PathBuf,

    /// Graceful-shutdown grace period, in nanoseconds.
    pub kill_timeout_nanoseconds: u64,
}

impl ContainerIdentity {
    /// Build an identity for a container known under `container_name`.
    pub fn new(
        container_name: impl Into<String>,
        storage_path: impl Into<PathBuf>,
        kill_timeout: Duration,
    ) -> Self {
        Self {
            container_name: container_name.into(),
            storage_path: storage_path.into(),
            kill_timeout_nanoseconds: kill_timeout.as_nanos() as u64,
        }
    }

    /// Kill timeout as a [`Duration`].
    pub fn kill_timeout(&self) -> Duration {
        Duration::from_nanos(self.kill_timeout_nanoseconds)
    }

    /// Serialize the identity into an opaque handle token.
    pub fn encode(&self) -> Result<String, ModelError> {
        serde_json::to_string(self).map_err(|e| ModelError::HandleEncode(e.to_string()))
    }

    /// Reconstruct an identity from a handle token.
    ///
    /// Fails with [`ModelError::MalformedHandle`] when the token is not valid
    /// JSON or is missing a required field; callers surface this instead of
    /// defaulting.
    pub fn decode(token: &str) -> Result<Self, ModelError> {
        serde_json::from_str(token).map_err(|e| ModelError::MalformedHandle(e.to_string()))
    }
}
