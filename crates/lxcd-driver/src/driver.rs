//! Driver front-end: the capability probe and the two task entry points.
//!
//! `start` provisions a brand-new container for a task; `open` reattaches to
//! a container that kept running while the agent process restarted.
use std::{collections::BTreeMap, path::PathBuf, sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tracing::{debug, info};

use lxcd_model::{ContainerIdentity, TaskSpec, TemplateConfig};

use crate::{
    error::DriverError,
    handle::LxcTaskHandle,
    monitor,
    runtime::{Container, ContainerRuntime, TemplateOptions},
};

/// Node attribute published when the runtime is detected.
pub const ATTR_DRIVER: &str = "driver.lxc";

/// Node attribute carrying the reported runtime version.
pub const ATTR_DRIVER_VERSION: &str = "driver.lxc.version";

/// Static configuration for [`LxcDriver`].
///
/// The storage path is an explicit value threaded in at construction time,
/// never ambient process-wide state.
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Storage path containers are created under.
    pub storage_path: PathBuf,

    /// Ceiling for any task-requested kill timeout.
    pub max_kill_timeout: Duration,
}

/// Capability-detection result published into node attributes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fingerprint {
    /// Runtime detected; attributes to publish on the node.
    Detected { attributes: BTreeMap<String, String> },

    /// Runtime reported no version: the capability is absent, not broken.
    Absent,
}

/// Task driver backed by an external LXC runtime.
pub struct LxcDriver {
    runtime: Arc<dyn ContainerRuntime>,
    config: DriverConfig,
}

impl LxcDriver {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, config: DriverConfig) -> Self {
        Self { runtime, config }
    }

    /// Probe the runtime and report node capability attributes.
    pub fn fingerprint(&self) -> Fingerprint {
        let version = self.runtime.version();
        if version.is_empty() {
            return Fingerprint::Absent;
        }
        let mut attributes = BTreeMap::new();
        attributes.insert(ATTR_DRIVER.to_string(), "1".to_string());
        attributes.insert(ATTR_DRIVER_VERSION.to_string(), version);
        Fingerprint::Detected { attributes }
    }

    /// Start a brand-new container-backed task.
    ///
    /// Decodes and validates the task configuration, derives the container
    /// name as `<taskName>-<allocId>`, creates and starts the container and
    /// returns a running handle with its lifecycle monitor already attached.
    pub async fn start(&self, task: &TaskSpec) -> Result<LxcTaskHandle, DriverError> {
        let config = TemplateConfig::from_value(&task.config).map_err(DriverError::from)?;
        let name = task.container_name();
        let options = TemplateOptions::from(&config);

        debug!(container = %name, template = %config.template, "creating container");
        let container = self
            .runtime
            .create(&name, &self.config.storage_path, &options)
            .await
            .map_err(|source| DriverError::Create {
                name: name.clone(),
                source,
            })?;

        container.start().await.map_err(|source| DriverError::Start {
            name: name.clone(),
            source,
        })?;
        info!(container = %name, "container started");

        let kill_timeout = task.kill_timeout.min(self.config.max_kill_timeout);
        Ok(self.watched_handle(container, self.config.storage_path.clone(), kill_timeout))
    }

    /// Reattach to a container that is already running.
    ///
    /// Decodes the handle token and looks the container up by name; the
    /// container is never re-created or restarted. A token that names no
    /// live container means the task is lost, not recreatable.
    pub async fn open(&self, token: &str) -> Result<LxcTaskHandle, DriverError> {
        let identity = ContainerIdentity::decode(token)?;
        let container = self
            .runtime
            .lookup(&identity.container_name, &identity.storage_path)
            .await
            .ok_or_else(|| DriverError::HandleNotFound {
                name: identity.container_name.clone(),
            })?;
        info!(container = %identity.container_name, "reattached to running container");

        let kill_timeout = identity.kill_timeout().min(self.config.max_kill_timeout);
        Ok(self.watched_handle(container, identity.storage_path, kill_timeout))
    }

    /// Build a handle and spawn its lifecycle monitor.
    fn watched_handle(
        &self,
        container: Arc<dyn Container>,
        storage_path: PathBuf,
        kill_timeout: Duration,
    ) -> LxcTaskHandle {
        let (events_tx, events_rx) = mpsc::channel(1);
        monitor::spawn(Arc::clone(&container), events_tx);
        LxcTaskHandle::new(
            container,
            storage_path,
            kill_timeout,
            self.config.max_kill_timeout,
            events_rx,
        )
    }
}
