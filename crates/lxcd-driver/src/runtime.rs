//! Narrow capability surface of the external container runtime.
//!
//! The driver never touches image provisioning, namespaces or cgroups; it
//! only drives the lifecycle operations below against named containers.
use std::{path::Path, sync::Arc, time::Duration};

use async_trait::async_trait;
use thiserror::Error;

use lxcd_model::TemplateConfig;

/// Error reported by the external container runtime.
#[derive(Debug, Error)]
#[error("{operation} failed: {message}")]
pub struct RuntimeError {
    /// Runtime operation that failed (`create`, `start`, ...).
    pub operation: &'static str,
    /// Message as reported by the runtime.
    pub message: String,
}

impl RuntimeError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Create-time options handed to the runtime's template machinery.
///
/// This is the subset of [`TemplateConfig`] the lifecycle client consumes at
/// creation; the remaining fields only steer image download policy and are
/// interpreted by the template script through `template_args`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateOptions {
    pub template: String,
    pub distro: String,
    pub release: String,
    pub arch: String,
    pub flush_cache: bool,
    pub disable_gpg: bool,
    pub template_args: Vec<String>,
}

impl From<&TemplateConfig> for TemplateOptions {
    fn from(config: &TemplateConfig) -> Self {
        Self {
            template: config.template.clone(),
            distro: config.distro.clone(),
            release: config.release.clone(),
            arch: config.arch.clone(),
            flush_cache: config.flush_cache,
            disable_gpg: config.disable_gpg,
            template_args: config.template_args.clone(),
        }
    }
}

/// Lifecycle client for a container runtime.
///
/// Implementations wrap the actual runtime bindings; the driver treats this
/// as an opaque collaborator.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Runtime version string; empty when the runtime is unavailable.
    fn version(&self) -> String;

    /// Create a container named `name` under `storage_path`.
    ///
    /// Creation either completes or fails atomically from the caller's
    /// perspective; there is no mid-flight cancellation.
    async fn create(
        &self,
        name: &str,
        storage_path: &Path,
        options: &TemplateOptions,
    ) -> Result<Arc<dyn Container>, RuntimeError>;

    /// Find an existing container by name under `storage_path`.
    async fn lookup(&self, name: &str, storage_path: &Path) -> Option<Arc<dyn Container>>;
}

/// One container managed by the runtime.
#[async_trait]
pub trait Container: Send + Sync {
    fn name(&self) -> &str;

    async fn start(&self) -> Result<(), RuntimeError>;

    /// Graceful shutdown; fails if the container has not stopped within
    /// `timeout`.
    async fn shutdown(&self, timeout: Duration) -> Result<(), RuntimeError>;

    /// Forced, best-effort immediate termination.
    async fn stop(&self) -> Result<(), RuntimeError>;

    /// Block until the container reaches the stopped state, for at most
    /// `poll_timeout`. Returns `Ok(false)` when the wait elapsed (or woke
    /// spuriously) while the container is still running.
    async fn wait_stopped(&self, poll_timeout: Duration) -> Result<bool, RuntimeError>;
}
