use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Declarative description of a task execution handed to the driver.
///
/// `TaskSpec` carries the identity of one task instance inside an allocation
/// plus the raw, driver-specific configuration table. The driver decodes
/// `config` into its own typed surface before any container is created.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    /// Logical task name within the allocation.
    pub name: String,

    /// Allocation identifier this task instance belongs to.
    pub alloc_id: String,

    /// Requested graceful-shutdown grace period.
    ///
    /// The driver clamps this to its configured ceiling.
    pub kill_timeout: Duration,

    /// Raw driver configuration table from the job definition.
    #[serde(default)]
    pub config: serde_json::Value,
}

impl TaskSpec {
    /// Container name for this task instance.
    ///
    /// Derived deterministically as `<taskName>-<allocId>`, which keeps names
    /// unique across concurrent instances sharing the same task name.
    pub fn container_name(&self) -> String {
        format!("{}-{}", self.name, self.alloc_id)
    }
}
