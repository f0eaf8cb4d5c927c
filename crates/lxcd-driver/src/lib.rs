mod error;
pub use error::DriverError;

mod runtime;
pub use runtime::{Container, ContainerRuntime, RuntimeError, TemplateOptions};

mod monitor;
pub use monitor::TerminalEvent;

mod handle;
pub use handle::{LxcTaskHandle, StatsSnapshot};

mod driver;
pub use driver::{ATTR_DRIVER, ATTR_DRIVER_VERSION, DriverConfig, Fingerprint, LxcDriver};
