mod error;
pub use error::{ModelError, ModelResult};

mod identity;
pub use identity::ContainerIdentity;

mod task;
pub use task::TaskSpec;

mod template;
pub use template::TemplateConfig;
