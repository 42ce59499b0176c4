pub mod backend;
pub mod config;
pub mod frontend;
pub mod validate;

pub use backend::{Backend, BackendInput, GeneratedArtifacts, PageReport};
pub use config::{GenerateConfig, DEFAULT_BINDING_NAME};
pub use frontend::{Frontend, FrontendInput, FrontendOutput, SourceFailure};
pub use validate::validate_page;
