//! Core of the page-definition code generator: the page IR, the construct
//! registry, bound expressions, validation, and the frontend/backend seams.

pub mod binding;
pub mod error;
pub mod ir;
pub mod pipeline;
pub mod project;
pub mod registry;

pub use error::CoreError;
pub use registry::{ConstructDescriptor, ConstructRegistry, EventEmissionRule, RegistryTable};
