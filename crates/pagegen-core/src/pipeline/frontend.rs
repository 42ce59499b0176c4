use std::path::PathBuf;

use crate::error::CoreError;
use crate::ir::PageDefinition;

/// Input to a frontend.
pub struct FrontendInput {
    /// Page definition files, or directories to scan for them.
    pub sources: Vec<PathBuf>,
}

/// Output from a frontend.
pub struct FrontendOutput {
    /// Parsed pages, in a deterministic order.
    pub pages: Vec<PageDefinition>,
    /// Files that could not be read as pages. These do not stop the others.
    pub failures: Vec<SourceFailure>,
}

/// A page file that failed to load.
#[derive(Debug)]
pub struct SourceFailure {
    pub file: PathBuf,
    pub error: CoreError,
}

/// Frontend trait: reads a wire encoding and produces page definitions.
pub trait Frontend {
    /// Name of this frontend (e.g., "json").
    fn name(&self) -> &str;

    /// Read every source into page definitions. `Err` means a source
    /// could not be enumerated at all.
    fn extract(&self, input: FrontendInput) -> Result<FrontendOutput, CoreError>;
}
