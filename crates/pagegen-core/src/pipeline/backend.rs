use std::path::PathBuf;

use crate::error::CoreError;
use crate::ir::PageDefinition;
use crate::registry::ConstructRegistry;

use super::GenerateConfig;

/// Input to a backend.
pub struct BackendInput {
    /// Page definitions to lower. Each is generated independently.
    pub pages: Vec<PageDefinition>,
    /// Output directory for generated code.
    pub output_dir: PathBuf,
    /// Component and event vocabulary used for lowering.
    pub registry: Box<dyn ConstructRegistry>,
    pub config: GenerateConfig,
    /// Lower every page but write nothing.
    pub dry_run: bool,
}

/// Paths of the two artifacts written for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub state_holder_path: PathBuf,
    pub view_path: PathBuf,
}

/// Outcome of generating one page in a batch.
#[derive(Debug)]
pub struct PageReport {
    pub page: String,
    /// `Ok(None)` for a successful dry run.
    pub outcome: Result<Option<GeneratedArtifacts>, CoreError>,
}

impl PageReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Backend trait: emits target code from page definitions.
///
/// A failing page is reported in its `PageReport` and never stops the
/// remaining pages; `Err` is reserved for failures that affect the whole
/// batch (e.g. the output directory cannot be created).
pub trait Backend {
    /// Name of this backend (e.g., "compose").
    fn name(&self) -> &str;

    /// Generate code for every page in the input.
    fn emit(&self, input: BackendInput) -> Result<Vec<PageReport>, CoreError>;
}
