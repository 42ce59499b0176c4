pub mod emit;
pub mod kotlin;
pub mod names;
pub mod state_holder;
pub mod types;
pub mod view;

use std::fs;

use pagegen_core::error::CoreError;
use pagegen_core::pipeline::{Backend, BackendInput, PageReport};

pub use emit::{generate, generate_batch, render_page, RenderedFile, RenderedPage};

/// Jetpack Compose codegen backend.
///
/// Emits `<Page>StateHolder.kt` (a `ViewModel` with one `mutableStateOf`
/// cell per field) and `<Page>View.kt` (a `@Composable` function taking
/// the state holder) for every page.
pub struct ComposeBackend;

impl Backend for ComposeBackend {
    fn name(&self) -> &str {
        "compose"
    }

    fn emit(&self, input: BackendInput) -> Result<Vec<PageReport>, CoreError> {
        if !input.dry_run {
            fs::create_dir_all(&input.output_dir)?;
        }
        Ok(generate_batch(
            &input.pages,
            &input.output_dir,
            input.registry.as_ref(),
            &input.config,
            input.dry_run,
        ))
    }
}
