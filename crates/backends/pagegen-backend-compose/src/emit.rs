//! Emission driver: lowers one page into both artifacts and writes them.
//!
//! Generation is all-or-nothing per page. Both sources are rendered in memory
//! first; only then is each staged in a temp file inside the output directory
//! and renamed into place. If the view cannot be placed, the state holder is
//! put back the way it was.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use pagegen_core::error::CoreError;
use pagegen_core::ir::PageDefinition;
use pagegen_core::pipeline::{validate_page, GenerateConfig, GeneratedArtifacts, PageReport};
use pagegen_core::registry::ConstructRegistry;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::names::{source_file_name, state_holder_type, view_function};
use crate::state_holder::lower_state_holder;
use crate::view::lower_view;

/// One generated source file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

/// Both artifacts of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub state_holder: RenderedFile,
    pub view: RenderedFile,
}

/// Validate and lower a page without touching the filesystem.
pub fn render_page(
    page: &PageDefinition,
    registry: &dyn ConstructRegistry,
    config: &GenerateConfig,
) -> Result<RenderedPage, CoreError> {
    validate_page(page, config)?;
    let state_holder = lower_state_holder(page, config)?;
    let view = lower_view(page, registry, config)?;
    Ok(RenderedPage {
        state_holder: RenderedFile {
            file_name: source_file_name(&state_holder_type(&page.name)),
            contents: state_holder,
        },
        view: RenderedFile {
            file_name: source_file_name(&view_function(&page.name)),
            contents: view,
        },
    })
}

/// Generate both artifacts for `page` under `output_root`.
///
/// On any error nothing new is left on disk.
pub fn generate(
    page: &PageDefinition,
    output_root: &Path,
    registry: &dyn ConstructRegistry,
    config: &GenerateConfig,
) -> Result<GeneratedArtifacts, CoreError> {
    let rendered = render_page(page, registry, config)?;
    fs::create_dir_all(output_root)?;
    let artifacts = write_rendered(&rendered, output_root)?;
    info!(
        page = %page.name,
        state_holder = %artifacts.state_holder_path.display(),
        view = %artifacts.view_path.display(),
        "generated page"
    );
    Ok(artifacts)
}

/// Generate every page independently. A failing page is reported and the
/// rest still run. With `dry_run`, pages are only rendered.
///
/// A page whose artifact names were already claimed by an earlier page of
/// the batch fails with `DuplicatePage` instead of overwriting its files.
pub fn generate_batch(
    pages: &[PageDefinition],
    output_root: &Path,
    registry: &dyn ConstructRegistry,
    config: &GenerateConfig,
    dry_run: bool,
) -> Vec<PageReport> {
    let mut claimed = HashSet::new();
    pages
        .iter()
        .map(|page| {
            let outcome = if !claimed.insert(state_holder_type(&page.name)) {
                Err(CoreError::DuplicatePage {
                    name: page.name.clone(),
                })
            } else if dry_run {
                render_page(page, registry, config).map(|_| None)
            } else {
                generate(page, output_root, registry, config).map(Some)
            };
            if let Err(e) = &outcome {
                warn!(page = %page.name, error = %e, "page generation failed");
            }
            PageReport {
                page: page.name.clone(),
                outcome,
            }
        })
        .collect()
}

fn write_rendered(rendered: &RenderedPage, dir: &Path) -> Result<GeneratedArtifacts, CoreError> {
    // Staged files are deleted on drop if anything below fails.
    let holder = stage(dir, &rendered.state_holder.contents)?;
    let view = stage(dir, &rendered.view.contents)?;

    let state_holder_path = dir.join(&rendered.state_holder.file_name);
    let view_path = dir.join(&rendered.view.file_name);
    let previous_holder = read_existing(&state_holder_path)?;

    holder
        .persist(&state_holder_path)
        .map_err(|e| CoreError::Io(e.error))?;
    if let Err(e) = view.persist(&view_path) {
        restore(&state_holder_path, previous_holder.as_deref());
        return Err(CoreError::Io(e.error));
    }

    Ok(GeneratedArtifacts {
        state_holder_path,
        view_path,
    })
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, CoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Put `path` back to `previous`, or remove it if it did not exist.
fn restore(path: &Path, previous: Option<&[u8]>) {
    let result = match previous {
        Some(bytes) => fs::write(path, bytes),
        None => fs::remove_file(path),
    };
    if let Err(e) = result {
        warn!(path = %path.display(), error = %e, "failed to roll back artifact");
    }
}

fn stage(dir: &Path, contents: &str) -> Result<NamedTempFile, CoreError> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    Ok(file)
}
