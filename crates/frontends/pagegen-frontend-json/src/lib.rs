//! Reads page definitions from JSON documents.
//!
//! A source path may name a single `.json` file or a directory, in which
//! case every `*.json` file directly inside it is read in file-name order.
//! A document without a `name` takes its file stem as the logical page name.
//! A file that fails to parse is reported on its own and the rest still load.

use std::fs;
use std::path::{Path, PathBuf};

use pagegen_core::error::CoreError;
use pagegen_core::ir::PageDefinition;
use pagegen_core::pipeline::{Frontend, FrontendInput, FrontendOutput, SourceFailure};
use tracing::{debug, warn};

/// JSON frontend.
pub struct JsonFrontend;

impl Frontend for JsonFrontend {
    fn name(&self) -> &str {
        "json"
    }

    fn extract(&self, input: FrontendInput) -> Result<FrontendOutput, CoreError> {
        let mut pages = Vec::new();
        let mut failures = Vec::new();
        for source in &input.sources {
            for file in collect_page_files(source)? {
                match load_page(&file) {
                    Ok(page) => pages.push(page),
                    Err(error) => {
                        warn!(file = %file.display(), error = %error, "skipping page file");
                        failures.push(SourceFailure { file, error });
                    }
                }
            }
        }
        Ok(FrontendOutput { pages, failures })
    }
}

/// Expand a source path into the page files it denotes.
fn collect_page_files(source: &Path) -> Result<Vec<PathBuf>, CoreError> {
    if !source.is_dir() {
        return Ok(vec![source.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(source)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse one page definition file.
pub fn load_page(path: &Path) -> Result<PageDefinition, CoreError> {
    let json = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let page = parse_page(&json, &stem).map_err(|e| match e {
        CoreError::Json(e) => CoreError::Parse {
            file: path.to_path_buf(),
            message: e.to_string(),
        },
        other => other,
    })?;
    debug!(page = %page.name, file = %path.display(), "loaded page definition");
    Ok(page)
}

/// Parse a page definition from a JSON string. `fallback_name` is used when
/// the document carries no `name`.
pub fn parse_page(json: &str, fallback_name: &str) -> Result<PageDefinition, CoreError> {
    let mut page: PageDefinition = serde_json::from_str(json)?;
    if page.name.is_empty() {
        page.name = fallback_name.to_string();
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r#"{
        "componentTree": { "componentName": "Text", "props": { "text": "\"Home\"" } }
    }"#;

    #[test]
    fn name_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home.json");
        fs::write(&path, HOME).unwrap();

        let page = load_page(&path).unwrap();
        assert_eq!(page.name, "home");
        assert!(page.page_info.fields.is_empty());
    }

    #[test]
    fn explicit_name_wins() {
        let page = parse_page(
            r#"{ "name": "Landing", "componentTree": { "componentName": "Column" } }"#,
            "ignored",
        )
        .unwrap();
        assert_eq!(page.name, "Landing");
        assert_eq!(parse_page(HOME, "home").unwrap().name, "home");
    }

    #[test]
    fn directories_are_read_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_settings.json"), HOME).unwrap();
        fs::write(dir.path().join("a_home.json"), HOME).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a page").unwrap();

        let output = JsonFrontend
            .extract(FrontendInput {
                sources: vec![dir.path().to_path_buf()],
            })
            .unwrap();
        let names: Vec<&str> = output.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a_home", "b_settings"]);
    }

    #[test]
    fn malformed_file_does_not_block_the_others() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_good.json"), HOME).unwrap();
        fs::write(
            dir.path().join("b_bad.json"),
            r#"{ "componentTree": { "props": {} } }"#,
        )
        .unwrap();
        fs::write(dir.path().join("c_good.json"), HOME).unwrap();

        let output = JsonFrontend
            .extract(FrontendInput {
                sources: vec![dir.path().to_path_buf()],
            })
            .unwrap();
        let names: Vec<&str> = output.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a_good", "c_good"]);
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].file, dir.path().join("b_bad.json"));
        assert!(matches!(output.failures[0].error, CoreError::Parse { .. }));
    }

    #[test]
    fn malformed_document_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{ "componentTree": 3 }"#).unwrap();

        let err = load_page(&path).unwrap_err();
        assert!(matches!(err, CoreError::Parse { ref file, .. } if file == &path));
    }
}
