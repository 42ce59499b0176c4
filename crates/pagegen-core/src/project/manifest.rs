use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pipeline::GenerateConfig;

/// Default manifest file name, searched for in ancestor directories.
pub const MANIFEST_FILE_NAME: &str = "pagegen.json";

/// Top-level project manifest (pagegen.json).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    pub name: String,
    /// Page definition files or directories of `*.json` files.
    pub pages: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// Package declared in generated sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Overrides the default `viewModel` binding name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_name: Option<String>,
    /// Construct registry table replacing the built-in vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    #[serde(default)]
    pub strict: bool,
}

impl ProjectManifest {
    /// Resolve relative paths against `base` (the manifest's directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        for page in &mut self.pages {
            if page.is_relative() {
                *page = base.join(&*page);
            }
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        if let Some(registry) = &mut self.registry {
            if registry.is_relative() {
                *registry = base.join(&*registry);
            }
        }
    }

    /// Generation options declared by the manifest.
    pub fn generate_config(&self) -> GenerateConfig {
        let mut config = GenerateConfig::default().strict(self.strict);
        if let Some(package) = &self.package {
            config = config.with_package(package.clone());
        }
        if let Some(binding) = &self.binding_name {
            config = config.with_binding_name(binding.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "name": "demo",
        "pages": ["pages", "/abs/home.json"],
        "outputDir": "build/generated",
        "package": "com.example.demo",
        "registry": "registry.json"
    }"#;

    #[test]
    fn parses_with_defaults() {
        let manifest: ProjectManifest = serde_json::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.name, "demo");
        assert!(!manifest.strict);
        assert!(manifest.binding_name.is_none());

        let config = manifest.generate_config();
        assert_eq!(config.package.as_deref(), Some("com.example.demo"));
        assert_eq!(config.binding_name, "viewModel");
    }

    #[test]
    fn resolves_relative_paths() {
        let mut manifest: ProjectManifest = serde_json::from_str(MANIFEST).unwrap();
        manifest.resolve_paths(Path::new("/project"));
        assert_eq!(manifest.pages[0], PathBuf::from("/project/pages"));
        assert_eq!(manifest.pages[1], PathBuf::from("/abs/home.json"));
        assert_eq!(manifest.output_dir, PathBuf::from("/project/build/generated"));
        assert_eq!(manifest.registry, Some(PathBuf::from("/project/registry.json")));
    }
}
