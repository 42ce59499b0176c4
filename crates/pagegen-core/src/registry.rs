//! Construct registry: the vocabulary of components and events the
//! generator knows how to lower.
//!
//! Lookups fail closed. An unknown component or event type is a hard error,
//! never skipped.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::ir::NodePath;

/// Highest registry table version this build understands.
pub const REGISTRY_VERSION: u32 = 1;

/// Emission rule for a component: the target construct it instantiates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructDescriptor {
    /// Fully-qualified target identifier, e.g.
    /// `androidx.compose.material3.Text`.
    pub target: String,
}

impl ConstructDescriptor {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The unqualified name used at call sites.
    pub fn simple_name(&self) -> &str {
        self.target.rsplit('.').next().unwrap_or(&self.target)
    }
}

/// Emission rule for an event type: the callback parameter it binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEmissionRule {
    pub param: String,
}

impl EventEmissionRule {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }
}

/// Lookup interface used by lowering.
///
/// Implementors only provide the raw lookups; the `resolve_*` methods turn a
/// miss into the matching fatal error for the node at `path`.
pub trait ConstructRegistry {
    fn component(&self, name: &str) -> Option<&ConstructDescriptor>;

    fn event(&self, name: &str) -> Option<&EventEmissionRule>;

    fn resolve_component(
        &self,
        name: &str,
        path: &NodePath,
    ) -> Result<&ConstructDescriptor, CoreError> {
        self.component(name)
            .ok_or_else(|| CoreError::UnknownComponent {
                name: name.to_string(),
                path: path.to_string(),
            })
    }

    fn resolve_event_type(
        &self,
        name: &str,
        path: &NodePath,
    ) -> Result<&EventEmissionRule, CoreError> {
        self.event(name).ok_or_else(|| CoreError::UnsupportedEvent {
            event: name.to_string(),
            path: path.to_string(),
        })
    }
}

/// Table-backed registry, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryTable {
    pub version: u32,
    #[serde(default)]
    pub components: IndexMap<String, ConstructDescriptor>,
    #[serde(default)]
    pub events: IndexMap<String, EventEmissionRule>,
}

impl Default for RegistryTable {
    fn default() -> Self {
        Self {
            version: REGISTRY_VERSION,
            components: IndexMap::new(),
            events: IndexMap::new(),
        }
    }
}

impl RegistryTable {
    /// The built-in Compose vocabulary: a vertical stack, a text display
    /// and a clickable button, with click as the only event.
    pub fn compose_default() -> Self {
        Self::default()
            .with_component("Column", "androidx.compose.foundation.layout.Column")
            .with_component("Text", "androidx.compose.material3.Text")
            .with_component("Button", "androidx.compose.material3.Button")
            .with_event("onClick", "onClick")
    }

    pub fn with_component(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.components
            .insert(name.into(), ConstructDescriptor::new(target));
        self
    }

    pub fn with_event(mut self, name: impl Into<String>, param: impl Into<String>) -> Self {
        self.events.insert(name.into(), EventEmissionRule::new(param));
        self
    }

    /// Parse a table from JSON, rejecting versions newer than this build.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let table: Self = serde_json::from_str(json)?;
        table.check_version()?;
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let file = File::open(path)?;
        let table: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| CoreError::Parse {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;
        table.check_version()?;
        debug!(
            path = %path.display(),
            components = table.components.len(),
            events = table.events.len(),
            "loaded registry table"
        );
        Ok(table)
    }

    fn check_version(&self) -> Result<(), CoreError> {
        if self.version > REGISTRY_VERSION {
            return Err(CoreError::UnsupportedRegistryVersion {
                found: self.version,
                supported: REGISTRY_VERSION,
            });
        }
        Ok(())
    }
}

impl ConstructRegistry for RegistryTable {
    fn component(&self, name: &str) -> Option<&ConstructDescriptor> {
        self.components.get(name)
    }

    fn event(&self, name: &str) -> Option<&EventEmissionRule> {
        self.events.get(name)
    }
}
