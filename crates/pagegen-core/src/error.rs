use std::path::PathBuf;

/// Core error type for page generation.
///
/// Every lowering error is fatal for the page being generated. Node-level
/// variants carry the offending node's tree path (see [`NodePath`]).
///
/// [`NodePath`]: crate::ir::NodePath
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown component `{name}` at {path}")]
    UnknownComponent { name: String, path: String },

    #[error("unsupported event `{event}` at {path}")]
    UnsupportedEvent { event: String, path: String },

    #[error("unsupported action type `{action}` at {path}")]
    UnsupportedAction { action: String, path: String },

    #[error("unsupported type `{kind}` for field `{field}`")]
    UnsupportedFieldType { field: String, kind: String },

    #[error("action `{action}` at {path} does not name a declared method")]
    UnknownActionTarget { action: String, path: String },

    #[error("`page.{member}` at {path} does not name a declared field or method")]
    UnknownScopeReference { member: String, path: String },

    #[error("duplicate field `{name}`")]
    DuplicateField { name: String },

    #[error("duplicate method `{name}`")]
    DuplicateMethod { name: String },

    #[error("argument `{name}` is bound more than once at {path}")]
    DuplicateArgument { name: String, path: String },

    #[error("page `{name}` generates the same files as an earlier page in this batch")]
    DuplicatePage { name: String },

    #[error("registry version {found} is not supported (this build supports up to version {supported})")]
    UnsupportedRegistryVersion { found: u32, supported: u32 },

    #[error("parse error in {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
