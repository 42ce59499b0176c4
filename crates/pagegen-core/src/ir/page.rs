use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wire value of the only meaningful action kind.
pub const INVOKE_METHOD_ACTION: &str = "actionName";

/// A complete page definition: page-local state plus the component tree.
///
/// Immutable once parsed; lowering only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDefinition {
    /// Logical page name. Frontends fill this from the file stem when the
    /// document leaves it out.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub page_info: PageInfo,
    pub component_tree: TreeNode,
}

/// Page-local state: fields and methods, both in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl PageInfo {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Whether `name` is a member of the state holder (field or method).
    pub fn has_member(&self, name: &str) -> bool {
        self.field(name).is_some() || self.method(name).is_some()
    }
}

/// One piece of page-local mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    /// Raw literal text, emitted as the cell's initial value.
    pub initial_value: String,
}

/// Primitive kind of a [`Field`].
///
/// Unrecognized wire values are kept in `Unsupported` so that lowering, not
/// parsing, decides that they are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Number,
    String,
    Boolean,
    Unsupported(String),
}

impl From<String> for FieldKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "number" => FieldKind::Number,
            "string" => FieldKind::String,
            "boolean" => FieldKind::Boolean,
            _ => FieldKind::Unsupported(raw),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Number => write!(f, "number"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Unsupported(raw) => write!(f, "{raw}"),
        }
    }
}

/// One page-local behavior. The body is opaque statement text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub body: String,
}

/// A node of the component tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub component_name: String,
    /// Property bindings, kept in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            props: IndexMap::new(),
            events: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth of the subtree rooted here; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    /// Number of nodes in the subtree rooted here.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// An event binding on a node: actions run in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Event {
    pub fn new(event_type: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            event_type: event_type.into(),
            actions,
        }
    }
}

/// A single step of an event handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub action_name: String,
}

impl Action {
    /// An action that invokes the state holder's method `method`.
    pub fn invoke(method: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::InvokeMethod,
            action_name: method.into(),
        }
    }
}

/// What an [`Action`] does. Only method invocation is lowerable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    InvokeMethod,
    Other(String),
}

impl From<String> for ActionKind {
    fn from(raw: String) -> Self {
        if raw == INVOKE_METHOD_ACTION {
            ActionKind::InvokeMethod
        } else {
            ActionKind::Other(raw)
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::InvokeMethod => write!(f, "{INVOKE_METHOD_ACTION}"),
            ActionKind::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Position of a node in the component tree, used to identify the
/// offending node in errors.
///
/// Rendered as `Column/children[1]:Button`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(String);

impl NodePath {
    pub fn root(node: &TreeNode) -> Self {
        Self(node.component_name.clone())
    }

    pub fn child(&self, index: usize, node: &TreeNode) -> Self {
        Self(format!("{}/children[{index}]:{}", self.0, node.component_name))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
