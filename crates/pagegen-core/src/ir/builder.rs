use super::page::{Field, FieldKind, Method, PageDefinition, PageInfo, TreeNode};

/// Builder for constructing a [`PageDefinition`] in code.
///
/// Fields and methods keep the order they are added in.
pub struct PageBuilder {
    name: String,
    info: PageInfo,
    tree: Option<TreeNode>,
}

impl PageBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            info: PageInfo::default(),
            tree: None,
        }
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        initial_value: impl Into<String>,
    ) -> Self {
        self.info.fields.push(Field {
            name: name.into(),
            kind,
            initial_value: initial_value.into(),
        });
        self
    }

    pub fn method(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.info.methods.push(Method {
            name: name.into(),
            body: body.into(),
        });
        self
    }

    pub fn tree(mut self, root: TreeNode) -> Self {
        self.tree = Some(root);
        self
    }

    /// Finish the page. A page without an explicit tree gets an empty
    /// `Column` root.
    pub fn build(self) -> PageDefinition {
        PageDefinition {
            name: self.name,
            page_info: self.info,
            component_tree: self.tree.unwrap_or_else(|| TreeNode::new("Column")),
        }
    }
}
