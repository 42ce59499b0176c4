use std::collections::HashSet;

use crate::binding::{BoundExpr, PAGE_SCOPE_PREFIX};
use crate::error::CoreError;
use crate::ir::{ActionKind, NodePath, PageDefinition, PageInfo, TreeNode};

use super::GenerateConfig;

/// Check page-level invariants before lowering.
///
/// Field and method names must be unique. In strict mode, every
/// `actionName` must name a declared method and every `page.<member>`
/// reference in a prop must name a declared field or method. Reports the
/// first violation in declaration order (fields, methods, then the tree in
/// pre-order).
pub fn validate_page(page: &PageDefinition, config: &GenerateConfig) -> Result<(), CoreError> {
    let info = &page.page_info;

    let mut seen = HashSet::new();
    for field in &info.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(CoreError::DuplicateField {
                name: field.name.clone(),
            });
        }
    }
    let mut seen = HashSet::new();
    for method in &info.methods {
        if !seen.insert(method.name.as_str()) {
            return Err(CoreError::DuplicateMethod {
                name: method.name.clone(),
            });
        }
    }

    if config.strict {
        let root = &page.component_tree;
        check_references(root, &NodePath::root(root), info)?;
    }
    Ok(())
}

fn check_references(node: &TreeNode, path: &NodePath, info: &PageInfo) -> Result<(), CoreError> {
    for value in node.props.values() {
        let expr = BoundExpr::parse(value, PAGE_SCOPE_PREFIX);
        let missing = expr
            .members()
            .find(|m| !info.has_member(m))
            .map(str::to_string);
        if let Some(member) = missing {
            return Err(CoreError::UnknownScopeReference {
                member,
                path: path.to_string(),
            });
        }
    }

    for event in &node.events {
        for action in &event.actions {
            // Other kinds are rejected by view lowering.
            if action.kind == ActionKind::InvokeMethod && info.method(&action.action_name).is_none()
            {
                return Err(CoreError::UnknownActionTarget {
                    action: action.action_name.clone(),
                    path: path.to_string(),
                });
            }
        }
    }

    for (i, child) in node.children.iter().enumerate() {
        check_references(child, &path.child(i, child), info)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Action, Event, FieldKind, PageBuilder};

    fn counter(action: &str, text: &str) -> PageDefinition {
        PageBuilder::new("Counter")
            .field("count", FieldKind::Number, "0")
            .method("increment", "this.count.value++")
            .tree(
                TreeNode::new("Column")
                    .with_child(TreeNode::new("Text").with_prop("text", text))
                    .with_child(TreeNode::new("Button").with_event(Event::new(
                        "onClick",
                        vec![Action::invoke(action)],
                    ))),
            )
            .build()
    }

    #[test]
    fn accepts_consistent_page() {
        let page = counter("increment", "page.count.value");
        validate_page(&page, &GenerateConfig::default().strict(true)).unwrap();
    }

    #[test]
    fn rejects_duplicate_fields() {
        let page = PageBuilder::new("Dup")
            .field("count", FieldKind::Number, "0")
            .field("count", FieldKind::String, "\"\"")
            .build();
        let err = validate_page(&page, &GenerateConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateField { ref name } if name == "count"));
    }

    #[test]
    fn rejects_duplicate_methods() {
        let page = PageBuilder::new("Dup")
            .method("reset", "")
            .method("reset", "")
            .build();
        let err = validate_page(&page, &GenerateConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateMethod { ref name } if name == "reset"));
    }

    #[test]
    fn unknown_action_target_is_latent_by_default() {
        let page = counter("incremnt", "page.count.value");
        validate_page(&page, &GenerateConfig::default()).unwrap();
    }

    #[test]
    fn strict_mode_rejects_unknown_action_target() {
        let page = counter("incremnt", "page.count.value");
        let err = validate_page(&page, &GenerateConfig::default().strict(true)).unwrap_err();
        match err {
            CoreError::UnknownActionTarget { action, path } => {
                assert_eq!(action, "incremnt");
                assert_eq!(path, "Column/children[1]:Button");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_mode_checks_every_prop_reference() {
        let page = PageBuilder::new("Counter")
            .field("count", FieldKind::Number, "0")
            .tree(
                TreeNode::new("Text")
                    .with_prop("text", "page.count.value")
                    .with_prop("color", "page.count.value + page.tint.value"),
            )
            .build();
        let err = validate_page(&page, &GenerateConfig::default().strict(true)).unwrap_err();
        match err {
            CoreError::UnknownScopeReference { member, path } => {
                assert_eq!(member, "tint");
                assert_eq!(path, "Text");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_mode_rejects_unknown_scope_reference() {
        let page = counter("increment", "page.total.value");
        let err = validate_page(&page, &GenerateConfig::default().strict(true)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownScopeReference { ref member, .. } if member == "total"
        ));
    }
}
