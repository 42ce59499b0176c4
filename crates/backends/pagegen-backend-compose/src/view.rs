//! View lowering: component tree → a single `@Composable` function.
//!
//! Recursive descent over the tree, one frame per depth. Each node resolves
//! through the construct registry, prints its props (with `page.` rewritten
//! to the binding name) and event callbacks as named arguments, then splices
//! its children's text inside a trailing block. Sibling order, prop order,
//! event order and action order all follow declaration order.

use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;

use pagegen_core::binding::rewrite_page_scope;
use pagegen_core::error::CoreError;
use pagegen_core::ir::{ActionKind, Event, NodePath, PageDefinition, TreeNode};
use pagegen_core::pipeline::GenerateConfig;
use pagegen_core::registry::ConstructRegistry;
use tracing::debug;

use crate::kotlin::{indent, write_header, write_imports};
use crate::names::{state_holder_type, view_function};

const COMPOSABLE: &str = "androidx.compose.runtime.Composable";

/// Lower the page's component tree into the view source file.
///
/// The generated function takes the state holder as a parameter named
/// `config.binding_name`. Any unresolvable component, event type, or action
/// kind aborts lowering of the whole page.
pub fn lower_view(
    page: &PageDefinition,
    registry: &dyn ConstructRegistry,
    config: &GenerateConfig,
) -> Result<String, CoreError> {
    let root = &page.component_tree;
    let mut lowering = ViewLowering {
        registry,
        binding: &config.binding_name,
        imports: BTreeSet::new(),
    };
    let body = lowering.lower_node(root, &NodePath::root(root), 1)?;

    let mut imports = lowering.imports;
    imports.insert(COMPOSABLE.to_string());

    let mut out = String::new();
    write_header(&mut out, &page.name, config.package.as_deref());
    write_imports(&mut out, &imports);
    let _ = writeln!(out, "@Composable");
    let _ = writeln!(
        out,
        "fun {}({}: {}) {{",
        view_function(&page.name),
        config.binding_name,
        state_holder_type(&page.name),
    );
    out.push_str(&body);
    let _ = writeln!(out, "}}");

    debug!(
        page = %page.name,
        nodes = root.node_count(),
        depth = root.depth(),
        "lowered view"
    );
    Ok(out)
}

struct ViewLowering<'a> {
    registry: &'a dyn ConstructRegistry,
    binding: &'a str,
    /// Fully-qualified targets of every construct used so far.
    imports: BTreeSet<String>,
}

impl<'a> ViewLowering<'a> {
    /// Lower `node` and its subtree at indentation `depth`.
    fn lower_node(
        &mut self,
        node: &TreeNode,
        path: &NodePath,
        depth: usize,
    ) -> Result<String, CoreError> {
        let registry = self.registry;
        let descriptor = registry.resolve_component(&node.component_name, path)?;
        self.imports.insert(descriptor.target.clone());
        let name = descriptor.simple_name();

        let mut args = Vec::with_capacity(node.props.len() + node.events.len());
        for (key, value) in &node.props {
            args.push(format!("{key} = {}", rewrite_page_scope(value, self.binding)));
        }
        // Props are unique by construction; an event may still collide with a
        // prop or with another event bound to the same parameter.
        let mut bound: HashSet<&str> = node.props.keys().map(String::as_str).collect();
        for event in &node.events {
            let rule = registry.resolve_event_type(&event.event_type, path)?;
            if !bound.insert(rule.param.as_str()) {
                return Err(CoreError::DuplicateArgument {
                    name: rule.param.clone(),
                    path: path.to_string(),
                });
            }
            let callback = self.lower_callback(event, path, depth)?;
            args.push(format!("{} = {callback}", rule.param));
        }

        let pad = indent(depth);
        let mut out = String::new();
        if node.children.is_empty() {
            let _ = writeln!(out, "{pad}{name}({})", args.join(", "));
            return Ok(out);
        }

        if args.is_empty() {
            let _ = writeln!(out, "{pad}{name} {{");
        } else {
            let _ = writeln!(out, "{pad}{name}({}) {{", args.join(", "));
        }
        for (i, child) in node.children.iter().enumerate() {
            out.push_str(&self.lower_node(child, &path.child(i, child), depth + 1)?);
        }
        let _ = writeln!(out, "{pad}}}");
        Ok(out)
    }

    /// Lower an event's actions into a lambda, one call per action.
    fn lower_callback(
        &self,
        event: &Event,
        path: &NodePath,
        depth: usize,
    ) -> Result<String, CoreError> {
        if event.actions.is_empty() {
            return Ok("{}".to_string());
        }
        let inner = indent(depth + 1);
        let mut out = String::from("{\n");
        for action in &event.actions {
            match &action.kind {
                ActionKind::InvokeMethod => {
                    let _ = writeln!(out, "{inner}{}.{}()", self.binding, action.action_name);
                }
                ActionKind::Other(kind) => {
                    return Err(CoreError::UnsupportedAction {
                        action: kind.clone(),
                        path: path.to_string(),
                    });
                }
            }
        }
        out.push_str(&indent(depth));
        out.push('}');
        Ok(out)
    }
}
