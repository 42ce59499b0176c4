use std::fmt;

use super::page::{PageDefinition, TreeNode};

impl fmt::Display for PageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "page {} {{", self.name)?;
        for field in &self.page_info.fields {
            writeln!(
                f,
                "  field {}: {} = {}",
                field.name, field.kind, field.initial_value
            )?;
        }
        for method in &self.page_info.methods {
            writeln!(f, "  method {} {{", method.name)?;
            for line in method.body.lines() {
                writeln!(f, "    {line}")?;
            }
            writeln!(f, "  }}")?;
        }
        if !self.page_info.fields.is_empty() || !self.page_info.methods.is_empty() {
            writeln!(f)?;
        }
        fmt_node(&self.component_tree, 1, f)?;
        write!(f, "}}")
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_node(self, 0, f)
    }
}

fn fmt_node(node: &TreeNode, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let indent = "  ".repeat(depth);
    write!(f, "{indent}{}", node.component_name)?;
    for (key, value) in &node.props {
        write!(f, " {key}={value:?}")?;
    }
    writeln!(f)?;
    for event in &node.events {
        write!(f, "{indent}  on {} ->", event.event_type)?;
        for (i, action) in event.actions.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{}({})", action.kind, action.action_name)?;
        }
        writeln!(f)?;
    }
    for child in &node.children {
        fmt_node(child, depth + 1, f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::ir::{Action, Event, FieldKind, PageBuilder, TreeNode};

    #[test]
    fn prints_page_outline() {
        let page = PageBuilder::new("Counter")
            .field("count", FieldKind::Number, "0")
            .method("increment", "this.count.value++")
            .tree(
                TreeNode::new("Column")
                    .with_child(TreeNode::new("Text").with_prop("text", "page.count.value"))
                    .with_child(TreeNode::new("Button").with_event(Event::new(
                        "onClick",
                        vec![Action::invoke("increment")],
                    ))),
            )
            .build();

        let out = page.to_string();
        assert_eq!(
            out,
            "page Counter {\n\
             \x20 field count: number = 0\n\
             \x20 method increment {\n\
             \x20   this.count.value++\n\
             \x20 }\n\
             \n\
             \x20 Column\n\
             \x20   Text text=\"page.count.value\"\n\
             \x20   Button\n\
             \x20     on onClick -> actionName(increment)\n\
             }"
        );
    }
}
