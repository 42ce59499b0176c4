pub mod builder;
pub mod page;
pub mod printer;

pub use builder::PageBuilder;
pub use page::{
    Action, ActionKind, Event, Field, FieldKind, Method, NodePath, PageDefinition, PageInfo,
    TreeNode, INVOKE_METHOD_ACTION,
};
