pub mod block;
pub mod content_node;
pub mod page;

pub use block::{BlockColumn, BlockRow};
pub use content_node::{ContentNode, ListItem, NodeKind};
pub use page::*;
