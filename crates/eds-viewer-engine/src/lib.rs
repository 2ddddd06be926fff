pub mod blocks;
pub mod config;
pub mod links;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use blocks::*;
pub use config::*;
pub use links::*;
pub use models::{
    BlockColumn, BlockRow, ContentNode, EdsPage, ListItem, MetaTag, MetadataHref, MetadataText,
    NodeKind, PageError, PageMetadata, SectionContainer, SectionMetadata,
};
pub use parsing::{
    NodeError, extract_plain_text, find_first_image, find_first_link, heading_text,
    parse_block_content, parse_content_nodes, parse_node, parse_page,
};
