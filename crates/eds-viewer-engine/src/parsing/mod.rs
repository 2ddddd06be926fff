//! Conversion of the loosely typed EDS JSON tree into the content model.
//!
//! Every function here is a pure function of its input. Malformed pieces are
//! dropped where they occur so that one bad node never prevents the rest of
//! the page from rendering.

pub mod content;
pub mod page;

pub use content::{
    NodeError, extract_plain_text, find_first_image, find_first_link, heading_text,
    parse_block_content, parse_content_nodes, parse_node,
};
pub use page::parse_page;
