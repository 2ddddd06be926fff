use serde::Deserialize;
use serde_json::Value;

use crate::models::{BlockColumn, BlockRow, ContentNode, page::json_type_name};

/// Why a JSON value could not become a [`ContentNode`].
///
/// Never surfaced to page consumers: containing sequences drop the value.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("null is not a content node")]
    Null,
    #[error("unsupported node shape: {0}")]
    UnsupportedShape(&'static str),
    #[error("malformed content node: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse a value that may be a scalar, an object or an array of nodes.
pub fn parse_content_nodes(element: Option<&Value>) -> Vec<ContentNode> {
    match element {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(elements)) => elements.iter().filter_map(parse_or_drop).collect(),
        Some(value) => parse_or_drop(value).into_iter().collect(),
    }
}

/// Parse a single value into a node.
///
/// Scalars become synthesized `text` nodes. Objects are decoded field by
/// field; a field holding the wrong JSON type makes the whole node malformed.
pub fn parse_node(element: &Value) -> Result<ContentNode, NodeError> {
    match element {
        Value::Null => Err(NodeError::Null),
        Value::Array(_) => Err(NodeError::UnsupportedShape("array")),
        Value::Object(_) => Ok(ContentNode::deserialize(element)?),
        scalar => Ok(ContentNode::text_node(
            scalar_string(scalar).unwrap_or_default(),
        )),
    }
}

fn parse_or_drop(element: &Value) -> Option<ContentNode> {
    match parse_node(element) {
        Ok(node) => Some(node),
        Err(err) => {
            log::debug!("dropping content node: {err}");
            None
        }
    }
}

/// Parse block content: rows of columns of items.
///
/// Rows and columns that are not arrays are skipped, as is a non-array
/// top level.
pub fn parse_block_content(element: Option<&Value>) -> Vec<BlockRow> {
    let Some(Value::Array(rows)) = element else {
        if let Some(other) = element {
            log::debug!(
                "block content is {}, expected array",
                json_type_name(other)
            );
        }
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| match row {
            Value::Array(columns) => Some(BlockRow {
                columns: columns.iter().filter_map(parse_block_column).collect(),
            }),
            other => {
                log::debug!("dropping block row of type {}", json_type_name(other));
                None
            }
        })
        .collect()
}

fn parse_block_column(column: &Value) -> Option<BlockColumn> {
    if !column.is_array() {
        log::debug!("dropping block column of type {}", json_type_name(column));
        return None;
    }
    Some(BlockColumn {
        items: parse_content_nodes(Some(column)),
    })
}

/// Flatten mixed content (text interleaved with styling and links) into a
/// single string. Array parts are concatenated without a separator.
pub fn extract_plain_text(element: Option<&Value>) -> String {
    match element {
        None | Some(Value::Null) => String::new(),
        Some(Value::Array(parts)) => parts
            .iter()
            .map(|part| extract_plain_text(Some(part)))
            .collect(),
        Some(Value::Object(fields)) => fields
            .get("text")
            .and_then(scalar_string)
            .unwrap_or_else(|| extract_plain_text(fields.get("content"))),
        Some(scalar) => scalar_string(scalar).unwrap_or_default(),
    }
}

/// First image among `nodes`, then among their direct `content` children.
pub fn find_first_image(nodes: &[ContentNode]) -> Option<ContentNode> {
    find_first(nodes, ContentNode::is_image)
}

/// First link among `nodes`, then among their direct `content` children.
pub fn find_first_link(nodes: &[ContentNode]) -> Option<ContentNode> {
    find_first(nodes, ContentNode::is_link)
}

// Searches exactly two levels. Selecting from deeper levels would change
// which element wins for ambiguous content.
fn find_first(nodes: &[ContentNode], matches: fn(&ContentNode) -> bool) -> Option<ContentNode> {
    if let Some(node) = nodes.iter().find(|node| matches(node)) {
        return Some(node.clone());
    }
    nodes
        .iter()
        .flat_map(|node| parse_content_nodes(node.content.as_ref()))
        .find(matches)
}

/// Heading text from `text`, else from non-blank nested content.
pub fn heading_text(node: &ContentNode) -> Option<String> {
    if let Some(text) = &node.text {
        return Some(text.clone());
    }
    let extracted = extract_plain_text(node.content.as_ref());
    (!extracted.trim().is_empty()).then_some(extracted)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
