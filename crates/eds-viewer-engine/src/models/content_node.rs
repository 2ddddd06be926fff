use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node of the EDS content tree.
///
/// The HTML-to-JSON service emits loosely typed objects whose populated
/// fields depend on `type`. Every field is optional so that decoding never
/// fails on missing or unknown keys; only values of the wrong JSON type make
/// a node undecodable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentNode {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Heading depth as sent; see [`ContentNode::heading_level`] for the
    /// usable value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Block name such as `hero` or `cards (small)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Nested content kept as raw JSON: mixed inline content for paragraphs,
    /// a rows/columns/items array for blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ListItem>>,

    /// Raw HTML tag passthrough (`br`, `code`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Entry of a list node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListItem {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Closed classification of a node's `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// No `type` at all: plain inline text
    Inline,
    Text,
    Heading,
    Image,
    Link,
    Paragraph,
    List,
    Strong,
    Em,
    Block,
    /// Any tag this model has no dedicated handling for
    Other(&'a str),
}

impl<'a> NodeKind<'a> {
    pub fn from_tag(tag: Option<&'a str>) -> Self {
        match tag {
            None => NodeKind::Inline,
            Some("text") => NodeKind::Text,
            Some("heading") => NodeKind::Heading,
            Some("image") => NodeKind::Image,
            Some("link") => NodeKind::Link,
            Some("paragraph") => NodeKind::Paragraph,
            Some("list") => NodeKind::List,
            Some("strong") => NodeKind::Strong,
            Some("em") => NodeKind::Em,
            Some("block") => NodeKind::Block,
            Some(other) => NodeKind::Other(other),
        }
    }
}

impl ContentNode {
    /// Synthesized node for a bare JSON scalar.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            node_type: Some("text".to_string()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn kind(&self) -> NodeKind<'_> {
        NodeKind::from_tag(self.node_type.as_deref())
    }

    pub fn is_block(&self) -> bool {
        self.kind() == NodeKind::Block
    }

    pub fn is_heading(&self) -> bool {
        self.kind() == NodeKind::Heading
    }

    pub fn is_image(&self) -> bool {
        self.kind() == NodeKind::Image
    }

    pub fn is_link(&self) -> bool {
        self.kind() == NodeKind::Link
    }

    pub fn is_paragraph(&self) -> bool {
        self.kind() == NodeKind::Paragraph
    }

    pub fn is_list(&self) -> bool {
        self.kind() == NodeKind::List
    }

    /// `strong` or `em`
    pub fn is_styled_text(&self) -> bool {
        matches!(self.kind(), NodeKind::Strong | NodeKind::Em)
    }

    /// Text to show for this node: `text`, falling back to `alt`.
    pub fn display_text(&self) -> Option<&str> {
        self.text.as_deref().or(self.alt.as_deref())
    }

    /// Heading depth for rendering, clamped to 1-6. Absent levels render as
    /// top-level.
    pub fn heading_level(&self) -> u8 {
        self.level.unwrap_or(1).clamp(1, 6) as u8
    }

    pub fn block_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Some("block"), NodeKind::Block)]
    #[case(Some("heading"), NodeKind::Heading)]
    #[case(Some("image"), NodeKind::Image)]
    #[case(Some("link"), NodeKind::Link)]
    #[case(Some("paragraph"), NodeKind::Paragraph)]
    #[case(Some("list"), NodeKind::List)]
    #[case(Some("strong"), NodeKind::Strong)]
    #[case(Some("em"), NodeKind::Em)]
    #[case(Some("text"), NodeKind::Text)]
    #[case(Some("code"), NodeKind::Other("code"))]
    #[case(None, NodeKind::Inline)]
    fn kind_follows_type_tag(#[case] tag: Option<&str>, #[case] expected: NodeKind) {
        assert_eq!(NodeKind::from_tag(tag), expected);
    }

    #[test]
    fn styled_text_covers_strong_and_em() {
        let strong: ContentNode = serde_json::from_value(json!({"type": "strong"})).unwrap();
        let em: ContentNode = serde_json::from_value(json!({"type": "em"})).unwrap();
        let para: ContentNode = serde_json::from_value(json!({"type": "paragraph"})).unwrap();

        assert!(strong.is_styled_text());
        assert!(em.is_styled_text());
        assert!(!para.is_styled_text());
    }

    #[test]
    fn unknown_and_missing_fields_decode() {
        let node: ContentNode = serde_json::from_value(json!({
            "type": "image",
            "src": "/media_1.png",
            "width": 750,
            "loading": "lazy"
        }))
        .unwrap();

        assert!(node.is_image());
        assert_eq!(node.src.as_deref(), Some("/media_1.png"));
        assert_eq!(node.alt, None);
        assert_eq!(node.display_text(), None);
    }

    #[test]
    fn wrong_field_type_fails_to_decode() {
        let result: Result<ContentNode, _> =
            serde_json::from_value(json!({"type": "heading", "level": "one"}));
        assert!(result.is_err());
    }

    #[rstest]
    #[case(json!({"type": "heading"}), 1)]
    #[case(json!({"type": "heading", "level": 3}), 3)]
    #[case(json!({"type": "heading", "level": 300}), 6)]
    #[case(json!({"type": "heading", "level": 0}), 1)]
    #[case(json!({"type": "heading", "level": -1}), 1)]
    fn heading_level_is_clamped(#[case] input: Value, #[case] expected: u8) {
        let node: ContentNode = serde_json::from_value(input).unwrap();
        assert_eq!(node.heading_level(), expected);
    }

    #[test]
    fn display_text_falls_back_to_alt() {
        let node = ContentNode {
            alt: Some("A cat".to_string()),
            ..ContentNode::default()
        };
        assert_eq!(node.display_text(), Some("A cat"));

        let node = ContentNode {
            text: Some("Caption".to_string()),
            alt: Some("A cat".to_string()),
            ..ContentNode::default()
        };
        assert_eq!(node.display_text(), Some("Caption"));
    }

    #[test]
    fn text_node_has_text_type() {
        let node = ContentNode::text_node("hello");
        assert_eq!(node.kind(), NodeKind::Text);
        assert_eq!(node.text.as_deref(), Some("hello"));
    }

    #[test]
    fn list_items_decode() {
        let node: ContentNode = serde_json::from_value(json!({
            "type": "list",
            "ordered": true,
            "items": [{"type": "listItem", "text": "One"}, {"text": "Two"}]
        }))
        .unwrap();

        assert!(node.is_list());
        assert_eq!(node.ordered, Some(true));
        let items = node.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text.as_deref(), Some("Two"));
        assert_eq!(items[1].item_type, None);
    }
}
