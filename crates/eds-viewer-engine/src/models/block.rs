use crate::models::ContentNode;
use crate::parsing;

/// One row of a block's content grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockRow {
    pub columns: Vec<BlockColumn>,
}

impl BlockRow {
    pub fn first_column(&self) -> Option<&BlockColumn> {
        self.columns.first()
    }

    pub fn second_column(&self) -> Option<&BlockColumn> {
        self.columns.get(1)
    }
}

/// One cell of a block row: an ordered list of content items.
///
/// The derived accessors are recomputed on every call. Blocks are small and
/// each value is read about once per render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockColumn {
    pub items: Vec<ContentNode>,
}

impl BlockColumn {
    pub fn first_image(&self) -> Option<ContentNode> {
        parsing::find_first_image(&self.items)
    }

    pub fn first_link(&self) -> Option<ContentNode> {
        parsing::find_first_link(&self.items)
    }

    /// Paragraphs, headings and styled text, in order.
    pub fn text_items(&self) -> Vec<&ContentNode> {
        self.items
            .iter()
            .filter(|item| item.is_paragraph() || item.is_heading() || item.is_styled_text())
            .collect()
    }

    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(|item| match &item.text {
                Some(text) => text.clone(),
                None => parsing::extract_plain_text(item.content.as_ref()),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn column(value: serde_json::Value) -> BlockColumn {
        BlockColumn {
            items: parsing::parse_content_nodes(Some(&value)),
        }
    }

    #[test]
    fn row_column_accessors() {
        let row = BlockRow {
            columns: vec![column(json!(["a"])), column(json!(["b"]))],
        };
        assert_eq!(row.first_column().unwrap().plain_text(), "a");
        assert_eq!(row.second_column().unwrap().plain_text(), "b");

        let empty = BlockRow::default();
        assert!(empty.first_column().is_none());
        assert!(empty.second_column().is_none());
    }

    #[test]
    fn text_items_keep_paragraphs_headings_and_styled_text() {
        let col = column(json!([
            {"type": "image", "src": "/a.png"},
            {"type": "heading", "level": 2, "text": "Title"},
            {"type": "paragraph", "text": "Body"},
            {"type": "link", "href": "/x", "text": "More"},
            {"type": "strong", "text": "Bold"}
        ]));

        let texts: Vec<_> = col
            .text_items()
            .iter()
            .map(|n| n.text.clone().unwrap())
            .collect();
        assert_eq!(texts, vec!["Title", "Body", "Bold"]);
    }

    #[test]
    fn plain_text_joins_items_with_newlines() {
        let col = column(json!([
            {"type": "heading", "text": "Title"},
            {"type": "paragraph", "content": ["Hello ", {"type": "strong", "text": "world"}]}
        ]));
        assert_eq!(col.plain_text(), "Title\nHello world");
    }

    #[test]
    fn first_image_and_link_are_found_inside_paragraphs() {
        let col = column(json!([
            {"type": "paragraph", "content": [{"type": "image", "src": "/pic.png"}]},
            {"type": "paragraph", "content": [{"type": "link", "href": "/go", "text": "Go"}]}
        ]));

        assert_eq!(col.first_image().unwrap().src.as_deref(), Some("/pic.png"));
        assert_eq!(col.first_link().unwrap().href.as_deref(), Some("/go"));
    }
}
