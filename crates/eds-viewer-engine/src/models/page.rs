use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ContentNode;
use crate::parsing;

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Invalid page JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Page JSON root must be an object, found {0}")]
    UnexpectedRoot(&'static str),
}

/// A whole EDS page: metadata plus sections in rendering order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EdsPage {
    pub metadata: PageMetadata,
    pub content: Vec<SectionContainer>,
}

impl EdsPage {
    /// Decode a page from the raw response body.
    ///
    /// Only text that is not JSON at all, or a non-object root, is an error.
    /// Anything malformed below the root is dropped while parsing.
    pub fn from_json_str(json: &str) -> Result<Self, PageError> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(PageError::UnexpectedRoot(json_type_name(&value)));
        }
        Ok(parsing::parse_page(&value))
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.title_text()
    }
}

/// A section: optional style hint plus content groups.
///
/// Each group is either default content or holds block nodes; the renderer
/// decides per node via [`ContentNode::is_block`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionContainer {
    pub metadata: Option<SectionMetadata>,
    pub section: Vec<Vec<ContentNode>>,
}

impl SectionContainer {
    pub fn style(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.style.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMetadata {
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub title: Option<MetadataText>,
    pub canonical: Option<MetadataHref>,
    pub meta: Option<Vec<MetaTag>>,
    pub script: Option<Value>,
    pub stylesheet: Option<MetadataHref>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataText {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataHref {
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaTag {
    pub tag: Option<String>,
    pub text: Option<String>,
}

impl PageMetadata {
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(|t| t.text.as_deref())
    }

    pub fn canonical_href(&self) -> Option<&str> {
        self.canonical.as_ref().and_then(|c| c.href.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.meta_text("description")
    }

    pub fn og_image(&self) -> Option<&str> {
        self.meta_text("og:image")
    }

    fn meta_text(&self, tag: &str) -> Option<&str> {
        self.meta
            .as_deref()?
            .iter()
            .find(|m| m.tag.as_deref() == Some(tag))
            .and_then(|m| m.text.as_deref())
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metadata_helpers() {
        let page = EdsPage::from_json_str(
            r#"{
                "metadata": {
                    "title": {"text": "Home"},
                    "canonical": {"href": "https://example.com/"},
                    "meta": [
                        {"tag": "description", "text": "Welcome"},
                        {"tag": "og:image", "text": "https://example.com/og.png"}
                    ]
                },
                "content": []
            }"#,
        )
        .unwrap();

        assert_eq!(page.title(), Some("Home"));
        assert_eq!(page.metadata.canonical_href(), Some("https://example.com/"));
        assert_eq!(page.metadata.description(), Some("Welcome"));
        assert_eq!(page.metadata.og_image(), Some("https://example.com/og.png"));
    }

    #[test]
    fn missing_metadata_is_absent() {
        let page = EdsPage::from_json_str("{}").unwrap();
        assert_eq!(page.title(), None);
        assert_eq!(page.metadata.description(), None);
        assert!(page.content.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result = EdsPage::from_json_str("<html>");
        assert!(matches!(result, Err(PageError::InvalidJson(_))));
    }

    #[test]
    fn non_object_root_is_an_error() {
        let result = EdsPage::from_json_str("[1, 2]");
        assert!(matches!(result, Err(PageError::UnexpectedRoot("array"))));
        assert!(result.unwrap_err().to_string().contains("array"));
    }

    #[test]
    fn section_style() {
        let section = SectionContainer {
            metadata: Some(SectionMetadata {
                style: Some("highlight".to_string()),
            }),
            section: vec![],
        };
        assert_eq!(section.style(), Some("highlight"));
        assert_eq!(SectionContainer::default().style(), None);
    }
}
