use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::{
    ContentNode, EdsPage, PageMetadata, SectionContainer, SectionMetadata, page::json_type_name,
};

use super::parse_content_nodes;

/// Build a page from its JSON tree, dropping whatever does not fit.
///
/// Expected shape:
/// `{ metadata: {...}, content: [ { metadata?: {style}, section: [[node, ...], ...] }, ... ] }`
pub fn parse_page(root: &Value) -> EdsPage {
    let Some(root) = root.as_object() else {
        return EdsPage::default();
    };

    let metadata = root
        .get("metadata")
        .and_then(Value::as_object)
        .map(parse_page_metadata)
        .unwrap_or_default();

    let content = match root.get("content") {
        Some(Value::Array(sections)) => sections.iter().filter_map(parse_section).collect(),
        Some(other) => {
            log::debug!("page content is {}, expected array", json_type_name(other));
            Vec::new()
        }
        None => Vec::new(),
    };

    EdsPage { metadata, content }
}

fn parse_page_metadata(fields: &Map<String, Value>) -> PageMetadata {
    PageMetadata {
        title: decode_field(fields, "title"),
        canonical: decode_field(fields, "canonical"),
        meta: decode_field(fields, "meta"),
        script: fields.get("script").filter(|v| !v.is_null()).cloned(),
        stylesheet: decode_field(fields, "stylesheet"),
    }
}

fn parse_section(value: &Value) -> Option<SectionContainer> {
    let Some(fields) = value.as_object() else {
        log::debug!("dropping section of type {}", json_type_name(value));
        return None;
    };

    let metadata: Option<SectionMetadata> = decode_field(fields, "metadata");
    let section = match fields.get("section") {
        Some(Value::Array(groups)) => groups.iter().filter_map(parse_content_group).collect(),
        _ => Vec::new(),
    };

    Some(SectionContainer { metadata, section })
}

fn parse_content_group(value: &Value) -> Option<Vec<ContentNode>> {
    if !value.is_array() {
        log::debug!("dropping content group of type {}", json_type_name(value));
        return None;
    }
    Some(parse_content_nodes(Some(value)))
}

fn decode_field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            log::debug!("ignoring malformed metadata field `{key}`: {err}");
            None
        }
    }
}
