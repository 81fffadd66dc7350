//! Notice-detail endpoint: XML fetch and conversion to a JSON-like tree.

use serde_json::{Map, Value};

use crate::endpoints::{RegistryRoutes, RequestSpec};
use crate::error::{Error, Result};

/// Build the notice request: GET of one record's XML document.
pub(crate) fn notice_spec(routes: &RegistryRoutes, id: &str) -> RequestSpec {
    RequestSpec::get(format!("{}/{}", routes.notice_path, id))
}

/// Convert a notice XML document into a nested JSON value.
///
/// Conversion rules:
/// - an element becomes an object keyed by child element names;
/// - attributes become `@name` keys;
/// - repeated sibling elements collapse into an array;
/// - a text-only element becomes a plain string, text mixed with children
///   lands under `#text`.
pub(crate) fn notice_to_value(xml: &str) -> Result<Value> {
    let document = roxmltree::Document::parse(xml)
        .map_err(|e| Error::Unexpected(format!("notice XML did not parse: {e}")))?;
    let root = document.root_element();
    let mut tree = Map::new();
    tree.insert(root.tag_name().name().to_string(), element_to_value(root));
    Ok(Value::Object(tree))
}

fn element_to_value(node: roxmltree::Node<'_, '_>) -> Value {
    let mut map = Map::new();
    for attr in node.attributes() {
        map.insert(
            format!("@{}", attr.name()),
            Value::String(attr.value().to_string()),
        );
    }

    let mut text_parts: Vec<&str> = Vec::new();
    for child in node.children() {
        if child.is_element() {
            let name = child.tag_name().name().to_string();
            let value = element_to_value(child);
            match map.get_mut(&name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(name, value);
                }
            }
        } else if child.is_text()
            && let Some(text) = child.text()
        {
            let text = text.trim();
            if !text.is_empty() {
                text_parts.push(text);
            }
        }
    }

    let text = text_parts.join(" ");
    if map.is_empty() {
        if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        }
    } else {
        if !text.is_empty() {
            map.insert("#text".to_string(), Value::String(text));
        }
        Value::Object(map)
    }
}
