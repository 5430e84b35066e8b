//! The interchange document: a JSON array of plain element objects.
//!
//! Exported documents carry no editor bookkeeping, and text elements carry no
//! width or height since those are derived from the text properties. Imports are
//! validated field by field before anything is deserialized, and are
//! all-or-nothing.

use serde_json::{Map, Value};

use crate::element::{ComponentType, Element, ElementId, Internal};
use crate::error::{DocumentError, SchemaError};
use crate::EditorResult;

/// Fields every element object must carry.
const COMMON_FIELDS: [&str; 4] = ["type", "name", "x", "y"];

/// Type-specific fields an element object must carry.
const fn required_fields(ty: ComponentType) -> &'static [&'static str] {
    match ty {
        ComponentType::Image => &["url"],
        ComponentType::Text => &["fillStyle", "font", "content"],
        ComponentType::Rect | ComponentType::Line | ComponentType::Circle => &["fillStyle"],
    }
}

/// Serialize elements into a pretty-printed document.
///
/// # Errors
///
/// Returns [`crate::EditorError::Serialization`] if an element cannot be serialized.
pub fn export_document(elements: &[Element]) -> EditorResult<String> {
    let items = elements
        .iter()
        .map(export_item)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string_pretty(&items)?)
}

fn export_item(element: &Element) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(element)?;
    if let Value::Object(map) = &mut value {
        map.remove("internal");
        if element.component_type() == ComponentType::Text {
            map.remove("width");
            map.remove("height");
        }
    }
    Ok(value)
}

/// Parse and validate a document.
///
/// Every element gets a fresh identity and its position as index.
///
/// # Errors
///
/// Returns [`DocumentError::Parse`] for malformed JSON and [`DocumentError::Schema`]
/// for the first schema violation found.
pub fn import_document(text: &str) -> Result<Vec<Element>, DocumentError> {
    let root: Value = serde_json::from_str(text).map_err(DocumentError::Parse)?;
    let Value::Array(items) = root else {
        return Err(SchemaError::NotAnArray.into());
    };

    let mut elements = Vec::with_capacity(items.len());
    for (item, value) in items.into_iter().enumerate() {
        let Value::Object(map) = value else {
            return Err(SchemaError::NotAnObject { item }.into());
        };
        validate_item(item, &map)?;

        let mut element: Element = serde_json::from_value(Value::Object(map))
            .map_err(|e| SchemaError::InvalidValue {
                item,
                message: e.to_string(),
            })?;
        element.internal = Internal {
            id: ElementId::new(),
            index: item,
        };
        element.normalize();
        elements.push(element);
    }

    tracing::debug!("Validated document with {} elements", elements.len());
    Ok(elements)
}

/// Check required fields and the `type` tag of one item.
///
/// Common fields are checked for presence before the tag is interpreted.
fn validate_item(item: usize, map: &Map<String, Value>) -> Result<(), SchemaError> {
    first_missing(item, map, &COMMON_FIELDS)?;

    let Some(type_value) = map.get("type") else {
        return Err(SchemaError::MissingField {
            item,
            field: "type",
        });
    };
    let ty = type_value
        .as_str()
        .and_then(|s| s.parse::<ComponentType>().ok())
        .ok_or_else(|| SchemaError::InvalidEnum {
            item,
            field: "type",
            value: type_value
                .as_str()
                .map_or_else(|| type_value.to_string(), str::to_string),
        })?;

    first_missing(item, map, required_fields(ty))
}

fn first_missing(
    item: usize,
    map: &Map<String, Value>,
    fields: &[&'static str],
) -> Result<(), SchemaError> {
    match fields.iter().copied().find(|field| !map.contains_key(*field)) {
        Some(field) => Err(SchemaError::MissingField { item, field }),
        None => Ok(()),
    }
}
