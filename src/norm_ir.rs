// src/norm_ir.rs
//! Boundary normalization: raw JSON schema values → `ir::Schema`.
//!
//! Everything loose about the input dialect is settled here so the code
//! generator only ever sees one canonical shape:
//! - `$ref` wins over everything else on the node, then `anyOf`, then `oneOf`.
//! - Unrecognised or missing `type` becomes `Schema::Unknown`.
//! - Malformed optional fields (wrong JSON kind) are dropped, not reported.
//! - Tuples are `prefixItems` + `items` (rest). The older list-form `items`
//!   is rewritten into that form, see [`normalize_array`].

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::ir::{ArraySchema, Extra, ObjectSchema, Property, Schema, StringSchema};

impl Schema {
    pub fn from_value(value: &Value) -> Result<Self> {
        normalize(value)
    }
}

impl TryFrom<&Value> for Schema {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        normalize(value)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        normalize(&value).map_err(serde::de::Error::custom)
    }
}

pub fn normalize(value: &Value) -> Result<Schema> {
    let Value::Object(map) = value else {
        // boolean schemas and other non-objects carry no type information
        return Ok(Schema::Unknown);
    };

    if let Some(pointer) = map.get("$ref") {
        return match pointer {
            Value::String(s) => Ok(Schema::Ref(s.clone())),
            other => Err(Error::InvalidReference(other.to_string())),
        };
    }

    if let Some(Value::Array(alts)) = map.get("anyOf") {
        return Ok(Schema::AnyOf(normalize_all(alts)?));
    }
    if let Some(Value::Array(alts)) = map.get("oneOf") {
        return Ok(Schema::OneOf(normalize_all(alts)?));
    }

    let schema = match map.get("type").and_then(Value::as_str) {
        Some("null") => Schema::Null,
        Some("boolean") => Schema::Boolean,
        Some("integer") => Schema::Integer,
        Some("number") => Schema::Number,
        Some("string") => Schema::String(normalize_string(map)),
        Some("object") => Schema::Object(normalize_object(map)?),
        Some("array") => Schema::Array(normalize_array(map)?),
        _ => Schema::Unknown,
    };
    Ok(schema)
}

fn normalize_all(values: &[Value]) -> Result<Vec<Schema>> {
    values.iter().map(normalize).collect()
}

fn normalize_string(map: &Map<String, Value>) -> StringSchema {
    StringSchema {
        enum_: map
            .get("enum")
            .and_then(Value::as_array)
            .map(|xs| xs.iter().map(literal_text).collect()),
        const_: map.get("const").map(literal_text),
    }
}

/// Non-negative integer, also when written as an integral float (`2.0`).
fn count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Text of a literal as it should appear between quotes.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn normalize_object(map: &Map<String, Value>) -> Result<ObjectSchema> {
    let mut out = ObjectSchema::default();

    if let Some(Value::Object(props)) = map.get("properties") {
        for (name, prop) in props {
            let description = prop
                .get("description")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned);
            out.properties.insert(name.clone(), Property {
                schema: normalize(prop)?,
                description,
            });
        }
    }

    if let Some(Value::Array(names)) = map.get("required") {
        out.required = names.iter().filter_map(Value::as_str).map(str::to_owned).collect();
    }

    if let Some(pattern) = map.get("propertyNames") {
        out.property_names = Some(Box::new(normalize(pattern)?));
    }

    out.additional_properties = match map.get("additionalProperties") {
        Some(slot @ (Value::Bool(_) | Value::Object(_))) => Some(normalize_extra(slot)?),
        _ => None,
    };

    Ok(out)
}

fn normalize_extra(value: &Value) -> Result<Extra> {
    Ok(match value {
        Value::Bool(false) => Extra::Forbidden,
        Value::Bool(true) => Extra::Unknown,
        other => Extra::Typed(Box::new(normalize(other)?)),
    })
}

/// Arrays come in two tuple dialects. The canonical one is `prefixItems`
/// for the positional slots with `items` as the rest element. The legacy one
/// puts a list in `items` and pins the arity with `minItems == maxItems`.
///
/// Legacy list-form `items` is rewritten:
/// - next to `prefixItems` → [`Error::ConflictingTupleForms`]
/// - with `minItems == maxItems` → positional slots, no rest element
/// - otherwise → homogeneous items (a union when the list has several entries)
fn normalize_array(map: &Map<String, Value>) -> Result<ArraySchema> {
    let mut out = ArraySchema {
        min_items: map.get("minItems").and_then(count),
        max_items: map.get("maxItems").and_then(count),
        ..ArraySchema::default()
    };

    if let Some(Value::Array(prefix)) = map.get("prefixItems") {
        out.prefix_items = Some(normalize_all(prefix)?);
    }

    match map.get("items") {
        Some(Value::Array(list)) => {
            if out.prefix_items.is_some() {
                return Err(Error::ConflictingTupleForms);
            }
            let mut list = normalize_all(list)?;
            let arity_locked = out.min_items.is_some() && out.min_items == out.max_items;
            if arity_locked {
                out.prefix_items = Some(list);
            } else {
                out.items = match list.len() {
                    0 => None,
                    1 => list.pop().map(|only| Extra::Typed(Box::new(only))),
                    _ => Some(Extra::Typed(Box::new(Schema::AnyOf(list)))),
                };
            }
        }
        Some(slot @ (Value::Bool(_) | Value::Object(_))) => {
            out.items = Some(normalize_extra(slot)?);
        }
        _ => {}
    }

    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //
