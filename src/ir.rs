// Strongly-typed schema IR. No serde_json::Value past this point.
use std::fmt;

use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Ref(String),             // raw `$ref` pointer, resolved lazily
    AnyOf(Vec<Schema>),
    OneOf(Vec<Schema>),
    Null,
    Boolean,
    Integer,
    Number,
    String(StringSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
    Unknown,                 // missing or unrecognised `type`
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSchema {
    pub enum_: Option<Vec<String>>,
    pub const_: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, Property>, // declaration order
    pub required: IndexSet<String>,
    /// Only its presence matters: it switches the object into open-map mode.
    pub property_names: Option<Box<Schema>>,
    pub additional_properties: Option<Extra>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub schema: Schema,
    pub description: Option<String>,
}

/// Canonical array shape: `prefix_items` are the positional slots and
/// `items` describes whatever may follow them (or every element, when
/// there are no positional slots).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArraySchema {
    pub prefix_items: Option<Vec<Schema>>,
    pub items: Option<Extra>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

/// The boolean-or-schema slot shared by `items` and `additionalProperties`.
#[derive(Debug, Clone, PartialEq)]
pub enum Extra {
    Forbidden,             // false
    Unknown,               // true
    Typed(Box<Schema>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Reference,
    Union,
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Object,
    Array,
    Unknown,
}

impl Schema {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Ref(_) => Kind::Reference,
            Self::AnyOf(_) | Self::OneOf(_) => Kind::Union,
            Self::Null => Kind::Null,
            Self::Boolean => Kind::Boolean,
            Self::Integer => Kind::Integer,
            Self::Number => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Object(_) => Kind::Object,
            Self::Array(_) => Kind::Array,
            Self::Unknown => Kind::Unknown,
        }
    }

    pub fn reference(pointer: impl Into<String>) -> Self {
        Self::Ref(pointer.into())
    }

    pub fn string() -> Self {
        Self::String(StringSchema::default())
    }
}

impl Property {
    pub fn described(schema: Schema, description: impl Into<String>) -> Self {
        Self { schema, description: Some(description.into()) }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reference => "$ref",
            Self::Union => "union",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
