//! Schema → type-expression text.
//!
//! The dispatcher ([`Codegen::generate_at`]) classifies a node and hands it to
//! one of the handlers in the submodules; every handler re-enters the
//! dispatcher for nested schemas. Each call returns its own [`Definition`] and
//! the caller concatenates dependencies, so nothing is shared or mutated
//! across the recursion. Dependencies are never deduplicated.
pub mod arr;
pub mod obj;
pub mod string;
pub mod union;

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::indent::INDENT_SIZE;
use crate::ir::{Kind, Schema};

/// Recursion ceiling used unless [`Settings`] say otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Generated type expression plus the external type names it mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub dependencies: Vec<String>,
    pub body: String,
}

impl Definition {
    /// A body that references nothing.
    pub fn leaf(body: impl Into<String>) -> Self {
        Self { dependencies: Vec::new(), body: body.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// How many levels of nested schemas are followed before giving up.
    pub max_depth: usize,
    /// Spaces per indentation step inside object bodies.
    pub indent_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, indent_size: INDENT_SIZE }
    }
}

/// Position in the recursion: `indentation` only grows inside object property
/// lists, `depth` grows on every nested schema.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub indentation: usize,
    pub depth: usize,
}

impl Frame {
    pub(crate) fn root(indentation: usize) -> Self {
        Self { indentation, depth: 0 }
    }

    pub(crate) fn nested(self) -> Self {
        Self { depth: self.depth + 1, ..self }
    }

    pub(crate) fn indented(self) -> Self {
        Self { indentation: self.indentation + 1, ..self }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Codegen {
    settings: Settings,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn generate(&self, schema: &Schema) -> Result<Definition> {
        self.generate_at(schema, 0)
    }

    /// Entry point: generate `schema` as if it sat `indentation` levels deep.
    pub fn generate_at(&self, schema: &Schema, indentation: usize) -> Result<Definition> {
        self.emit(schema, Frame::root(indentation))
    }

    pub(crate) fn emit(&self, schema: &Schema, frame: Frame) -> Result<Definition> {
        if frame.depth > self.settings.max_depth {
            return Err(Error::DepthExceeded { limit: self.settings.max_depth });
        }
        trace!(kind = %schema.kind(), depth = frame.depth, "generating type definition");

        match schema {
            Schema::Ref(pointer) => {
                let name = resolve_reference(pointer)?;
                Ok(Definition { dependencies: vec![name.to_owned()], body: name.to_owned() })
            }
            Schema::AnyOf(alts) | Schema::OneOf(alts) => self.union_at(alts, frame),
            Schema::Null => Ok(Definition::leaf("null")),
            Schema::Boolean => Ok(Definition::leaf("boolean")),
            Schema::Integer | Schema::Number => Ok(Definition::leaf("number")),
            Schema::String(_) => self.handle_string(schema),
            Schema::Object(_) => self.object_at(schema, frame),
            Schema::Array(_) => self.array_at(schema, frame),
            Schema::Unknown => Ok(Definition::leaf("unknown")),
        }
    }
}

/// Generate with default [`Settings`].
pub fn generate_type_definition(schema: &Schema, indentation: usize) -> Result<Definition> {
    Codegen::new().generate_at(schema, indentation)
}

/// Bare type name of a `$ref` pointer: its fourth `/` segment
/// (`#/components/schemas/Foo` → `Foo`). The target is never looked up.
pub fn resolve_reference(pointer: &str) -> Result<&str> {
    match pointer.split('/').nth(3) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(Error::InvalidReference(pointer.to_owned())),
    }
}

pub(crate) fn type_mismatch(expected: Kind, found: &Schema) -> Error {
    Error::TypeMismatch { expected, found: found.kind() }
}

// ------------------------------- Tests ------------------------------------ //
