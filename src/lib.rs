//! JSON-Schema (OpenAPI `components.schemas` flavour) → type-expression text.
//!
//! ```
//! use schema_typedef::{generate_type_definition, Schema};
//!
//! let schema = Schema::from_value(&serde_json::json!({
//!     "type": "array",
//!     "items": { "$ref": "#/components/schemas/Pet" },
//! })).unwrap();
//! let def = generate_type_definition(&schema, 0).unwrap();
//! assert_eq!(def.body, "Pet[]");
//! assert_eq!(def.dependencies, ["Pet"]);
//! ```
pub mod cli;
pub mod codegen;
pub mod document;
pub mod error;
pub mod indent;
pub mod ir;
pub mod norm_ir;
pub mod path_de;

pub use codegen::{generate_type_definition, resolve_reference, Codegen, Definition, Settings};
pub use document::Document;
pub use error::{Error, Result};
pub use ir::{Kind, Schema};
