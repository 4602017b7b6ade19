use serde_json::Value;

use super::{type_mismatch, Codegen, Definition};
use crate::error::Result;
use crate::ir::{Kind, Schema};

impl Codegen {
    /// `const` beats `enum` beats plain `string`. An empty `enum` yields an
    /// empty body rather than `never`.
    pub fn handle_string(&self, schema: &Schema) -> Result<Definition> {
        let Schema::String(s) = schema else {
            return Err(type_mismatch(Kind::String, schema));
        };

        let body = if let Some(value) = &s.const_ {
            quote(value)
        } else if let Some(values) = &s.enum_ {
            values.iter().map(|v| quote(v)).collect::<Vec<_>>().join(" | ")
        } else {
            "string".to_owned()
        };
        Ok(Definition::leaf(body))
    }
}

/// Double-quoted literal with JSON escaping, which is also a valid
/// string-literal type.
pub(crate) fn quote(text: &str) -> String {
    Value::from(text).to_string()
}
