use super::{type_mismatch, Codegen, Definition, Frame};
use crate::error::Result;
use crate::ir::{ArraySchema, Extra, Kind, Schema};

impl Codegen {
    /// `T[]` for homogeneous arrays, `[A, B, ...R[]]` when positional
    /// `prefixItems` are present.
    pub fn handle_array(&self, schema: &Schema, indentation: usize) -> Result<Definition> {
        self.array_at(schema, Frame::root(indentation))
    }

    pub(crate) fn array_at(&self, schema: &Schema, frame: Frame) -> Result<Definition> {
        let Schema::Array(arr) = schema else {
            return Err(type_mismatch(Kind::Array, schema));
        };
        match &arr.prefix_items {
            Some(prefix) => self.tuple(prefix, arr, frame),
            None => self.list(arr, frame),
        }
    }

    fn tuple(&self, prefix: &[Schema], arr: &ArraySchema, frame: Frame) -> Result<Definition> {
        let mut dependencies = Vec::new();
        let mut elems = Vec::with_capacity(prefix.len() + 1);
        for item in prefix {
            let def = self.emit(item, frame.nested())?;
            dependencies.extend(def.dependencies);
            elems.push(def.body);
        }

        // rest element: absent or `false` means none
        match &arr.items {
            None | Some(Extra::Forbidden) => {}
            Some(Extra::Unknown) => elems.push("...unknown[]".to_owned()),
            Some(Extra::Typed(rest)) => {
                let def = self.emit(rest, frame.nested())?;
                dependencies.extend(def.dependencies);
                elems.push(format!("...{}[]", element(&def.body)));
            }
        }

        Ok(Definition { dependencies, body: format!("[{}]", elems.join(", ")) })
    }

    fn list(&self, arr: &ArraySchema, frame: Frame) -> Result<Definition> {
        let (dependencies, item) = match &arr.items {
            Some(Extra::Forbidden) => (Vec::new(), "never".to_owned()),
            None | Some(Extra::Unknown) => (Vec::new(), "unknown".to_owned()),
            Some(Extra::Typed(items)) => {
                let def = self.emit(items, frame.nested())?;
                (def.dependencies, element(&def.body))
            }
        };
        Ok(Definition { dependencies, body: format!("{item}[]") })
    }
}

/// Element type ready for a `[]` suffix: a bare top-level `|` would bind
/// looser than the suffix, so such bodies get parenthesized. An empty body
/// (empty enum or union) admits no value and becomes `never`.
fn element(body: &str) -> String {
    if body.is_empty() {
        "never".to_owned()
    } else if has_top_level_union(body) {
        format!("({body})")
    } else {
        body.to_owned()
    }
}

fn has_top_level_union(body: &str) -> bool {
    let mut depth = 0usize;
    let mut in_literal = false;
    let mut escaped = false;
    for c in body.chars() {
        if in_literal {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_literal = false;
            }
            continue;
        }
        match c {
            '"' => in_literal = true,
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn body(v: serde_json::Value) -> String {
        let schema = Schema::from_value(&v).unwrap();
        Codegen::new().handle_array(&schema, 0).unwrap().body
    }

    #[test]
    fn rejects_other_kinds() {
        let err = Codegen::new().handle_array(&Schema::string(), 0).unwrap_err();
        assert_eq!(err, Error::TypeMismatch { expected: Kind::Array, found: Kind::String });
    }

    #[test]
    fn homogeneous_arrays() {
        assert_eq!(body(json!({ "type": "array" })), "unknown[]");
        assert_eq!(body(json!({ "type": "array", "items": { "type": "string" } })), "string[]");
        assert_eq!(body(json!({ "type": "array", "items": true })), "unknown[]");
        assert_eq!(body(json!({ "type": "array", "items": false })), "never[]");
        assert_eq!(body(json!({ "type": "array", "items": false, "maxItems": 0 })), "never[]");
    }

    #[test]
    fn cardinality_alone_does_not_make_a_tuple() {
        assert_eq!(body(json!({ "type": "array", "minItems": 1, "maxItems": 5 })), "unknown[]");
        assert_eq!(
            body(json!({ "type": "array", "items": { "type": "string" }, "minItems": 2, "maxItems": 2 })),
            "string[]",
        );
    }

    #[test]
    fn empty_prefix_is_empty_tuple() {
        assert_eq!(body(json!({ "type": "array", "prefixItems": [] })), "[]");
    }

    #[test]
    fn tuples_with_rest_elements() {
        let prefix = json!([{ "type": "string" }, { "type": "number" }]);
        assert_eq!(body(json!({ "type": "array", "prefixItems": prefix.clone() })), "[string, number]");
        assert_eq!(body(json!({ "type": "array", "prefixItems": prefix.clone(), "items": false })), "[string, number]");
        assert_eq!(
            body(json!({ "type": "array", "prefixItems": prefix.clone(), "items": true })),
            "[string, number, ...unknown[]]",
        );
        assert_eq!(
            body(json!({ "type": "array", "prefixItems": prefix.clone(), "items": { "type": "boolean" }, "minItems": 2, "maxItems": 5 })),
            "[string, number, ...boolean[]]",
        );
    }

    #[test]
    fn locked_list_items_render_as_tuple() {
        let schema = json!({
            "type": "array",
            "items": [{ "type": "string" }, { "$ref": "#/components/schemas/Point" }],
            "minItems": 2,
            "maxItems": 2,
        });
        let out = Codegen::new().handle_array(&Schema::from_value(&schema).unwrap(), 0).unwrap();
        assert_eq!(out.body, "[string, Point]");
        assert_eq!(out.dependencies, ["Point"]);
    }

    #[test]
    fn unlocked_list_items_render_as_union_array() {
        let schema = json!({
            "type": "array",
            "items": [{ "type": "string" }, { "type": "number" }],
        });
        assert_eq!(body(schema), "(string | number)[]");
    }

    #[test]
    fn enum_elements_are_grouped() {
        assert_eq!(
            body(json!({ "type": "array", "items": { "type": "string", "enum": ["a", "b"] } })),
            r#"("a" | "b")[]"#,
        );
        assert_eq!(
            body(json!({ "type": "array", "items": { "type": "string", "enum": ["a|b"] } })),
            r#""a|b"[]"#,
        );
        assert_eq!(
            body(json!({ "type": "array", "prefixItems": [], "items": { "type": "string", "enum": ["x", "y"] } })),
            r#"[...("x" | "y")[]]"#,
        );
    }

    #[test]
    fn empty_element_bodies_become_never() {
        assert_eq!(body(json!({ "type": "array", "items": { "type": "string", "enum": [] } })), "never[]");
        assert_eq!(body(json!({ "type": "array", "items": { "anyOf": [] } })), "never[]");
        assert_eq!(
            body(json!({ "type": "array", "prefixItems": [{ "type": "null" }], "items": { "type": "string", "enum": [] } })),
            "[null, ...never[]]",
        );
    }

    #[test]
    fn dependencies_follow_declared_order() {
        let schema = json!({
            "type": "array",
            "prefixItems": [
                { "$ref": "#/components/schemas/A" },
                { "$ref": "#/components/schemas/B" },
            ],
            "items": { "$ref": "#/components/schemas/A" },
        });
        let out = Codegen::new().handle_array(&Schema::from_value(&schema).unwrap(), 0).unwrap();
        assert_eq!(out.body, "[A, B, ...A[]]");
        assert_eq!(out.dependencies, ["A", "B", "A"]);
    }

    #[test]
    fn top_level_union_detection() {
        assert!(has_top_level_union("string | number"));
        assert!(!has_top_level_union("(string | number)"));
        assert!(!has_top_level_union("Record<string, a | b>"));
        assert!(!has_top_level_union(r#""\"|""#));
    }
}
