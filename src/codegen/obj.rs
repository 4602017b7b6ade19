use once_cell::sync::Lazy;
use regex::Regex;

use super::string::quote;
use super::{type_mismatch, Codegen, Definition, Frame};
use crate::error::Result;
use crate::indent::indentation;
use crate::ir::{Extra, Kind, ObjectSchema, Schema};

/// Doc comment used for properties without a `description`.
pub const MISSING_DESCRIPTION: &str = "missing-description";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern compiles")
});

impl Codegen {
    /// Keyed record of properties, or a `Record<string, T>` map when
    /// `propertyNames` is present.
    pub fn handle_object(&self, schema: &Schema, indentation: usize) -> Result<Definition> {
        self.object_at(schema, Frame::root(indentation))
    }

    pub(crate) fn object_at(&self, schema: &Schema, frame: Frame) -> Result<Definition> {
        let Schema::Object(obj) = schema else {
            return Err(type_mismatch(Kind::Object, schema));
        };

        if obj.property_names.is_some() {
            return self.open_map(obj, frame);
        }
        if obj.properties.is_empty() {
            return Ok(Definition::leaf("{}"));
        }

        let inner = frame.indented();
        let pad = indentation(inner.indentation, self.settings.indent_size);
        let mut dependencies = Vec::new();
        let mut lines = vec!["{".to_owned()];

        for (name, property) in &obj.properties {
            let def = self.emit(&property.schema, inner.nested())?;
            dependencies.extend(def.dependencies);

            lines.push(format!("{pad}/**"));
            for line in doc_lines(property.description.as_deref()) {
                if line.is_empty() {
                    lines.push(format!("{pad} *"));
                } else {
                    lines.push(format!("{pad} * {line}"));
                }
            }
            lines.push(format!("{pad} */"));

            let optional = if obj.required.contains(name) { "" } else { "?" };
            lines.push(format!("{pad}{}{optional}: {},", property_key(name), def.body));
        }

        lines.push(format!("{}}}", indentation(frame.indentation, self.settings.indent_size)));
        Ok(Definition { dependencies, body: lines.join("\n") })
    }

    fn open_map(&self, obj: &ObjectSchema, frame: Frame) -> Result<Definition> {
        match &obj.additional_properties {
            Some(Extra::Forbidden) => Ok(Definition::leaf("{}")),
            None | Some(Extra::Unknown) => Ok(Definition::leaf("Record<string, unknown>")),
            Some(Extra::Typed(values)) => {
                let def = self.emit(values, frame.nested())?;
                Ok(Definition {
                    dependencies: def.dependencies,
                    body: format!("Record<string, {}>", def.body),
                })
            }
        }
    }
}

/// Plain identifiers stay bare, anything else is quoted.
fn property_key(name: &str) -> String {
    if IDENTIFIER.is_match(name) { name.to_owned() } else { quote(name) }
}

/// Only an absent or empty description counts as missing.
fn doc_lines(description: Option<&str>) -> Vec<String> {
    let Some(text) = description.filter(|d| !d.is_empty()) else {
        return vec![MISSING_DESCRIPTION.to_owned()];
    };
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.trim_end().replace("*/", "*\\/"))
        .collect();
    if lines.is_empty() { vec![String::new()] } else { lines }
}
