use super::{Codegen, Definition, Frame};
use crate::error::Result;
use crate::ir::Schema;

impl Codegen {
    /// `anyOf` / `oneOf`: alternatives joined with ` | `, parenthesized when
    /// there is more than one. Exclusivity of `oneOf` is not representable
    /// and is dropped.
    pub fn handle_union(&self, schemas: &[Schema], indentation: usize) -> Result<Definition> {
        self.union_at(schemas, Frame::root(indentation))
    }

    pub(crate) fn union_at(&self, schemas: &[Schema], frame: Frame) -> Result<Definition> {
        let mut dependencies = Vec::new();
        let mut bodies = Vec::with_capacity(schemas.len());
        for item in schemas {
            let def = self.emit(item, frame.nested())?;
            dependencies.extend(def.dependencies);
            bodies.push(def.body);
        }

        let body = if bodies.len() > 1 {
            format!("({})", bodies.join(" | "))
        } else {
            bodies.concat()
        };
        Ok(Definition { dependencies, body })
    }
}
