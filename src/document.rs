//! Just enough of an OpenAPI document to reach `components.schemas`.
use std::str::FromStr;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Deserialize;

use crate::codegen::{Codegen, Definition};
use crate::error::Result;
use crate::ir::Schema;
use crate::path_de::{from_slice_with_path, from_str_with_path, PathError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

impl FromStr for Document {
    type Err = PathError;

    fn from_str(src: &str) -> Result<Self, PathError> {
        from_str_with_path(src)
    }
}

impl Document {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PathError> {
        from_slice_with_path(bytes)
    }

    /// Named schemas in document order.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.components.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// Generate every named schema (in parallel); results keep document order.
    pub fn definitions(&self, codegen: &Codegen) -> Vec<(&str, Result<Definition>)> {
        let entries: Vec<(&str, &Schema)> = self.schemas().collect();
        entries
            .into_par_iter()
            .map(|(name, schema)| (name, codegen.generate(schema)))
            .collect()
    }
}
