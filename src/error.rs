use crate::ir::Kind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal conditions raised while turning a schema into a type definition.
///
/// None of these are recoverable for the offending node: generation stops
/// and the error bubbles up to whoever asked for the definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `$ref` pointer without a usable name in its fourth `/` segment.
    #[error("invalid $ref in schema: `{0}`")]
    InvalidReference(String),

    #[error("schema type must be '{expected}', found '{found}'")]
    TypeMismatch { expected: Kind, found: Kind },

    #[error("schema nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    /// Both tuple conventions on one node: `prefixItems` and list-form `items`.
    #[error("array schema mixes `prefixItems` with list-form `items`")]
    ConflictingTupleForms,
}
