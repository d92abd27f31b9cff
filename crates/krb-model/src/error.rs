use thiserror::Error;

use crate::ElementId;

/// Errors raised while navigating or mutating a [`crate::RenderContext`]'s
/// arena. Distinct from `krb-format::KrbError`: those are parse-time
/// failures over raw bytes, these are structural failures over an
/// already-parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("element {0:?} not found in arena")]
    NotFound(ElementId),

    #[error("component definition index {0} out of range")]
    UnknownComponentDefinition(u16),

    #[error("element {0:?} already has a parent")]
    AlreadyParented(ElementId),
}

pub type Result<T> = std::result::Result<T, ModelError>;
