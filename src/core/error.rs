//! Error taxonomy for the block pipeline
//!
//! Every failure in the resolve → criteria → query → render pipeline surfaces
//! synchronously to the caller as a `BlockError`. Nothing is retried or
//! swallowed inside the crate; retry and fallback policy belong to whatever
//! invokes a render.

use crate::core::settings::ValueKind;
use crate::provider::ProviderError;

/// Block pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    /// A settings schema declared the same name twice
    #[error("duplicate setting '{0}'")]
    DuplicateSetting(String),

    /// A persisted value's kind is incompatible with its declaration
    #[error("setting '{name}' expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// No template override was given and the schema declares no default
    #[error("no template configured for block '{0}'")]
    MissingTemplate(String),

    /// Resolved settings produce criteria that violate an invariant
    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),

    /// The data provider rejected or failed the query; passed through unchanged
    #[error("provider query failed")]
    Provider(#[from] ProviderError),
}
