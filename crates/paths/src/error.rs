//! Error types for derivation path parsing and construction.

use thiserror::Error;

/// Errors raised while parsing or constructing a derivation path.
///
/// Every variant is terminal for the operation that raised it; nothing is
/// retried or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string has no usable components after the `m`/base prefix
    /// handling.
    #[error("empty derivation path")]
    EmptyPath,

    /// The path starts with a separator but carries no root marker, so the
    /// absolute/relative intent cannot be determined.
    #[error(
        "ambiguous path: use 'm/' prefix for absolute paths, or no leading '/' for relative ones"
    )]
    AmbiguousPath,

    /// A relative path was supplied without a base path to extend.
    #[error("base path must be provided for relative path")]
    MissingBasePath,

    /// A path component is not a parseable integer literal in any supported
    /// base.
    #[error("invalid component: {0}")]
    InvalidComponent(String),

    /// A numeric component falls outside `[0, max]` for its
    /// hardened/non-hardened ceiling.
    #[error(
        "component {value} out of allowed {}range [0, {max}]",
        if *.hardened { "hardened " } else { "" }
    )]
    ComponentOutOfRange {
        /// The numeric value as parsed, before any offset was applied.
        value: i128,
        /// The inclusive ceiling the value was checked against.
        max: u32,
        /// Whether the component carried the hardened marker.
        hardened: bool,
    },
}
