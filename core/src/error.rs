//! Error types for path enumeration.
//!
//! Only two things can go wrong: a caller hands in something unusable, or a
//! search outgrows its configured ceilings. Empty results and dead ends are
//! not errors.

use thiserror::Error;

/// Result alias for fallible path operations.
pub type PathResult<T> = Result<T, PathError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Unknown start/end node, negative depth, or an out-of-range setting.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// A frontier layer or the result set grew past its ceiling.
    #[error("resource limit exceeded: {resource} over {limit}")]
    ResourceExceeded { resource: Resource, limit: usize },
}

/// The bounded resource named by `PathError::ResourceExceeded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Partial paths held in one frontier layer.
    FrontierPaths,
    /// Accepted result paths.
    Paths,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::FrontierPaths => f.write_str("frontier paths"),
            Resource::Paths => f.write_str("result paths"),
        }
    }
}

impl PathError {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        PathError::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

/// Validate that a depth parameter is non-negative.
pub fn check_non_negative(value: i32, name: &'static str) -> PathResult<u32> {
    u32::try_from(value)
        .map_err(|_| PathError::invalid(name, format!("must be non-negative, got {}", value)))
}
