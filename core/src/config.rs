use crate::error::{PathError, PathResult};

/// Default ceiling on partial paths in one frontier layer.
pub const DEFAULT_MAX_FRONTIER_PATHS: usize = 1_000_000;

/// Default ceiling on accepted paths per query.
pub const DEFAULT_MAX_PATHS: usize = 1_000_000;

/// What a query with start == end returns.
///
/// A simple path can never leave a node and come back to it, so the only
/// candidate is the zero-length path holding just that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroLengthPath {
    /// Return the single-node path.
    #[default]
    Include,
    /// Return nothing.
    Exclude,
}

/// Per-enumerator search settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Partial paths allowed in a single frontier layer (min 1).
    pub max_frontier_paths: usize,
    /// Accepted paths allowed per query (min 1).
    pub max_paths: usize,
    pub zero_length: ZeroLengthPath,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_frontier_paths: DEFAULT_MAX_FRONTIER_PATHS,
            max_paths: DEFAULT_MAX_PATHS,
            zero_length: ZeroLengthPath::default(),
        }
    }
}

impl SearchConfig {
    pub fn max_frontier_paths(mut self, limit: usize) -> Self {
        self.max_frontier_paths = limit;
        self
    }

    pub fn max_paths(mut self, limit: usize) -> Self {
        self.max_paths = limit;
        self
    }

    pub fn zero_length(mut self, policy: ZeroLengthPath) -> Self {
        self.zero_length = policy;
        self
    }

    /// Reject settings outside their permitted range.
    pub fn validate(&self) -> PathResult<()> {
        if self.max_frontier_paths == 0 {
            return Err(PathError::invalid("max_frontier_paths", "must be at least 1"));
        }
        if self.max_paths == 0 {
            return Err(PathError::invalid("max_paths", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.max_frontier_paths, DEFAULT_MAX_FRONTIER_PATHS);
        assert_eq!(cfg.max_paths, DEFAULT_MAX_PATHS);
        assert_eq!(cfg.zero_length, ZeroLengthPath::Include);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_setters_chain() {
        let cfg = SearchConfig::default()
            .max_frontier_paths(8)
            .max_paths(3)
            .zero_length(ZeroLengthPath::Exclude);
        assert_eq!(cfg.max_frontier_paths, 8);
        assert_eq!(cfg.max_paths, 3);
        assert_eq!(cfg.zero_length, ZeroLengthPath::Exclude);
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = SearchConfig::default().max_frontier_paths(0).validate();
        assert!(matches!(
            err,
            Err(PathError::InvalidArgument { name: "max_frontier_paths", .. })
        ));
        let err = SearchConfig::default().max_paths(0).validate();
        assert!(matches!(err, Err(PathError::InvalidArgument { name: "max_paths", .. })));
    }
}
