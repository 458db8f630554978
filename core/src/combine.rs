use std::collections::HashSet;

use tracing::debug;

use crate::error::{PathError, PathResult, Resource};
use crate::frontier::{Frontier, PartialPath};
use crate::graph::RelId;
use crate::path::{Path, SearchStats};

/// Join a forward path and a backward path that end at the same node.
///
/// Returns None when any node other than the meeting node sits on both
/// sides, since the joined path would not be simple.
pub(crate) fn splice(forward: &PartialPath, backward: &PartialPath) -> Option<Path> {
    let meeting = forward.terminal();
    debug_assert_eq!(meeting, backward.terminal());

    let (short, long) = if forward.len() <= backward.len() {
        (forward, backward)
    } else {
        (backward, forward)
    };
    if short
        .nodes()
        .iter()
        .any(|&n| n != meeting && long.contains(n))
    {
        return None;
    }

    let mut nodes = Vec::with_capacity(forward.nodes().len() + backward.len());
    nodes.extend_from_slice(forward.nodes());
    nodes.extend(backward.nodes().iter().rev().skip(1));

    let mut rels = Vec::with_capacity(forward.len() + backward.len());
    rels.extend_from_slice(forward.rels());
    rels.extend(backward.rels().iter().rev());

    Some(Path::new(nodes, rels))
}

/// Accumulates accepted paths for one query, deduplicated by relationship sequence.
pub(crate) struct Combiner {
    max_len: usize,
    max_paths: usize,
    seen: HashSet<Vec<RelId>>,
    paths: Vec<Path>,
}

impl Combiner {
    pub(crate) fn new(max_len: usize, max_paths: usize) -> Self {
        Self {
            max_len,
            max_paths,
            seen: HashSet::new(),
            paths: Vec::new(),
        }
    }

    /// Add a path unless an identical relationship sequence is already held.
    ///
    /// Returns whether the path was new.
    pub(crate) fn accept(&mut self, path: Path) -> PathResult<bool> {
        if self.seen.contains(path.relationships()) {
            return Ok(false);
        }
        if self.paths.len() >= self.max_paths {
            debug!(limit = self.max_paths, "result path ceiling reached");
            return Err(PathError::ResourceExceeded {
                resource: Resource::Paths,
                limit: self.max_paths,
            });
        }
        self.seen.insert(path.relationships().to_vec());
        self.paths.push(path);
        Ok(true)
    }

    /// Splice every forward/backward pair that meets between two layers.
    pub(crate) fn combine(
        &mut self,
        forward: &Frontier,
        backward: &Frontier,
        stats: &mut SearchStats,
    ) -> PathResult<()> {
        if (forward.depth() + backward.depth()) as usize > self.max_len {
            return Ok(());
        }
        stats.splits_tested += 1;

        for meeting in forward.meeting_nodes(backward) {
            for fwd in forward.paths_to(meeting) {
                for bwd in backward.paths_to(meeting) {
                    let Some(path) = splice(fwd, bwd) else {
                        stats.collisions_rejected += 1;
                        continue;
                    };
                    if path.len() > self.max_len {
                        continue;
                    }
                    if !self.accept(path)? {
                        stats.duplicates_discarded += 1;
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.paths.len()
    }

    pub(crate) fn into_paths(self) -> Vec<Path> {
        self.paths
    }
}
