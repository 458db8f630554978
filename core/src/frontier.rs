//! One side of the bidirectional search: partial paths grown hop by hop
//! from an anchor node.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::{PathError, PathResult, Resource};
use crate::graph::{GraphStore, NodeId, RelId, RelTypeId, TraversalDirection};
use crate::path::SearchStats;

/// Which anchor a frontier grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// From the start node, following the configured direction.
    Forward,
    /// From the end node, following the reversed direction.
    Backward,
}

impl Side {
    pub(crate) fn direction(self, configured: TraversalDirection) -> TraversalDirection {
        match self {
            Side::Forward => configured,
            Side::Backward => configured.reverse(),
        }
    }
}

/// A path from an anchor node, in the order it was walked.
///
/// `visited` mirrors `nodes` exactly; both only change through `extend`.
#[derive(Debug, Clone)]
pub(crate) struct PartialPath {
    nodes: Vec<NodeId>,
    rels: Vec<RelId>,
    visited: HashSet<NodeId>,
}

impl PartialPath {
    pub(crate) fn anchor(node: NodeId) -> Self {
        Self {
            nodes: vec![node],
            rels: Vec::new(),
            visited: HashSet::from([node]),
        }
    }

    pub(crate) fn terminal(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub(crate) fn len(&self) -> usize {
        self.rels.len()
    }

    pub(crate) fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub(crate) fn rels(&self) -> &[RelId] {
        &self.rels
    }

    pub(crate) fn contains(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Append one hop, or None if `node` is already on this path.
    pub(crate) fn extend(&self, rel: RelId, node: NodeId) -> Option<Self> {
        if self.visited.contains(&node) {
            return None;
        }
        let mut next = self.clone();
        next.nodes.push(node);
        next.rels.push(rel);
        next.visited.insert(node);
        debug_assert_eq!(next.visited.len(), next.nodes.len());
        Some(next)
    }
}

/// All partial paths of one depth on one side, grouped by terminal node.
///
/// Never mutated once built; `expand` produces the next layer.
#[derive(Debug)]
pub(crate) struct Frontier {
    side: Side,
    depth: u32,
    width: usize,
    by_terminal: HashMap<NodeId, Vec<PartialPath>>,
}

impl Frontier {
    /// Depth-0 layer: the anchor alone.
    pub(crate) fn seed(side: Side, anchor: NodeId) -> Self {
        Self {
            side,
            depth: 0,
            width: 1,
            by_terminal: HashMap::from([(anchor, vec![PartialPath::anchor(anchor)])]),
        }
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of partial paths in this layer.
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.width == 0
    }

    pub(crate) fn paths_to(&self, node: NodeId) -> &[PartialPath] {
        self.by_terminal.get(&node).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Terminal nodes present in both layers.
    pub(crate) fn meeting_nodes<'a>(
        &'a self,
        other: &'a Frontier,
    ) -> impl Iterator<Item = NodeId> + 'a {
        let (small, large) = if self.by_terminal.len() <= other.by_terminal.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .by_terminal
            .keys()
            .copied()
            .filter(move |node| large.by_terminal.contains_key(node))
    }

    /// Grow every path in this layer by one hop.
    ///
    /// Fails as soon as the new layer would hold more than `max_width` paths.
    pub(crate) fn expand<G: GraphStore>(
        &self,
        graph: &G,
        rel_type: RelTypeId,
        configured: TraversalDirection,
        max_width: usize,
        stats: &mut SearchStats,
    ) -> PathResult<Frontier> {
        let direction = self.side.direction(configured);
        let mut by_terminal: HashMap<NodeId, Vec<PartialPath>> = HashMap::new();
        let mut width = 0usize;

        for (&node, paths) in &self.by_terminal {
            for rel in graph.relationships_of(node, direction, rel_type) {
                stats.relationships_examined += 1;
                let Some(neighbor) = graph.other_endpoint(rel, node) else {
                    trace!(rel, node, "relationship does not touch its source node, skipped");
                    continue;
                };

                for path in paths {
                    if let Some(next) = path.extend(rel, neighbor) {
                        width += 1;
                        if width > max_width {
                            debug!(
                                side = ?self.side,
                                depth = self.depth + 1,
                                limit = max_width,
                                "frontier ceiling reached"
                            );
                            return Err(PathError::ResourceExceeded {
                                resource: Resource::FrontierPaths,
                                limit: max_width,
                            });
                        }
                        by_terminal.entry(neighbor).or_default().push(next);
                    }
                }
            }
        }

        let depth = self.depth + 1;
        trace!(
            side = ?self.side,
            depth,
            width,
            terminals = by_terminal.len(),
            "frontier expanded"
        );
        stats.peak_frontier_width = stats.peak_frontier_width.max(width);

        Ok(Frontier {
            side: self.side,
            depth,
            width,
            by_terminal,
        })
    }
}
