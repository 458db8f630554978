#[cfg(feature = "serde")]
use serde::Serialize;

use crate::graph::{Direction, Graph, NodeId, RelId};

/// One element of the entity view of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum PathEntity {
    Node(NodeId),
    Relationship(RelId),
}

/// A simple path from the enumerator's start node to its end node.
///
/// `nodes` always holds exactly one more element than `relationships`;
/// `relationships[i]` connects `nodes[i]` and `nodes[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Path {
    nodes: Vec<NodeId>,
    relationships: Vec<RelId>,
}

impl Path {
    pub(crate) fn new(nodes: Vec<NodeId>, relationships: Vec<RelId>) -> Self {
        debug_assert_eq!(nodes.len(), relationships.len() + 1);
        Self {
            nodes,
            relationships,
        }
    }

    /// The zero-length path holding only `node`.
    pub(crate) fn single(node: NodeId) -> Self {
        Self::new(vec![node], Vec::new())
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// True for the zero-length path.
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[RelId] {
        &self.relationships
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Alternating node, relationship, node, … view.
    pub fn entities(&self) -> Vec<PathEntity> {
        let mut out = Vec::with_capacity(self.nodes.len() + self.relationships.len());
        out.push(PathEntity::Node(self.nodes[0]));
        for (rel, node) in self.relationships.iter().zip(&self.nodes[1..]) {
            out.push(PathEntity::Relationship(*rel));
            out.push(PathEntity::Node(*node));
        }
        out
    }

    /// Resolve the path against `graph` into labeled steps.
    ///
    /// The first step carries no relationship. Each later step records the
    /// relationship used to reach it and whether that relationship was
    /// crossed along or against its stored direction.
    pub fn to_steps(&self, graph: &Graph) -> Vec<PathStep> {
        let mut steps = Vec::with_capacity(self.nodes.len());

        for (i, &node_id) in self.nodes.iter().enumerate() {
            let info = graph.node(node_id);
            let (rel_type, direction) = match i.checked_sub(1) {
                None => (None, None),
                Some(prev) => {
                    let rel = graph.relationship(self.relationships[prev]);
                    let rel_type = rel
                        .and_then(|r| graph.rel_type_name(r.rel_type))
                        .map(|s| s.to_string());
                    let direction = rel.map(|r| {
                        if r.start == self.nodes[prev] && r.end == node_id {
                            Direction::Outgoing
                        } else {
                            Direction::Incoming
                        }
                    });
                    (rel_type, direction)
                }
            };

            steps.push(PathStep {
                node_id,
                label: info.map(|n| n.label.clone()).unwrap_or_default(),
                app_id: info.and_then(|n| n.app_id.clone()),
                rel_type,
                direction,
            });
        }

        steps
    }
}

/// A single step in a path resolved against node metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PathStep {
    pub node_id: NodeId,
    pub label: String,
    pub app_id: Option<String>,
    pub rel_type: Option<String>,
    /// Direction the relationship was crossed to reach this node. None for the start node.
    pub direction: Option<Direction>,
}

/// Counters collected while enumerating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SearchStats {
    /// Deepest forward layer materialized.
    pub forward_depth: u32,
    /// Deepest backward layer materialized.
    pub backward_depth: u32,
    /// Widest frontier layer seen on either side, in partial paths.
    pub peak_frontier_width: usize,
    /// Relationships looked at during expansion, including pruned ones.
    pub relationships_examined: usize,
    /// Forward/backward layer pairs checked for meeting nodes.
    pub splits_tested: usize,
    /// Spliced candidates dropped for repeating a node across sides.
    pub collisions_rejected: usize,
    /// Spliced candidates dropped as already found via another split.
    pub duplicates_discarded: usize,
}

/// Paths found by one query together with its counters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PathSearch {
    pub paths: Vec<Path>,
    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeRecord;

    fn labeled(from: u64, to: u64, rel: &str) -> EdgeRecord {
        EdgeRecord {
            from_id: from,
            to_id: to,
            rel_type: rel.to_string(),
            from_label: format!("N{}", from),
            to_label: format!("N{}", to),
            from_app_id: Some(format!("c_{}", from)),
            to_app_id: Some(format!("c_{}", to)),
        }
    }

    #[test]
    fn test_entities_alternate() {
        let path = Path::new(vec![1, 2, 3], vec![10, 11]);
        assert_eq!(
            path.entities(),
            vec![
                PathEntity::Node(1),
                PathEntity::Relationship(10),
                PathEntity::Node(2),
                PathEntity::Relationship(11),
                PathEntity::Node(3),
            ]
        );
        assert_eq!(path.start(), 1);
        assert_eq!(path.end(), 3);
        assert_eq!(path.len(), 2);
        assert!(!path.is_empty());
    }

    #[test]
    fn test_single_node_path() {
        let path = Path::single(5);
        assert_eq!(path.entities(), vec![PathEntity::Node(5)]);
        assert_eq!(path.start(), path.end());
        assert!(path.is_empty());
        assert_eq!(path.into_nodes(), vec![5]);
    }

    #[test]
    fn test_to_steps_records_types_and_directions() {
        // 0 -A-> 1 <-B- 2, walked 0, 1, 2
        let mut g = Graph::new();
        g.load_edges(vec![labeled(0, 1, "A"), labeled(2, 1, "B")]);
        let path = Path::new(vec![0, 1, 2], vec![0, 1]);

        let steps = path.to_steps(&g);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].rel_type, None);
        assert_eq!(steps[0].direction, None);
        assert_eq!(steps[0].label, "N0");
        assert_eq!(steps[1].rel_type.as_deref(), Some("A"));
        assert_eq!(steps[1].direction, Some(Direction::Outgoing));
        assert_eq!(steps[2].rel_type.as_deref(), Some("B"));
        assert_eq!(steps[2].direction, Some(Direction::Incoming));
        assert_eq!(steps[2].app_id.as_deref(), Some("c_2"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_path_and_entities() {
        let path = Path::new(vec![1, 2], vec![7]);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!({ "nodes": [1, 2], "relationships": [7] }));

        let json = serde_json::to_value(path.entities()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "node": 1 }, { "relationship": 7 }, { "node": 2 }])
        );
    }
}
