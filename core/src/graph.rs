use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Node handle issued by the store. Equality is identity.
pub type NodeId = u64;

/// Relationship handle issued by the store. Dense: the n-th added edge is `n`.
pub type RelId = u64;

/// Interned relationship type index (avoids storing duplicate strings per edge).
pub type RelTypeId = u16;

/// Upper bound on distinct relationship types, fixed by the width of `RelTypeId`.
pub const MAX_REL_TYPES: usize = u16::MAX as usize;

/// Which way a single relationship was crossed, relative to its stored direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// Which relationships a traversal may follow from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    Outgoing,
    Incoming,
    Both,
}

impl TraversalDirection {
    /// The direction that walks the same relationships from the other end.
    pub fn reverse(self) -> Self {
        match self {
            TraversalDirection::Outgoing => TraversalDirection::Incoming,
            TraversalDirection::Incoming => TraversalDirection::Outgoing,
            TraversalDirection::Both => TraversalDirection::Both,
        }
    }
}

/// Metadata about a node.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub label: String,
    pub app_id: Option<String>,
}

/// One entry in an adjacency list.
///
/// `target` is the node on the far side: the end node in `outgoing`,
/// the start node in `incoming`.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub id: RelId,
    pub target: NodeId,
    pub rel_type: RelTypeId,
}

/// A stored relationship with its endpoints in stored orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub id: RelId,
    pub start: NodeId,
    pub end: NodeId,
    pub rel_type: RelTypeId,
}

impl Relationship {
    /// The endpoint opposite `known`, or None if `known` is not an endpoint.
    pub fn other_node(&self, known: NodeId) -> Option<NodeId> {
        if known == self.start {
            Some(self.end)
        } else if known == self.end {
            Some(self.start)
        } else {
            None
        }
    }
}

/// Input row for bulk loading.
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub rel_type: String,
    pub from_label: String,
    pub to_label: String,
    pub from_app_id: Option<String>,
    pub to_app_id: Option<String>,
}

/// What the path enumerator needs from a graph.
///
/// Handles are opaque and stable for the lifetime of a borrow of the store.
pub trait GraphStore {
    /// Whether `node` is known to the store.
    fn contains_node(&self, node: NodeId) -> bool;

    /// Relationships of type `rel_type` touching `node` in `direction`.
    ///
    /// A self-loop shows up once per matching side, so twice under `Both`.
    fn relationships_of(
        &self,
        node: NodeId,
        direction: TraversalDirection,
        rel_type: RelTypeId,
    ) -> impl Iterator<Item = RelId> + '_;

    /// The node reached by crossing `rel` from `known`.
    fn other_endpoint(&self, rel: RelId, known: NodeId) -> Option<NodeId>;
}

/// In-memory graph: adjacency lists + node metadata + relationship type interning.
///
/// Edges are stored bidirectionally: `outgoing[a]` contains edges from a,
/// `incoming[b]` contains edges into b. Both are populated on insert and
/// share the same `RelId`.
pub struct Graph {
    outgoing: HashMap<NodeId, Vec<Edge>>,
    incoming: HashMap<NodeId, Vec<Edge>>,
    nodes: HashMap<NodeId, NodeInfo>,
    relationships: Vec<Relationship>,
    app_id_index: HashMap<String, NodeId>,
    rel_types: Vec<String>,
    rel_type_map: HashMap<String, RelTypeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            nodes: HashMap::new(),
            relationships: Vec::new(),
            app_id_index: HashMap::new(),
            rel_types: Vec::new(),
            rel_type_map: HashMap::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            outgoing: HashMap::with_capacity(node_count),
            incoming: HashMap::with_capacity(node_count),
            nodes: HashMap::with_capacity(node_count),
            relationships: Vec::with_capacity(edge_count),
            app_id_index: HashMap::new(),
            rel_types: Vec::new(),
            rel_type_map: HashMap::new(),
        }
    }

    /// Intern a relationship type string, returning its compact ID.
    ///
    /// Panics once `MAX_REL_TYPES` distinct names have been interned.
    pub fn intern_rel_type(&mut self, rel_type: &str) -> RelTypeId {
        if let Some(&id) = self.rel_type_map.get(rel_type) {
            return id;
        }
        assert!(
            self.rel_types.len() < MAX_REL_TYPES,
            "relationship type count exceeded maximum of {}",
            MAX_REL_TYPES
        );
        let id = self.rel_types.len() as RelTypeId;
        self.rel_types.push(rel_type.to_string());
        self.rel_type_map.insert(rel_type.to_string(), id);
        id
    }

    /// Look up an already-interned relationship type.
    pub fn rel_type_id(&self, rel_type: &str) -> Option<RelTypeId> {
        self.rel_type_map.get(rel_type).copied()
    }

    /// Resolve a RelTypeId back to its string name.
    pub fn rel_type_name(&self, id: RelTypeId) -> Option<&str> {
        self.rel_types.get(id as usize).map(|s| s.as_str())
    }

    /// Register a node with metadata. Re-adding an id replaces its metadata.
    pub fn add_node(&mut self, id: NodeId, label: String, app_id: Option<String>) {
        if let Some(ref aid) = app_id {
            self.app_id_index.insert(aid.clone(), id);
        }
        self.nodes.insert(id, NodeInfo { label, app_id });
    }

    /// Add a directed relationship and return its handle.
    ///
    /// Endpoints missing from the node table are registered with an empty label.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, rel_type: RelTypeId) -> RelId {
        for id in [from, to] {
            self.nodes.entry(id).or_insert_with(|| NodeInfo {
                label: String::new(),
                app_id: None,
            });
        }

        let id = self.relationships.len() as RelId;
        self.relationships.push(Relationship {
            id,
            start: from,
            end: to,
            rel_type,
        });
        self.outgoing.entry(from).or_default().push(Edge {
            id,
            target: to,
            rel_type,
        });
        self.incoming.entry(to).or_default().push(Edge {
            id,
            target: from,
            rel_type,
        });
        id
    }

    /// Bulk load edge records. Nodes keep the label/app_id of their first appearance.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        for rec in edges {
            for (id, label, app_id) in [
                (rec.from_id, rec.from_label, rec.from_app_id),
                (rec.to_id, rec.to_label, rec.to_app_id),
            ] {
                if !self.nodes.contains_key(&id) {
                    self.add_node(id, label, app_id);
                }
            }

            let rt = self.intern_rel_type(&rec.rel_type);
            self.add_edge(rec.from_id, rec.to_id, rt);
        }
    }

    /// Look up a node by its application-level ID.
    pub fn resolve_app_id(&self, app_id: &str) -> Option<NodeId> {
        self.app_id_index.get(app_id).copied()
    }

    /// Get node metadata.
    pub fn node(&self, id: NodeId) -> Option<&NodeInfo> {
        self.nodes.get(&id)
    }

    /// Get a relationship by handle.
    pub fn relationship(&self, id: RelId) -> Option<&Relationship> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.relationships.get(idx))
    }

    /// Get outgoing edges for a node.
    pub fn neighbors_out(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get incoming edges for a node.
    pub fn neighbors_in(&self, id: NodeId) -> &[Edge] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.relationships.len()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let nodes_mem = self.nodes.len() * (size_of::<NodeId>() + size_of::<NodeInfo>() + 40);
        let out_edges: usize = self.outgoing.values().map(|v| v.len() * size_of::<Edge>()).sum();
        let in_edges: usize = self.incoming.values().map(|v| v.len() * size_of::<Edge>()).sum();
        let rels = self.relationships.len() * size_of::<Relationship>();
        let index_mem = self.app_id_index.len() * 80;

        nodes_mem + out_edges + in_edges + rels + index_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for Graph {
    fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Boolean side flags instead of Box/dyn, so both arms stay plain slice iterators.
    fn relationships_of(
        &self,
        node: NodeId,
        direction: TraversalDirection,
        rel_type: RelTypeId,
    ) -> impl Iterator<Item = RelId> + '_ {
        let (use_out, use_inc) = match direction {
            TraversalDirection::Outgoing => (true, false),
            TraversalDirection::Incoming => (false, true),
            TraversalDirection::Both => (true, true),
        };

        let out_iter = self.neighbors_out(node).iter().filter(move |_| use_out);
        let in_iter = self.neighbors_in(node).iter().filter(move |_| use_inc);

        out_iter
            .chain(in_iter)
            .filter(move |e| e.rel_type == rel_type)
            .map(|e| e.id)
    }

    fn other_endpoint(&self, rel: RelId, known: NodeId) -> Option<NodeId> {
        self.relationship(rel).and_then(|r| r.other_node(known))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: u64, to: u64, rel: &str) -> EdgeRecord {
        EdgeRecord {
            from_id: from,
            to_id: to,
            rel_type: rel.to_string(),
            from_label: "Node".to_string(),
            to_label: "Node".to_string(),
            from_app_id: None,
            to_app_id: None,
        }
    }

    fn rels(g: &Graph, node: NodeId, dir: TraversalDirection, rel: &str) -> Vec<RelId> {
        let rt = g.rel_type_id(rel).unwrap();
        let mut out: Vec<RelId> = g.relationships_of(node, dir, rt).collect();
        out.sort();
        out
    }

    #[test]
    fn test_app_id_resolution() {
        let mut g = Graph::new();
        g.add_node(42, "Concept".into(), Some("c_abc123".into()));
        assert_eq!(g.resolve_app_id("c_abc123"), Some(42));
        assert_eq!(g.resolve_app_id("nonexistent"), None);
    }

    #[test]
    fn test_graph_counts() {
        let mut g = Graph::new();
        g.load_edges((1..=50).map(|i| edge(0, i, "HAS")));
        assert_eq!(g.node_count(), 51);
        assert_eq!(g.edge_count(), 50);
        assert!(g.memory_usage() > 0);
    }

    #[test]
    fn test_rel_ids_are_dense() {
        let mut g = Graph::new();
        let r = g.intern_rel_type("NEXT");
        assert_eq!(g.add_edge(0, 1, r), 0);
        assert_eq!(g.add_edge(1, 2, r), 1);
        let rel = g.relationship(1).unwrap();
        assert_eq!((rel.start, rel.end), (1, 2));
        assert!(g.relationship(2).is_none());
    }

    #[test]
    fn test_add_edge_registers_endpoints() {
        let mut g = Graph::new();
        let r = g.intern_rel_type("NEXT");
        g.add_edge(7, 8, r);
        assert!(g.contains_node(7));
        assert!(g.contains_node(8));
        assert!(!g.contains_node(9));
    }

    #[test]
    fn test_rel_type_name_valid() {
        let mut g = Graph::new();
        let id = g.intern_rel_type("IMPLIES");
        assert_eq!(g.intern_rel_type("IMPLIES"), id);
        assert_eq!(g.rel_type_name(id), Some("IMPLIES"));
        assert_eq!(g.rel_type_id("IMPLIES"), Some(id));
    }

    #[test]
    fn test_rel_type_name_invalid() {
        let g = Graph::new();
        assert_eq!(g.rel_type_name(999), None);
        assert_eq!(g.rel_type_id("MISSING"), None);
    }

    #[test]
    #[should_panic(expected = "exceeded maximum")]
    fn test_rel_type_overflow() {
        let mut g = Graph::new();
        for i in 0..=u16::MAX as u32 {
            g.intern_rel_type(&format!("REL_{}", i));
        }
    }

    #[test]
    fn test_edge_record_loading() {
        let mut g = Graph::new();
        g.load_edges(vec![EdgeRecord {
            from_id: 1,
            to_id: 2,
            rel_type: "IMPLIES".to_string(),
            from_label: "Concept".to_string(),
            to_label: "Concept".to_string(),
            from_app_id: Some("c_1".to_string()),
            to_app_id: Some("c_2".to_string()),
        }]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.resolve_app_id("c_1"), Some(1));
        assert_eq!(g.resolve_app_id("c_2"), Some(2));
        assert_eq!(g.node(1).unwrap().label, "Concept");
    }

    #[test]
    fn test_relationships_of_by_direction() {
        // 0→1 (A), 2→1 (A), 1→3 (B)
        let mut g = Graph::new();
        g.load_edges(vec![edge(0, 1, "A"), edge(2, 1, "A"), edge(1, 3, "B")]);

        assert_eq!(rels(&g, 1, TraversalDirection::Incoming, "A"), vec![0, 1]);
        assert!(rels(&g, 1, TraversalDirection::Outgoing, "A").is_empty());
        assert_eq!(rels(&g, 1, TraversalDirection::Outgoing, "B"), vec![2]);
        assert_eq!(rels(&g, 1, TraversalDirection::Both, "A"), vec![0, 1]);
        assert!(rels(&g, 99, TraversalDirection::Both, "A").is_empty());
    }

    #[test]
    fn test_self_loop_listed_per_side() {
        let mut g = Graph::new();
        g.load_edges(vec![edge(0, 0, "SELF")]);
        assert_eq!(rels(&g, 0, TraversalDirection::Outgoing, "SELF"), vec![0]);
        assert_eq!(rels(&g, 0, TraversalDirection::Both, "SELF"), vec![0, 0]);
        assert_eq!(g.other_endpoint(0, 0), Some(0));
    }

    #[test]
    fn test_other_endpoint() {
        let mut g = Graph::new();
        g.load_edges(vec![edge(4, 5, "A")]);
        assert_eq!(g.other_endpoint(0, 4), Some(5));
        assert_eq!(g.other_endpoint(0, 5), Some(4));
        assert_eq!(g.other_endpoint(0, 6), None);
        assert_eq!(g.other_endpoint(3, 4), None);
    }

    #[test]
    fn test_direction_reverse() {
        assert_eq!(TraversalDirection::Outgoing.reverse(), TraversalDirection::Incoming);
        assert_eq!(TraversalDirection::Incoming.reverse(), TraversalDirection::Outgoing);
        assert_eq!(TraversalDirection::Both.reverse(), TraversalDirection::Both);
    }
}
