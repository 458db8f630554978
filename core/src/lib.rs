//! graph-paths-core: all-simple-paths enumeration over an in-memory graph.
//!
//! Keeps an adjacency list with interned relationship types and enumerates
//! every simple path between two nodes up to a length bound, searching from
//! both ends at once. The enumerator reaches the graph only through the
//! `GraphStore` trait, so other stores can plug in.
//!
//! ```
//! use graph_paths_core::{AllSimplePaths, Graph, TraversalDirection};
//!
//! let mut graph = Graph::new();
//! let next = graph.intern_rel_type("NEXT");
//! graph.add_edge(1, 2, next);
//! graph.add_edge(2, 3, next);
//!
//! let paths = AllSimplePaths::new(&graph, 1, 3, next, TraversalDirection::Outgoing)?;
//! assert_eq!(paths.paths_as_nodes(5)?, vec![vec![1, 2, 3]]);
//! # Ok::<(), graph_paths_core::PathError>(())
//! ```

mod combine;
mod config;
mod error;
mod frontier;
mod graph;
mod path;
mod simple_paths;

pub use config::{SearchConfig, ZeroLengthPath, DEFAULT_MAX_FRONTIER_PATHS, DEFAULT_MAX_PATHS};
pub use error::{check_non_negative, PathError, PathResult, Resource};
pub use graph::{
    Direction, Edge, EdgeRecord, Graph, GraphStore, NodeId, NodeInfo, RelId, RelTypeId,
    Relationship, TraversalDirection, MAX_REL_TYPES,
};
pub use path::{Path, PathEntity, PathSearch, PathStep, SearchStats};
pub use simple_paths::AllSimplePaths;
