use tracing::debug;

use crate::combine::Combiner;
use crate::config::{SearchConfig, ZeroLengthPath};
use crate::error::{check_non_negative, PathError, PathResult};
use crate::frontier::{Frontier, Side};
use crate::graph::{GraphStore, NodeId, RelTypeId, TraversalDirection};
use crate::path::{Path, PathEntity, PathSearch, SearchStats};

/// Enumerates every simple path between two nodes over one relationship type.
///
/// The search runs from both ends at once: a forward side grows from `start`
/// along `direction`, a backward side grows from `end` along the reversed
/// direction, and layers from the two sides are spliced wherever their
/// terminal nodes meet. Each call recomputes from scratch, so one instance
/// can be queried at any number of bounds.
pub struct AllSimplePaths<'g, G: GraphStore> {
    graph: &'g G,
    start: NodeId,
    end: NodeId,
    rel_type: RelTypeId,
    direction: TraversalDirection,
    config: SearchConfig,
}

impl<'g, G: GraphStore> AllSimplePaths<'g, G> {
    /// Bind an enumerator with default limits.
    ///
    /// Fails with `InvalidArgument` if either endpoint is unknown to `graph`.
    pub fn new(
        graph: &'g G,
        start: NodeId,
        end: NodeId,
        rel_type: RelTypeId,
        direction: TraversalDirection,
    ) -> PathResult<Self> {
        Self::with_config(graph, start, end, rel_type, direction, SearchConfig::default())
    }

    pub fn with_config(
        graph: &'g G,
        start: NodeId,
        end: NodeId,
        rel_type: RelTypeId,
        direction: TraversalDirection,
        config: SearchConfig,
    ) -> PathResult<Self> {
        if !graph.contains_node(start) {
            return Err(PathError::invalid("start", format!("node {} not found", start)));
        }
        if !graph.contains_node(end) {
            return Err(PathError::invalid("end", format!("node {} not found", end)));
        }
        config.validate()?;

        Ok(Self {
            graph,
            start,
            end,
            rel_type,
            direction,
            config,
        })
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Every simple path of at most `max_depth` relationships, as
    /// alternating node/relationship sequences.
    pub fn paths(&self, max_depth: i32) -> PathResult<Vec<Vec<PathEntity>>> {
        let found = self.search(max_depth)?;
        Ok(found.paths.iter().map(Path::entities).collect())
    }

    /// The same paths as `paths`, with relationships dropped.
    pub fn paths_as_nodes(&self, max_depth: i32) -> PathResult<Vec<Vec<NodeId>>> {
        let found = self.search(max_depth)?;
        Ok(found.paths.into_iter().map(Path::into_nodes).collect())
    }

    /// Run the search and return typed paths with counters.
    ///
    /// Order of the returned paths is unspecified.
    pub fn search(&self, max_depth: i32) -> PathResult<PathSearch> {
        let max_depth = check_non_negative(max_depth, "max_depth")?;
        debug!(
            start = self.start,
            end = self.end,
            max_depth,
            direction = ?self.direction,
            "simple path search started"
        );

        let mut stats = SearchStats::default();
        let mut combiner = Combiner::new(max_depth as usize, self.config.max_paths);

        if self.start == self.end {
            // Any longer path would revisit the anchor.
            if self.config.zero_length == ZeroLengthPath::Include {
                combiner.accept(Path::single(self.start))?;
            }
            return Ok(self.finish(combiner, stats));
        }

        let mut forward = vec![Frontier::seed(Side::Forward, self.start)];
        let mut backward = vec![Frontier::seed(Side::Backward, self.end)];

        loop {
            let (fwd_last, bwd_last) = match (forward.last(), backward.last()) {
                (Some(f), Some(b)) => (f, b),
                _ => break,
            };
            if fwd_last.depth() + bwd_last.depth() >= max_depth {
                break;
            }

            // Grow the narrower side; ties go to the shallower one, then forward.
            let side = match fwd_last.width().cmp(&bwd_last.width()) {
                std::cmp::Ordering::Less => Side::Forward,
                std::cmp::Ordering::Greater => Side::Backward,
                std::cmp::Ordering::Equal if bwd_last.depth() < fwd_last.depth() => Side::Backward,
                std::cmp::Ordering::Equal => Side::Forward,
            };
            let (grown, opposite) = match side {
                Side::Forward => (&mut forward, &backward),
                Side::Backward => (&mut backward, &forward),
            };

            let next = grown[grown.len() - 1].expand(
                self.graph,
                self.rel_type,
                self.direction,
                self.config.max_frontier_paths,
                &mut stats,
            )?;
            match side {
                Side::Forward => stats.forward_depth = next.depth(),
                Side::Backward => stats.backward_depth = next.depth(),
            }

            // An empty layer means no simple path from this anchor is that
            // long, and every shorter one already met the other anchor.
            if next.is_empty() {
                debug!(side = ?side, depth = next.depth(), "frontier exhausted");
                break;
            }

            for layer in opposite.iter() {
                match side {
                    Side::Forward => combiner.combine(&next, layer, &mut stats)?,
                    Side::Backward => combiner.combine(layer, &next, &mut stats)?,
                }
            }
            grown.push(next);
        }

        Ok(self.finish(combiner, stats))
    }

    fn finish(&self, combiner: Combiner, stats: SearchStats) -> PathSearch {
        debug!(
            start = self.start,
            end = self.end,
            paths = combiner.len(),
            forward_depth = stats.forward_depth,
            backward_depth = stats.backward_depth,
            peak_frontier_width = stats.peak_frontier_width,
            "simple path search finished"
        );
        PathSearch {
            paths: combiner.into_paths(),
            stats,
        }
    }
}
