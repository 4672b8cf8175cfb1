//! Shortest-path engine with node exclusion and fallback rerouting.
//!
//! The primary path is the planned route: it is computed on the full graph,
//! unaware of current safety. Exclusions only drive the alternate
//! computation, mirroring how a filed flight plan is re-checked against the
//! cities that have since gone unsafe.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::error::RouteError;
use crate::graph::{Graph, NodeId, NodeMask};

/// A concrete path through the graph with its total travel time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePath {
    /// Cities from start to end inclusive.
    pub cities: Vec<String>,
    pub total_minutes: u32,
}

/// Outcome of a single routing request. Created fresh per call, never retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Shortest path ignoring exclusions. Absent when start and end are
    /// disconnected, or when an endpoint is itself excluded.
    pub primary: Option<RoutePath>,
    /// Shortest path avoiding the exclusion set. Present only when the
    /// primary crosses an excluded city and a detour exists.
    pub alternate: Option<RoutePath>,
    /// The excluded city whose removal produced the alternate.
    pub rerouted_at: Option<String>,
}

/// Compute the primary path and, if it crosses an excluded city, an alternate.
///
/// Unknown `start`/`end` fail with [`RouteError::NodeNotFound`]. An excluded
/// endpoint makes the leg unreachable and yields the empty decision; "no
/// path" is always a normal outcome, never an error.
pub fn find_route(
    graph: &Graph,
    start: &str,
    end: &str,
    excluded: &HashSet<String>,
) -> Result<RoutingDecision, RouteError> {
    let start_id = graph
        .node(start)
        .ok_or_else(|| RouteError::NodeNotFound(start.to_string()))?;
    let end_id = graph
        .node(end)
        .ok_or_else(|| RouteError::NodeNotFound(end.to_string()))?;

    if excluded.contains(start) || excluded.contains(end) {
        return Ok(RoutingDecision::default());
    }

    let unmasked = NodeMask::new(graph);
    let Some(primary) = dijkstra(graph, &unmasked, start_id, end_id) else {
        return Ok(RoutingDecision::default());
    };

    // Working view of the graph with every excluded city hidden. Cities not
    // present in the graph are ignored.
    let mut mask = NodeMask::new(graph);
    for city in excluded {
        if let Some(id) = graph.node(city) {
            mask.hide(id);
        }
    }

    // Blockers are the excluded cities on the interior of the planned path,
    // in path order. Endpoints were already ruled out above.
    let interior = if primary.nodes.len() > 2 {
        &primary.nodes[1..primary.nodes.len() - 1]
    } else {
        &[][..]
    };
    let blockers: Vec<NodeId> = interior
        .iter()
        .copied()
        .filter(|id| mask.is_hidden(*id))
        .collect();

    if blockers.is_empty() {
        return Ok(RoutingDecision {
            primary: Some(primary.to_route(graph)),
            ..Default::default()
        });
    }

    // Retry once per blocker on the original primary path, on the
    // progressively reduced working view, stopping at the first detour that
    // exists. The fresh alternate is not re-scanned for further blockers.
    for blocker in blockers {
        mask.hide(blocker);
        tracing::debug!(
            city = graph.name(blocker),
            "rerouting around excluded city"
        );
        if let Some(alternate) = dijkstra(graph, &mask, start_id, end_id) {
            let rerouted_at = graph.name(blocker).to_string();
            return Ok(RoutingDecision {
                primary: Some(primary.to_route(graph)),
                alternate: Some(alternate.to_route(graph)),
                rerouted_at: Some(rerouted_at),
            });
        }
    }

    Ok(RoutingDecision {
        primary: Some(primary.to_route(graph)),
        ..Default::default()
    })
}

/// Path found by a single Dijkstra run, still in node-id form.
struct FoundPath {
    nodes: Vec<NodeId>,
    total_minutes: u32,
}

impl FoundPath {
    fn to_route(&self, graph: &Graph) -> RoutePath {
        RoutePath {
            cities: self
                .nodes
                .iter()
                .map(|id| graph.name(*id).to_string())
                .collect(),
            total_minutes: self.total_minutes,
        }
    }
}

/// Dijkstra over the masked graph view.
///
/// The heap is ordered by (distance, node index), so equal-cost ties resolve
/// to the lower node index and runs are deterministic for a fixed graph.
fn dijkstra(graph: &Graph, mask: &NodeMask, start: NodeId, end: NodeId) -> Option<FoundPath> {
    if mask.is_hidden(start) || mask.is_hidden(end) {
        return None;
    }

    let node_count = graph.node_count();
    let mut dist = vec![u32::MAX; node_count];
    let mut prev = vec![usize::MAX; node_count];
    let mut heap = BinaryHeap::new();

    dist[start.0] = 0;
    heap.push(Reverse((0u32, start.0)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if d > dist[u] {
            continue;
        }
        if u == end.0 {
            break;
        }
        for &(v, minutes) in graph.neighbors(NodeId(u)) {
            if mask.is_hidden(v) {
                continue;
            }
            let candidate = d.saturating_add(minutes);
            if candidate < dist[v.0] {
                dist[v.0] = candidate;
                prev[v.0] = u;
                heap.push(Reverse((candidate, v.0)));
            }
        }
    }

    if dist[end.0] == u32::MAX {
        return None;
    }

    let mut nodes = vec![end];
    let mut current = end.0;
    while current != start.0 {
        current = prev[current];
        nodes.push(NodeId(current));
    }
    nodes.reverse();

    Some(FoundPath {
        nodes,
        total_minutes: dist[end.0],
    })
}
