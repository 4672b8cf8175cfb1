//! Immutable city graph built from a travel-time matrix.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::RouteError;

/// Dense index of a city in the graph's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// One cell of the travel-time matrix: minutes between two cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub origin: String,
    pub destination: String,
    pub minutes: u32,
}

/// Undirected weighted graph of cities.
///
/// Cities are kept in insertion order and addressed by dense index, with an
/// adjacency list per node. The graph is immutable after construction and
/// safe to share read-only across concurrent routing requests; per-request
/// exclusions go through a [`NodeMask`] overlay instead of mutating or
/// copying the graph.
#[derive(Debug, Clone)]
pub struct Graph {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<(NodeId, u32)>>,
}

impl Graph {
    /// Build a graph from city names and `(origin, destination, minutes)` entries.
    ///
    /// Entries are applied in order; a later entry for the same unordered
    /// pair overwrites the earlier weight in both directions. Entries where
    /// origin and destination coincide (the matrix diagonal) are skipped,
    /// since a zero-length loop never changes a shortest path.
    pub fn build(names: &[String], entries: &[MatrixEntry]) -> Result<Graph, RouteError> {
        if names.is_empty() {
            return Err(RouteError::InvalidGraphData("city list is empty".into()));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), NodeId(i)).is_some() {
                return Err(RouteError::InvalidGraphData(format!(
                    "duplicate city name '{name}'"
                )));
            }
        }

        let mut graph = Graph {
            names: names.to_vec(),
            index,
            adjacency: vec![Vec::new(); names.len()],
        };

        for entry in entries {
            let origin = graph.node(&entry.origin).ok_or_else(|| {
                RouteError::InvalidGraphData(format!(
                    "entry references unknown city '{}'",
                    entry.origin
                ))
            })?;
            let destination = graph.node(&entry.destination).ok_or_else(|| {
                RouteError::InvalidGraphData(format!(
                    "entry references unknown city '{}'",
                    entry.destination
                ))
            })?;
            if origin == destination {
                continue;
            }
            graph.set_edge(origin, destination, entry.minutes);
        }

        Ok(graph)
    }

    /// Insert or overwrite the undirected edge between `a` and `b`.
    fn set_edge(&mut self, a: NodeId, b: NodeId, minutes: u32) {
        for (from, to) in [(a, b), (b, a)] {
            let list = &mut self.adjacency[from.0];
            match list.iter_mut().find(|(n, _)| *n == to) {
                Some(slot) => slot.1 = minutes,
                None => list.push((to, minutes)),
            }
        }
    }

    /// Look up a city by name.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// City name for a node id.
    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.0]
    }

    /// City names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Neighbors of a node with edge weights in minutes.
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, u32)] {
        &self.adjacency[node.0]
    }

    /// Weight of the edge between two cities, if both exist and are connected.
    pub fn edge_minutes(&self, a: &str, b: &str) -> Option<u32> {
        let a = self.node(a)?;
        let b = self.node(b)?;
        self.adjacency[a.0]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|(_, w)| *w)
    }
}

/// Request-local exclusion overlay for a shared [`Graph`].
///
/// Hiding a node removes it and its incident edges from the view of a
/// traversal without touching the underlying graph, so masking is O(hidden
/// nodes) instead of a full graph copy per rerouting attempt.
#[derive(Debug, Clone)]
pub struct NodeMask {
    hidden: Vec<bool>,
}

impl NodeMask {
    /// Empty mask sized to `graph`; every node starts visible.
    pub fn new(graph: &Graph) -> Self {
        Self {
            hidden: vec![false; graph.node_count()],
        }
    }

    pub fn hide(&mut self, node: NodeId) {
        self.hidden[node.0] = true;
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.hidden[node.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(origin: &str, destination: &str, minutes: u32) -> MatrixEntry {
        MatrixEntry {
            origin: origin.into(),
            destination: destination.into(),
            minutes,
        }
    }

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_undirected_edges() {
        let graph = Graph::build(
            &cities(&["Kanpur", "Indore", "Bhopal"]),
            &[entry("Kanpur", "Indore", 45), entry("Indore", "Bhopal", 30)],
        )
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_minutes("Kanpur", "Indore"), Some(45));
        assert_eq!(graph.edge_minutes("Indore", "Kanpur"), Some(45));
        assert_eq!(graph.edge_minutes("Kanpur", "Bhopal"), None);
    }

    #[test]
    fn later_entry_overwrites_both_directions() {
        let graph = Graph::build(
            &cities(&["A", "B"]),
            &[entry("A", "B", 10), entry("B", "A", 25)],
        )
        .unwrap();

        assert_eq!(graph.edge_minutes("A", "B"), Some(25));
        assert_eq!(graph.edge_minutes("B", "A"), Some(25));
        // Only one edge per unordered pair.
        assert_eq!(graph.neighbors(graph.node("A").unwrap()).len(), 1);
    }

    #[test]
    fn diagonal_entries_are_skipped() {
        let graph =
            Graph::build(&cities(&["A", "B"]), &[entry("A", "A", 0), entry("A", "B", 5)]).unwrap();
        assert_eq!(graph.neighbors(graph.node("A").unwrap()).len(), 1);
    }

    #[test]
    fn rejects_unknown_city_in_entry() {
        let err = Graph::build(&cities(&["A", "B"]), &[entry("A", "Z", 5)]).unwrap_err();
        assert!(matches!(err, RouteError::InvalidGraphData(_)));
    }

    #[test]
    fn rejects_empty_and_duplicate_names() {
        assert!(matches!(
            Graph::build(&[], &[]),
            Err(RouteError::InvalidGraphData(_))
        ));
        assert!(matches!(
            Graph::build(&cities(&["A", "A"]), &[]),
            Err(RouteError::InvalidGraphData(_))
        ));
    }

    #[test]
    fn mask_hides_nodes_without_touching_graph() {
        let graph = Graph::build(&cities(&["A", "B"]), &[entry("A", "B", 5)]).unwrap();
        let mut mask = NodeMask::new(&graph);
        let b = graph.node("B").unwrap();

        assert!(!mask.is_hidden(b));
        mask.hide(b);
        assert!(mask.is_hidden(b));
        assert_eq!(graph.edge_minutes("A", "B"), Some(5));
    }
}
