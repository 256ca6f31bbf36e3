// Import Graph
//
// Package-level dependency graph on a petgraph `DiGraph`. Edges point from
// importer to imported package; walks follow them in both directions, so a
// package's dependencies and its dependents are reached alike.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap, VecDeque};

#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    /// The directed import graph, one node per import path
    graph: DiGraph<String, ()>,
    /// Lookup from import path to graph node index
    node_map: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from (importer, imported) pairs
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    fn node(&mut self, package: String) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&package) {
            return idx;
        }
        let idx = self.graph.add_node(package.clone());
        self.node_map.insert(package, idx);
        idx
    }

    /// Register a package even if it has no imports and no importers
    pub fn add_package(&mut self, package: impl Into<String>) {
        self.node(package.into());
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from_idx = self.node(from.into());
        let to_idx = self.node(to.into());
        // Repeated imports of one package collapse into a single edge
        self.graph.update_edge(from_idx, to_idx, ());
    }

    /// Every registered package
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.graph.node_weights().map(String::as_str).collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn imports_of(&self, package: &str) -> impl Iterator<Item = &str> {
        self.neighbors(package, Direction::Outgoing).into_iter()
    }

    pub fn importers_of(&self, package: &str) -> impl Iterator<Item = &str> {
        self.neighbors(package, Direction::Incoming).into_iter()
    }

    /// Sorted neighbor names; petgraph yields them in reverse insertion order
    fn neighbors(&self, package: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(package) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Packages connected to any seed, following edges in both directions
    ///
    /// Seeds that were never registered are ignored.
    pub fn connected_to<'a, I>(&'a self, seeds: I) -> BTreeSet<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut visited = vec![false; self.graph.node_count()];
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();

        for seed in seeds {
            if let Some(&idx) = self.node_map.get(seed) {
                if !visited[idx.index()] {
                    visited[idx.index()] = true;
                    queue.push_back(idx);
                }
            }
        }

        let mut connected = BTreeSet::new();
        while let Some(current) = queue.pop_front() {
            connected.insert(self.graph[current].as_str());
            for next in self.graph.neighbors_undirected(current) {
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }

        connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = ImportGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.connected_to(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_simple_chain() {
        // a -> b -> c
        let graph = ImportGraph::from_edges([("a", "b"), ("b", "c")]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.imports_of("a").collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(graph.importers_of("c").collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(graph.nodes().into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_imports_single_edge() {
        let mut graph = ImportGraph::from_edges([("app", "lib"), ("app", "lib")]);
        graph.add_package("app");

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_neighbors_sorted() {
        let graph = ImportGraph::from_edges([("app", "zlib"), ("app", "fmt"), ("app", "io")]);
        assert_eq!(
            graph.imports_of("app").collect::<Vec<_>>(),
            vec!["fmt", "io", "zlib"]
        );
        assert!(graph.imports_of("missing").next().is_none());
    }

    #[test]
    fn test_walk_reaches_dependents() {
        // app -> lib, tool -> lib; starting from lib must find both importers
        let graph = ImportGraph::from_edges([("app", "lib"), ("tool", "lib")]);

        let connected = graph.connected_to(["lib"]);

        assert!(connected.contains("app"));
        assert!(connected.contains("tool"));
    }

    #[test]
    fn test_walk_crosses_direction_changes() {
        // From a: down to shared, back up to b, down to only_b
        let graph = ImportGraph::from_edges([
            ("a", "shared"),
            ("b", "shared"),
            ("b", "only_b"),
        ]);

        let connected = graph.connected_to(["a"]);

        assert_eq!(
            connected.into_iter().collect::<Vec<_>>(),
            vec!["a", "b", "only_b", "shared"]
        );
    }

    #[test]
    fn test_cycle_handling() {
        let graph = ImportGraph::from_edges([("a", "b"), ("b", "c"), ("c", "a")]);
        let connected = graph.connected_to(["b"]);
        assert_eq!(connected.len(), 3);
    }

    #[test]
    fn test_disconnected_components() {
        let mut graph = ImportGraph::from_edges([("a", "b"), ("c", "d")]);
        graph.add_package("lonely");

        let connected = graph.connected_to(["a", "unknown"]);

        assert!(connected.contains("b"));
        assert!(!connected.contains("c"));
        assert!(!connected.contains("lonely"));
        assert!(!connected.contains("unknown"));
        assert_eq!(graph.node_count(), 5);
    }
}
