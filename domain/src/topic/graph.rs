//! Undirected topic graph

use super::layout::{self, GraphSnapshot};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Unordered pair of topic labels (Value Object)
///
/// Endpoints are stored in sorted order, so `{a, b}` and `{b, a}` compare
/// equal. A self-loop has both endpoints equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicEdge {
    a: String,
    b: String,
}

impl TopicEdge {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        let (x, y) = (x.into(), y.into());
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }

    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

/// Incrementally built graph of discussed topics (Entity)
///
/// Nodes are deduplicated by label and edges by endpoint pair. Nothing is
/// ever removed. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct TopicGraph {
    nodes: IndexSet<String>,
    edges: IndexSet<TopicEdge>,
}

impl TopicGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a topic node. Adding an existing label is a no-op.
    pub fn add_topic(&mut self, label: &str) {
        if !self.nodes.contains(label) {
            self.nodes.insert(label.to_string());
        }
    }

    /// Ensure `topic` exists and is linked to every entry of `related`.
    ///
    /// Repeated entries collapse into a single edge. An entry equal to
    /// `topic` produces a self-loop.
    pub fn add_related<I, S>(&mut self, topic: &str, related: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_topic(topic);
        for entry in related {
            let entry = entry.as_ref();
            self.add_topic(entry);
            self.edges.insert(TopicEdge::new(topic, entry));
        }
    }

    pub fn contains_topic(&self, label: &str) -> bool {
        self.nodes.contains(label)
    }

    pub fn contains_edge(&self, x: &str, y: &str) -> bool {
        self.edges.contains(&TopicEdge::new(x, y))
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = &TopicEdge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Positioned view of the current graph for rendering.
    pub fn snapshot(&self) -> GraphSnapshot {
        let index_edges: Vec<(usize, usize)> = self
            .edges
            .iter()
            .filter(|edge| !edge.is_self_loop())
            .filter_map(|edge| {
                let (a, b) = edge.endpoints();
                Some((self.nodes.get_index_of(a)?, self.nodes.get_index_of(b)?))
            })
            .collect();

        let positions = layout::force_layout(self.nodes.len(), &index_edges);

        GraphSnapshot::new(
            self.nodes.iter().cloned().zip(positions).collect(),
            self.edges.iter().cloned().collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_topic_idempotent() {
        let mut once = TopicGraph::new();
        once.add_topic("entropy");

        let mut twice = TopicGraph::new();
        twice.add_topic("entropy");
        twice.add_topic("entropy");

        assert_eq!(
            once.topics().collect::<Vec<_>>(),
            twice.topics().collect::<Vec<_>>()
        );
        assert_eq!(twice.node_count(), 1);
    }

    #[test]
    fn test_duplicate_relation_collapses() {
        let mut graph = TopicGraph::new();
        graph.add_related("A", ["B", "B"]);

        assert_eq!(graph.topics().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge("A", "B"));
    }

    #[test]
    fn test_edges_are_undirected() {
        let mut graph = TopicGraph::new();
        graph.add_related("A", ["B"]);
        graph.add_related("B", ["A"]);

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge("B", "A"));
        assert_eq!(TopicEdge::new("x", "y"), TopicEdge::new("y", "x"));
    }

    #[test]
    fn test_self_loop_is_accepted() {
        let mut graph = TopicGraph::new();
        graph.add_related("A", ["A"]);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.edges().all(TopicEdge::is_self_loop));

        let snapshot = graph.snapshot();
        assert_eq!(snapshot.nodes().len(), 1);
        assert_eq!(snapshot.edges().len(), 1);
    }

    #[test]
    fn test_add_related_with_no_entries_adds_topic() {
        let mut graph = TopicGraph::new();
        graph.add_related("alone", Vec::<String>::new());
        assert!(graph.contains_topic("alone"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_snapshot_represents_every_node_and_edge() {
        let mut graph = TopicGraph::new();
        graph.add_related("What is entropy?", ["Entropy measures disorder."]);
        graph.add_related("What is heat?", ["Heat is energy in transit."]);
        graph.add_topic("thermodynamics");

        let snapshot = graph.snapshot();
        let labels: Vec<&str> = snapshot.nodes().iter().map(|n| n.label()).collect();
        assert_eq!(
            labels,
            vec![
                "What is entropy?",
                "Entropy measures disorder.",
                "What is heat?",
                "Heat is energy in transit.",
                "thermodynamics",
            ]
        );
        assert_eq!(snapshot.edges().len(), 2);
        assert!(snapshot.position_of("thermodynamics").is_some());
    }
}
