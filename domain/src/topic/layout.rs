//! Force-directed layout for topic graph snapshots
//!
//! Nodes start evenly spaced on a circle, so the result depends only on the
//! graph. A fixed number of Fruchterman-Reingold iterations with a cooling
//! temperature then pulls linked topics together and pushes every pair
//! apart. Coordinates live in the unit square.

use super::graph::TopicEdge;
use serde::Serialize;

const ITERATIONS: usize = 200;
const START_TEMPERATURE: f32 = 0.1;
const MARGIN: f32 = 0.05;

/// 2D position in the unit square
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    pub x: f32,
    pub y: f32,
}

impl NodePosition {
    pub fn distance(&self, other: &NodePosition) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A topic label with its layout position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedTopic {
    label: String,
    #[serde(flatten)]
    position: NodePosition,
}

impl PositionedTopic {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> NodePosition {
        self.position
    }
}

/// Point-in-time view of a topic graph, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSnapshot {
    nodes: Vec<PositionedTopic>,
    edges: Vec<TopicEdge>,
}

impl GraphSnapshot {
    pub(crate) fn new(nodes: Vec<(String, NodePosition)>, edges: Vec<TopicEdge>) -> Self {
        Self {
            nodes: nodes
                .into_iter()
                .map(|(label, position)| PositionedTopic { label, position })
                .collect(),
            edges,
        }
    }

    pub fn nodes(&self) -> &[PositionedTopic] {
        &self.nodes
    }

    pub fn edges(&self) -> &[TopicEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position_of(&self, label: &str) -> Option<NodePosition> {
        self.nodes
            .iter()
            .find(|node| node.label == label)
            .map(|node| node.position)
    }
}

fn clamp_unit(v: f32) -> f32 {
    v.clamp(MARGIN, 1.0 - MARGIN)
}

fn circle_position(i: usize, n: usize) -> NodePosition {
    if n <= 1 {
        return NodePosition { x: 0.5, y: 0.5 };
    }
    let radius = 0.4f32;
    let a = (i as f32 / n as f32) * std::f32::consts::TAU;
    NodePosition {
        x: clamp_unit(0.5 + radius * a.cos()),
        y: clamp_unit(0.5 + radius * a.sin()),
    }
}

/// Lay out `n` nodes connected by `edges` (pairs of node indices).
pub(crate) fn force_layout(n: usize, edges: &[(usize, usize)]) -> Vec<NodePosition> {
    let mut pos: Vec<NodePosition> = (0..n).map(|i| circle_position(i, n)).collect();
    if n <= 1 {
        return pos;
    }

    for step in 0..ITERATIONS {
        let temperature = START_TEMPERATURE * (1.0 - step as f32 / ITERATIONS as f32);
        layout_step(edges, &mut pos, temperature);
    }
    pos
}

fn layout_step(edges: &[(usize, usize)], pos: &mut [NodePosition], temperature: f32) {
    let n = pos.len();
    let k = (1.0 / n as f32).sqrt().max(1e-3);
    let k2 = k * k;

    let mut disp = vec![(0.0f32, 0.0f32); n];

    // Repulsion between every pair
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = pos[i].x - pos[j].x;
            let dy = pos[i].y - pos[j].y;
            let dist = (dx * dx + dy * dy).max(1e-6).sqrt();
            let f = k2 / dist;
            let (fx, fy) = ((dx / dist) * f, (dy / dist) * f);
            disp[i].0 += fx;
            disp[i].1 += fy;
            disp[j].0 -= fx;
            disp[j].1 -= fy;
        }
    }

    // Attraction along edges
    for &(a, b) in edges {
        let dx = pos[a].x - pos[b].x;
        let dy = pos[a].y - pos[b].y;
        let dist2 = (dx * dx + dy * dy).max(1e-6);
        let dist = dist2.sqrt();
        let f = (dist2 / k).min(5.0);
        let (fx, fy) = ((dx / dist) * f, (dy / dist) * f);
        disp[a].0 -= fx;
        disp[a].1 -= fy;
        disp[b].0 += fx;
        disp[b].1 += fy;
    }

    // Move by at most the current temperature
    for (p, (dx, dy)) in pos.iter_mut().zip(disp) {
        let mag = (dx * dx + dy * dy).sqrt();
        if mag <= 1e-6 {
            continue;
        }
        let step = temperature.min(mag);
        p.x = clamp_unit(p.x + (dx / mag) * step);
        p.y = clamp_unit(p.y + (dy / mag) * step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single() {
        assert!(force_layout(0, &[]).is_empty());
        assert_eq!(force_layout(1, &[]), vec![NodePosition { x: 0.5, y: 0.5 }]);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let edges = [(0, 1), (1, 2)];
        assert_eq!(force_layout(4, &edges), force_layout(4, &edges));
    }

    #[test]
    fn test_positions_stay_in_unit_square() {
        let edges = [(0, 1), (0, 2), (0, 3), (4, 5)];
        for p in force_layout(8, &edges) {
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_connected_nodes_end_up_closer() {
        let pos = force_layout(3, &[(0, 1)]);
        assert!(pos[0].distance(&pos[1]) < pos[0].distance(&pos[2]));
        assert!(pos[0].distance(&pos[1]) < pos[1].distance(&pos[2]));
    }

    #[test]
    fn test_snapshot_serializes_flat_positions() {
        let snapshot = GraphSnapshot::new(
            vec![("a".to_string(), NodePosition { x: 0.25, y: 0.5 })],
            vec![],
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["nodes"][0]["label"], "a");
        assert_eq!(json["nodes"][0]["x"], 0.25);
        assert!(json["edges"].as_array().unwrap().is_empty());
    }
}
