//! Topic graph ("mind map") domain.
//!
//! - [`graph::TopicGraph`] - undirected, deduplicated topic graph
//! - [`layout::GraphSnapshot`] - positioned view of the graph for rendering

pub mod graph;
pub mod layout;
