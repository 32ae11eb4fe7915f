// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

use super::edge::Edge;
use super::factory;
use super::ids::{EdgeId, NodeId};
use super::node::{Node, NodeKind, Position};

/// The canonical (nodes, edges) pair.
///
/// Both collections keep insertion order: within-level layout ordering, the
/// simulation trace, and id allocation all depend on it, which is why this is
/// a `Vec` pair rather than keyed maps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl WorkflowGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// The default graph a fresh workflow opens with: one start and one end.
    pub fn seeded() -> Self {
        let start = factory::create(
            NodeId::new("start-1").expect("literal id"),
            NodeKind::Start,
            Position::new(100.0, 100.0),
        );
        let end = factory::create(
            NodeId::new("end-1").expect("literal id"),
            NodeKind::End,
            Position::new(500.0, 100.0),
        );
        Self {
            nodes: vec![start, end],
            edges: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id() == node_id)
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id() == edge_id)
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node(node_id).is_some()
    }

    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, node_id: &NodeId) {
        self.nodes.retain(|node| node.id() != node_id);
        self.edges.retain(|edge| !edge.touches(node_id));
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count_of_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::WorkflowGraph;
    use crate::model::{Edge, EdgeId, NodeId, NodeKind};

    #[test]
    fn seeded_graph_has_start_end_pair() {
        let graph = WorkflowGraph::seeded();
        assert_eq!(graph.nodes().len(), 2);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.count_of_kind(NodeKind::Start), 1);
        assert_eq!(graph.count_of_kind(NodeKind::End), 1);
        assert!(graph.contains_node(&NodeId::new("start-1").expect("id")));
        assert!(graph.contains_node(&NodeId::new("end-1").expect("id")));
    }

    #[test]
    fn remove_node_drops_touching_edges() {
        let mut graph = WorkflowGraph::seeded();
        let start = NodeId::new("start-1").expect("id");
        let end = NodeId::new("end-1").expect("id");
        graph.push_edge(Edge::new(
            EdgeId::new("edge-1").expect("id"),
            start.clone(),
            end.clone(),
        ));
        graph.push_edge(Edge::new(
            EdgeId::new("edge-2").expect("id"),
            end.clone(),
            end.clone(),
        ));

        graph.remove_node(&end);

        assert_eq!(graph.nodes().len(), 1);
        assert!(graph.edges().is_empty());
        assert!(graph.contains_node(&start));
    }
}
