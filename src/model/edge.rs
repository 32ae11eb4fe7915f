// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

use super::ids::{EdgeId, NodeId};

/// A directed transition between two nodes.
///
/// Parallel edges between the same ordered pair are allowed, and a self-loop
/// (source == target) is structurally legal; the validator flags it as an
/// issue rather than the model rejecting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}

#[cfg(test)]
mod tests {
    use super::Edge;
    use crate::model::{EdgeId, NodeId};

    #[test]
    fn self_loop_is_detected() {
        let node = NodeId::new("task-1").expect("node id");
        let edge = Edge::new(EdgeId::new("edge-1").expect("edge id"), node.clone(), node);
        assert!(edge.is_self_loop());
    }

    #[test]
    fn touches_matches_either_endpoint() {
        let source = NodeId::new("start-1").expect("source");
        let target = NodeId::new("task-1").expect("target");
        let other = NodeId::new("end-1").expect("other");
        let edge = Edge::new(
            EdgeId::new("edge-1").expect("edge id"),
            source.clone(),
            target.clone(),
        );

        assert!(edge.touches(&source));
        assert!(edge.touches(&target));
        assert!(!edge.touches(&other));
        assert!(!edge.is_self_loop());
    }
}
