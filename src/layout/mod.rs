// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Deterministic auto-layout.
//!
//! Nodes are assigned a level (their longest-path distance in edge hops from
//! the nearest start node) via breadth-first relaxation, then placed on a
//! column/row grid: one column per level, rows in input order.

use std::collections::{BTreeMap, VecDeque};

use crate::model::{Edge, Node, NodeId, NodeKind, Position, WorkflowGraph};

const COLUMN_X_BASE: f64 = 160.0;
const COLUMN_X_STEP: f64 = 260.0;
const ROW_Y_BASE: f64 = 80.0;
const ROW_Y_STEP: f64 = 150.0;

/// Computes a position for every node from the edge topology.
///
/// Levels are seeded at 0 for start nodes (for every node when the graph has
/// none) and relaxed forward: visiting a child whose assigned level is below
/// parent + 1 raises it and re-enqueues. A level can never exceed
/// `nodes.len() - 1` (no simple path is longer), which bounds the relaxation
/// on cyclic graphs: nodes on a cycle freeze at their last computed level.
pub fn layout_positions(nodes: &[Node], edges: &[Edge]) -> BTreeMap<NodeId, Position> {
    let mut children = BTreeMap::<&NodeId, Vec<&NodeId>>::new();
    for edge in edges {
        children.entry(edge.source()).or_default().push(edge.target());
    }

    let mut levels = BTreeMap::<&NodeId, usize>::new();
    let mut queue = VecDeque::<&NodeId>::new();

    let start_ids: Vec<&NodeId> = nodes
        .iter()
        .filter(|node| node.kind() == NodeKind::Start)
        .map(Node::id)
        .collect();
    let seeds: Vec<&NodeId> = if start_ids.is_empty() {
        nodes.iter().map(Node::id).collect()
    } else {
        start_ids
    };
    for seed in seeds {
        levels.insert(seed, 0);
        queue.push_back(seed);
    }

    let max_level = nodes.len().saturating_sub(1);
    while let Some(id) = queue.pop_front() {
        let level = levels.get(id).copied().unwrap_or(0);
        let Some(targets) = children.get(id) else {
            continue;
        };
        for &child in targets {
            let next_level = level + 1;
            if next_level > max_level {
                continue;
            }
            let existing = levels.get(child).copied();
            if existing.map_or(true, |current| next_level > current) {
                levels.insert(child, next_level);
                queue.push_back(child);
            }
        }
    }

    // Group by level in input order; unreached nodes sit in column 0.
    let mut columns = BTreeMap::<usize, Vec<&NodeId>>::new();
    for node in nodes {
        let level = levels.get(node.id()).copied().unwrap_or(0);
        columns.entry(level).or_default().push(node.id());
    }

    let mut positions = BTreeMap::new();
    for (level, column) in &columns {
        for (index, node_id) in column.iter().enumerate() {
            let x = COLUMN_X_BASE + (*level as f64) * COLUMN_X_STEP;
            let y = ROW_Y_BASE + (index as f64) * ROW_Y_STEP;
            positions.insert((*node_id).clone(), Position::new(x, y));
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        columns = columns.len(),
        "computed auto-layout"
    );

    positions
}

/// Replaces every node position in place. No-op on an empty graph.
pub fn auto_layout(graph: &mut WorkflowGraph) {
    if graph.is_empty() {
        return;
    }
    let positions = layout_positions(graph.nodes(), graph.edges());
    for node in graph.nodes_mut() {
        if let Some(position) = positions.get(node.id()) {
            node.set_position(*position);
        }
    }
}
