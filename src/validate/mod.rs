// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Structural validation of workflow graphs.
//!
//! Validation is a pure function of (nodes, edges). Findings are data, not
//! errors: they never block editing, saving, or simulation.

use std::collections::BTreeMap;

use crate::model::{NodeId, NodeKind, WorkflowGraph};

pub mod debounce;

pub const MISSING_START: &str = "Workflow must contain a Start node.";
pub const MULTIPLE_START: &str = "Workflow has multiple Start nodes.";
pub const MISSING_END: &str = "Workflow must contain an End node.";
pub const MULTIPLE_END: &str = "Workflow has multiple End nodes.";
pub const NODE_MULTIPLE_START: &str = "Multiple Start nodes.";
pub const NODE_MULTIPLE_END: &str = "Multiple End nodes.";
pub const SELF_REFERENCING_EDGE: &str = "Node has a self-referencing edge.";
pub const NO_INCOMING: &str = "No incoming connection.";
pub const NO_OUTGOING: &str = "No outgoing connection.";

/// The derived validation state for one graph revision.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    global: Vec<String>,
    per_node: BTreeMap<NodeId, Vec<String>>,
}

impl ValidationReport {
    /// Graph-wide findings, in a stable order: start rules before end rules.
    pub fn global_issues(&self) -> &[String] {
        &self.global
    }

    pub fn per_node(&self) -> &BTreeMap<NodeId, Vec<String>> {
        &self.per_node
    }

    pub fn node_issues(&self, node_id: &NodeId) -> &[String] {
        self.per_node
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_clean(&self) -> bool {
        self.global.is_empty() && self.per_node.is_empty()
    }

    fn push_node_issue(&mut self, node_id: &NodeId, message: &str) {
        self.per_node
            .entry(node_id.clone())
            .or_default()
            .push(message.to_owned());
    }
}

/// Computes the validation report for the given graph.
///
/// Idempotent and order-independent across nodes; safe to recompute on every
/// mutation or behind a debounce window.
pub fn validate(graph: &WorkflowGraph) -> ValidationReport {
    let mut report = ValidationReport::default();

    let start_count = graph.count_of_kind(NodeKind::Start);
    let end_count = graph.count_of_kind(NodeKind::End);

    if start_count == 0 {
        report.global.push(MISSING_START.to_owned());
    }
    if start_count > 1 {
        report.global.push(MULTIPLE_START.to_owned());
        for node in graph.nodes() {
            if node.kind() == NodeKind::Start {
                report.push_node_issue(node.id(), NODE_MULTIPLE_START);
            }
        }
    }

    if end_count == 0 {
        report.global.push(MISSING_END.to_owned());
    }
    if end_count > 1 {
        report.global.push(MULTIPLE_END.to_owned());
        for node in graph.nodes() {
            if node.kind() == NodeKind::End {
                report.push_node_issue(node.id(), NODE_MULTIPLE_END);
            }
        }
    }

    let mut incoming = BTreeMap::<&NodeId, usize>::new();
    let mut outgoing = BTreeMap::<&NodeId, usize>::new();
    for edge in graph.edges() {
        *outgoing.entry(edge.source()).or_default() += 1;
        *incoming.entry(edge.target()).or_default() += 1;
        if edge.is_self_loop() && graph.contains_node(edge.source()) {
            report.push_node_issue(edge.source(), SELF_REFERENCING_EDGE);
        }
    }

    for node in graph.nodes() {
        let has_incoming = incoming.get(node.id()).copied().unwrap_or(0) > 0;
        let has_outgoing = outgoing.get(node.id()).copied().unwrap_or(0) > 0;

        if node.kind() != NodeKind::Start && !has_incoming {
            report.push_node_issue(node.id(), NO_INCOMING);
        }
        if node.kind() != NodeKind::End && !has_outgoing {
            report.push_node_issue(node.id(), NO_OUTGOING);
        }
    }

    tracing::debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        global = report.global.len(),
        flagged = report.per_node.len(),
        "validated workflow graph"
    );

    report
}
