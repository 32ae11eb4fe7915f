// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! The workflow store: sole owner of the canonical graph.
//!
//! All mutation goes through store methods; observers (renderer, validator,
//! persistence) receive read-only views and watch the revision counter. Most
//! mutations push an undo snapshot first; frequent interactive edits
//! (`update_node_data` and friends) deliberately do not.

use std::collections::{BTreeMap, VecDeque};

use crate::format::{self, SnapshotImportError};
use crate::layout;
use crate::model::{
    factory, AutomationAction, Edge, EdgeId, NodeId, NodeKind, NodePatch, Position, WorkflowGraph,
};
use crate::validate::{self, ValidationReport};

pub mod persist;

pub use persist::{
    AccessError, AccessGate, InMemoryRepository, RepositoryError, StaticGate, VersionRecord,
    WorkflowRepository,
};

/// Undo depth. The oldest snapshot is evicted when a mutation would exceed it.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Default)]
pub struct WorkflowStore {
    graph: WorkflowGraph,
    selection: Option<NodeId>,
    past: VecDeque<WorkflowGraph>,
    future: Vec<WorkflowGraph>,
    node_counters: BTreeMap<NodeKind, u64>,
    edge_counter: u64,
    rev: u64,
}

impl WorkflowStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store opened on the default start/end pair.
    pub fn seeded() -> Self {
        Self::with_graph(WorkflowGraph::seeded())
    }

    pub fn with_graph(graph: WorkflowGraph) -> Self {
        let mut store = Self {
            graph,
            ..Self::default()
        };
        store.advance_counters();
        store
    }

    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    /// Bumped on every effective mutation; observers key derived state on it.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Recomputes validation for the current graph. For coalesced recomputes
    /// during edit bursts, feed `self.graph().clone()` to a
    /// [`crate::validate::debounce::DebouncedValidator`] instead.
    pub fn validation(&self) -> ValidationReport {
        validate::validate(&self.graph)
    }

    /// Adds a node of the given kind with the factory's default payload.
    pub fn add_node(&mut self, kind: NodeKind, position: Position) -> NodeId {
        self.push_history();
        let id = self.next_node_id(kind);
        self.graph
            .push_node(factory::create(id.clone(), kind, position));
        self.bump();
        tracing::debug!(node = %id, kind = %kind, "added node");
        id
    }

    /// Appends an edge between two existing nodes. Parallel edges and
    /// self-loops are allowed (the validator flags the latter); unknown
    /// endpoints make this a silent no-op.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Option<EdgeId> {
        if !self.graph.contains_node(source) || !self.graph.contains_node(target) {
            return None;
        }
        self.push_history();
        self.edge_counter += 1;
        let id = EdgeId::new(format!("edge-{}", self.edge_counter)).expect("generated id");
        self.graph
            .push_edge(Edge::new(id.clone(), source.clone(), target.clone()));
        self.bump();
        tracing::debug!(edge = %id, %source, %target, "connected nodes");
        Some(id)
    }

    /// Merges a partial payload edit. Not undoable on its own: interactive
    /// keystroke-level edits would otherwise flood the history. No-op when the
    /// node is absent or the patch targets a different kind.
    pub fn update_node_data(&mut self, node_id: &NodeId, patch: &NodePatch) -> bool {
        let Some(node) = self.graph.node_mut(node_id) else {
            return false;
        };
        let applied = node.payload_mut().apply(patch);
        if applied {
            self.bump();
        }
        applied
    }

    /// Selects (or clears) the catalog action backing an automated node,
    /// resetting its params to the keys the action declares.
    pub fn configure_automation(
        &mut self,
        node_id: &NodeId,
        action: Option<&AutomationAction>,
    ) -> bool {
        let Some(node) = self.graph.node_mut(node_id) else {
            return false;
        };
        let crate::model::NodePayload::Automated(data) = node.payload_mut() else {
            return false;
        };
        data.select_action(action);
        self.bump();
        true
    }

    /// Writes one param of an automated node; keys the selected action does
    /// not declare are rejected.
    pub fn set_automation_param(
        &mut self,
        node_id: &NodeId,
        key: &str,
        value: impl Into<String>,
    ) -> bool {
        let Some(node) = self.graph.node_mut(node_id) else {
            return false;
        };
        let crate::model::NodePayload::Automated(data) = node.payload_mut() else {
            return false;
        };
        let applied = data.set_param(key, value);
        if applied {
            self.bump();
        }
        applied
    }

    pub fn set_selection(&mut self, selection: Option<NodeId>) {
        self.selection = selection;
    }

    /// Deletes the selected node and every edge touching it. No-op without a
    /// live selection.
    pub fn delete_selected(&mut self) {
        let Some(node_id) = self.selection.clone() else {
            return;
        };
        if !self.graph.contains_node(&node_id) {
            self.selection = None;
            return;
        }
        self.push_history();
        self.graph.remove_node(&node_id);
        self.selection = None;
        self.bump();
        tracing::debug!(node = %node_id, "deleted selected node");
    }

    /// Steps back one snapshot. No-op at the stack boundary.
    pub fn undo(&mut self) {
        let Some(previous) = self.past.pop_back() else {
            return;
        };
        self.future.push(std::mem::replace(&mut self.graph, previous));
        self.selection = None;
        self.bump();
    }

    /// Re-applies the most recently undone snapshot. No-op at the boundary.
    pub fn redo(&mut self) {
        let Some(next) = self.future.pop() else {
            return;
        };
        if self.past.len() == HISTORY_LIMIT {
            self.past.pop_front();
        }
        self.past
            .push_back(std::mem::replace(&mut self.graph, next));
        self.selection = None;
        self.bump();
    }

    /// Recomputes every node position from the edge topology. No-op on an
    /// empty graph.
    pub fn auto_layout(&mut self) {
        if self.graph.is_empty() {
            return;
        }
        self.push_history();
        layout::auto_layout(&mut self.graph);
        self.bump();
    }

    /// Replaces the graph wholesale with an already-parsed snapshot, laying it
    /// out first. Malformed documents must be rejected by the import layer
    /// before reaching this point.
    pub fn import_snapshot(&mut self, mut graph: WorkflowGraph) {
        self.push_history();
        layout::auto_layout(&mut graph);
        self.graph = graph;
        self.selection = None;
        self.advance_counters();
        self.bump();
        tracing::debug!(
            nodes = self.graph.nodes().len(),
            edges = self.graph.edges().len(),
            "imported snapshot"
        );
    }

    /// Parses and imports a snapshot document; no state changes on rejection.
    pub fn import_document(&mut self, text: &str) -> Result<(), SnapshotImportError> {
        let graph = format::import_snapshot(text)?;
        self.import_snapshot(graph);
        Ok(())
    }

    /// The pretty-printed snapshot document for the current graph.
    pub fn export_document(&self) -> Result<String, serde_json::Error> {
        format::export_snapshot(&self.graph)
    }

    fn push_history(&mut self) {
        if self.past.len() == HISTORY_LIMIT {
            self.past.pop_front();
        }
        self.past.push_back(self.graph.clone());
        self.future.clear();
    }

    fn bump(&mut self) {
        self.rev += 1;
    }

    /// Allocates `{kind}-{n}` from a per-kind counter that never decreases,
    /// so ids stay unique across deletions (unlike the count-based scheme
    /// this replaces).
    fn next_node_id(&mut self, kind: NodeKind) -> NodeId {
        let counter = self.node_counters.entry(kind).or_default();
        *counter += 1;
        NodeId::new(format!("{}-{}", kind.as_str(), counter)).expect("generated id")
    }

    /// Advances id counters past every `{kind}-{n}` / `edge-{n}` already in
    /// the graph, so ids allocated after a load or import cannot collide.
    fn advance_counters(&mut self) {
        for node in self.graph.nodes() {
            for kind in NodeKind::ALL {
                if let Some(n) = node.id().sequence_after(kind.as_str()) {
                    let counter = self.node_counters.entry(kind).or_default();
                    *counter = (*counter).max(n);
                }
            }
        }
        for edge in self.graph.edges() {
            if let Some(n) = edge.id().sequence_after("edge") {
                self.edge_counter = self.edge_counter.max(n);
            }
        }
    }
}
