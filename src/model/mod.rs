// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Core workflow data model.
//!
//! A workflow is a directed graph of typed steps (nodes) and transitions
//! (edges); payloads are a tagged union keyed by the node kind.

pub mod actions;
pub mod edge;
pub mod factory;
pub mod graph;
pub mod ids;
pub mod node;

pub use actions::{builtin_catalog, fetch_actions, ActionCatalog, AutomationAction};
pub use edge::Edge;
pub use graph::WorkflowGraph;
pub use ids::{EdgeId, IdError, NodeId, OrgId, WorkflowId};
pub use node::{
    ApprovalData, ApprovalPatch, AutomatedData, AutomatedPatch, EndData, EndPatch, KeyValue, Node,
    NodeKind, NodePatch, NodePayload, ParseNodeKindError, Position, StartData, StartPatch,
    TaskData, TaskPatch,
};
