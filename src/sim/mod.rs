// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Mock execution simulator.
//!
//! This is a stub executor standing in for an eventual real engine: it runs a
//! handful of structural checks and emits one synthetic step per node in input
//! order. Edge topology is not used for ordering beyond the zero-edge check.
//! The artificial latency models the contract of the real engine (the caller
//! suspends and resumes; a superseding call simply produces a later result).

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{NodeKind, WorkflowGraph};
use crate::validate::{MISSING_END, MISSING_START};

pub const NO_CONNECTIONS: &str = "No connections found between steps.";
pub const STEP_COMPLETED_MESSAGE: &str = "Step executed successfully in mock simulation.";
pub const STEP_HALTED_MESSAGE: &str = "Execution halted due to validation issues.";

const SIMULATED_LATENCY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SimulationStep {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: StepStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SimulationResult {
    pub valid: bool,
    pub issues: Vec<String>,
    pub steps: Vec<SimulationStep>,
}

/// Simulates the frozen graph snapshot after a cooperative delay.
pub async fn simulate(graph: &WorkflowGraph) -> SimulationResult {
    tokio::time::sleep(SIMULATED_LATENCY).await;

    let mut issues = Vec::new();

    if graph.count_of_kind(NodeKind::Start) == 0 {
        issues.push(MISSING_START.to_owned());
    }
    if graph.count_of_kind(NodeKind::End) == 0 {
        issues.push(MISSING_END.to_owned());
    }
    if graph.edges().is_empty() {
        issues.push(NO_CONNECTIONS.to_owned());
    }

    let valid = issues.is_empty();
    let (status, message) = if valid {
        (StepStatus::Completed, STEP_COMPLETED_MESSAGE)
    } else {
        (StepStatus::Pending, STEP_HALTED_MESSAGE)
    };

    let steps = graph
        .nodes()
        .iter()
        .map(|node| SimulationStep {
            id: node.id().to_string(),
            label: node.label().to_owned(),
            kind: node.kind().as_str().to_owned(),
            status,
            message: message.to_owned(),
        })
        .collect::<Vec<_>>();

    tracing::debug!(valid, steps = steps.len(), "simulated workflow");

    SimulationResult {
        valid,
        issues,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::{simulate, StepStatus, NO_CONNECTIONS, STEP_HALTED_MESSAGE};
    use crate::model::{factory, Edge, EdgeId, NodeId, NodeKind, Position, WorkflowGraph};
    use crate::validate::{MISSING_END, MISSING_START};

    fn node_id(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn connected_graph() -> WorkflowGraph {
        let mut graph = WorkflowGraph::seeded();
        graph.push_node(factory::create(
            node_id("task-1"),
            NodeKind::Task,
            Position::default(),
        ));
        graph.push_edge(Edge::new(
            EdgeId::new("edge-1").expect("id"),
            node_id("start-1"),
            node_id("task-1"),
        ));
        graph.push_edge(Edge::new(
            EdgeId::new("edge-2").expect("id"),
            node_id("task-1"),
            node_id("end-1"),
        ));
        graph
    }

    #[tokio::test(start_paused = true)]
    async fn valid_graph_completes_every_step_in_input_order() {
        let result = simulate(&connected_graph()).await;

        assert!(result.valid);
        assert!(result.issues.is_empty());
        assert_eq!(result.steps.len(), 3);
        assert!(result
            .steps
            .iter()
            .all(|step| step.status == StepStatus::Completed));
        assert_eq!(
            result
                .steps
                .iter()
                .map(|step| step.id.as_str())
                .collect::<Vec<_>>(),
            ["start-1", "end-1", "task-1"]
        );
        assert_eq!(result.steps[0].label, "New Hire Onboarding");
        assert_eq!(result.steps[1].label, "End");
    }

    #[tokio::test(start_paused = true)]
    async fn zero_edges_is_always_invalid() {
        let result = simulate(&WorkflowGraph::seeded()).await;

        assert!(!result.valid);
        assert_eq!(result.issues, [NO_CONNECTIONS]);
        assert!(result
            .steps
            .iter()
            .all(|step| step.status == StepStatus::Pending
                && step.message == STEP_HALTED_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_terminals_are_reported_before_connectivity() {
        let result = simulate(&WorkflowGraph::default()).await;

        assert!(!result.valid);
        assert_eq!(result.issues, [MISSING_START, MISSING_END, NO_CONNECTIONS]);
        assert!(result.steps.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn step_wire_shape_uses_type_key() {
        let result = simulate(&connected_graph()).await;
        let json = serde_json::to_value(&result.steps[0]).expect("json");
        assert_eq!(json["type"], "start");
        assert_eq!(json["status"], "completed");
    }
}
