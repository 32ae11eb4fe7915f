// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! The snapshot wire format.
//!
//! This is the one bit-exact contract shared by export/import and the
//! persistence collaborator:
//!
//! ```json
//! {
//!   "nodes": [ { "id": "...", "type": "...", "position": {"x": 0, "y": 0}, "data": {} } ],
//!   "edges": [ { "id": "...", "source": "...", "target": "..." } ]
//! }
//! ```
//!
//! A document whose `nodes` or `edges` is not an array is rejected before any
//! mutation. Element-level shape problems are tolerated: missing or malformed
//! payload fields fall back to defaults, and elements without a usable
//! id/type are skipped. `validationIssues` is transient state and never
//! appears on the wire.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    ApprovalData, AutomatedData, Edge, EdgeId, EndData, KeyValue, Node, NodeId, NodeKind,
    NodePayload, Position, StartData, TaskData, WorkflowGraph,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SnapshotDoc {
    pub nodes: Vec<NodeDoc>,
    pub edges: Vec<EdgeDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeDoc {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: PositionDoc,
    pub data: NodeDataDoc,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PositionDoc {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EdgeDoc {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct KeyValueDoc {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartDataDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub metadata: Vec<KeyValueDoc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDataDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<KeyValueDoc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDataDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub approver_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approve_threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutomatedDataDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndDataDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_message: Option<String>,
    #[serde(default)]
    pub summary_flag: bool,
}

/// Node payload on the wire, tagged by `type` like the node record itself
/// (consumers read whichever copy is convenient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeDataDoc {
    Start(StartDataDoc),
    Task(TaskDataDoc),
    Approval(ApprovalDataDoc),
    Automated(AutomatedDataDoc),
    End(EndDataDoc),
}

/// The persistence collaborator's "create version" envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VersionDoc {
    pub snapshot: SnapshotDoc,
    pub version_number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotImportError {
    /// The document is not parseable JSON.
    InvalidJson,
    /// `nodes` or `edges` is missing or not an array.
    MissingCollections,
}

impl fmt::Display for SnapshotImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson => {
                f.write_str("Could not read workflow file. Please check the JSON format.")
            }
            Self::MissingCollections => {
                f.write_str("Invalid workflow file. Expected JSON with `nodes` and `edges` arrays.")
            }
        }
    }
}

impl std::error::Error for SnapshotImportError {}

impl SnapshotDoc {
    pub fn from_graph(graph: &WorkflowGraph) -> Self {
        Self {
            nodes: graph.nodes().iter().map(node_doc).collect(),
            edges: graph
                .edges()
                .iter()
                .map(|edge| EdgeDoc {
                    id: edge.id().to_string(),
                    source: edge.source().to_string(),
                    target: edge.target().to_string(),
                })
                .collect(),
        }
    }
}

fn node_doc(node: &Node) -> NodeDoc {
    NodeDoc {
        id: node.id().to_string(),
        kind: node.kind().as_str().to_owned(),
        position: PositionDoc {
            x: node.position().x(),
            y: node.position().y(),
        },
        data: NodeDataDoc::from(node.payload()),
    }
}

impl From<&NodePayload> for NodeDataDoc {
    fn from(payload: &NodePayload) -> Self {
        match payload {
            NodePayload::Start(data) => Self::Start(StartDataDoc {
                title: data.title.clone(),
                metadata: data.metadata.iter().map(key_value_doc).collect(),
            }),
            NodePayload::Task(data) => Self::Task(TaskDataDoc {
                title: data.title.clone(),
                description: data.description.clone(),
                assignee: data.assignee.clone(),
                due_date: data.due_date.clone(),
                custom_fields: data.custom_fields.iter().map(key_value_doc).collect(),
            }),
            NodePayload::Approval(data) => Self::Approval(ApprovalDataDoc {
                title: data.title.clone(),
                approver_role: data.approver_role.clone(),
                auto_approve_threshold: data.auto_approve_threshold,
            }),
            NodePayload::Automated(data) => Self::Automated(AutomatedDataDoc {
                title: data.title.clone(),
                action_id: data.action_id.clone(),
                params: data.params.clone(),
            }),
            NodePayload::End(data) => Self::End(EndDataDoc {
                end_message: data.end_message.clone(),
                summary_flag: data.summary_flag,
            }),
        }
    }
}

impl From<NodeDataDoc> for NodePayload {
    fn from(doc: NodeDataDoc) -> Self {
        match doc {
            NodeDataDoc::Start(doc) => Self::Start(StartData {
                title: doc.title,
                metadata: doc.metadata.into_iter().map(key_value).collect(),
            }),
            NodeDataDoc::Task(doc) => Self::Task(TaskData {
                title: doc.title,
                description: doc.description,
                assignee: doc.assignee,
                due_date: doc.due_date,
                custom_fields: doc.custom_fields.into_iter().map(key_value).collect(),
            }),
            NodeDataDoc::Approval(doc) => Self::Approval(ApprovalData {
                title: doc.title,
                approver_role: doc.approver_role,
                auto_approve_threshold: doc.auto_approve_threshold,
            }),
            NodeDataDoc::Automated(doc) => Self::Automated(AutomatedData {
                title: doc.title,
                action_id: doc.action_id,
                params: doc.params,
            }),
            NodeDataDoc::End(doc) => Self::End(EndData {
                end_message: doc.end_message,
                summary_flag: doc.summary_flag,
            }),
        }
    }
}

fn key_value_doc(kv: &KeyValue) -> KeyValueDoc {
    KeyValueDoc {
        key: kv.key.clone(),
        value: kv.value.clone(),
    }
}

fn key_value(doc: KeyValueDoc) -> KeyValue {
    KeyValue {
        key: doc.key,
        value: doc.value,
    }
}

/// Serializes the snapshot as the pretty-printed downloadable document.
pub fn export_snapshot(graph: &WorkflowGraph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SnapshotDoc::from_graph(graph))
}

/// Parses a caller-supplied document into a graph.
///
/// The node-level `type` selects the payload kind; the payload is then decoded
/// leniently against that kind's shape.
pub fn import_snapshot(text: &str) -> Result<WorkflowGraph, SnapshotImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|_| SnapshotImportError::InvalidJson)?;

    let nodes = value
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or(SnapshotImportError::MissingCollections)?;
    let edges = value
        .get("edges")
        .and_then(Value::as_array)
        .ok_or(SnapshotImportError::MissingCollections)?;

    let nodes = nodes.iter().filter_map(decode_node).collect::<Vec<_>>();
    let edges = edges.iter().filter_map(decode_edge).collect::<Vec<_>>();

    Ok(WorkflowGraph::new(nodes, edges))
}

fn decode_node(value: &Value) -> Option<Node> {
    let id = NodeId::new(value.get("id")?.as_str()?).ok()?;
    let kind: NodeKind = value.get("type")?.as_str()?.parse().ok()?;
    let position = value
        .get("position")
        .map(decode_position)
        .unwrap_or_default();
    let data = value.get("data").cloned().unwrap_or(Value::Null);
    Some(Node::new(id, position, decode_payload(kind, data)))
}

fn decode_position(value: &Value) -> Position {
    let x = value.get("x").and_then(Value::as_f64).unwrap_or(0.0);
    let y = value.get("y").and_then(Value::as_f64).unwrap_or(0.0);
    Position::new(x, y)
}

fn decode_payload(kind: NodeKind, data: Value) -> NodePayload {
    fn lenient<T: Default + serde::de::DeserializeOwned>(data: Value) -> T {
        serde_json::from_value(data).unwrap_or_default()
    }

    match kind {
        NodeKind::Start => NodeDataDoc::Start(lenient::<StartDataDoc>(data)).into(),
        NodeKind::Task => NodeDataDoc::Task(lenient::<TaskDataDoc>(data)).into(),
        NodeKind::Approval => NodeDataDoc::Approval(lenient::<ApprovalDataDoc>(data)).into(),
        NodeKind::Automated => NodeDataDoc::Automated(lenient::<AutomatedDataDoc>(data)).into(),
        NodeKind::End => NodeDataDoc::End(lenient::<EndDataDoc>(data)).into(),
    }
}

fn decode_edge(value: &Value) -> Option<Edge> {
    let id = EdgeId::new(value.get("id")?.as_str()?).ok()?;
    let source = NodeId::new(value.get("source")?.as_str()?).ok()?;
    let target = NodeId::new(value.get("target")?.as_str()?).ok()?;
    Some(Edge::new(id, source, target))
}

#[cfg(test)]
mod tests {
    use super::{export_snapshot, import_snapshot, SnapshotDoc, SnapshotImportError, VersionDoc};
    use crate::model::{
        factory, Edge, EdgeId, NodeId, NodeKind, NodePatch, NodePayload, Position, TaskPatch,
        WorkflowGraph,
    };

    fn node_id(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn sample_graph() -> WorkflowGraph {
        let mut graph = WorkflowGraph::seeded();
        graph.push_node(factory::create(
            node_id("task-1"),
            NodeKind::Task,
            Position::new(300.0, 200.0),
        ));
        graph
            .node_mut(&node_id("task-1"))
            .expect("task")
            .payload_mut()
            .apply(&NodePatch::Task(TaskPatch {
                assignee: Some("casey".to_owned()),
                due_date: Some("2026-09-01".to_owned()),
                ..TaskPatch::default()
            }));
        graph.push_edge(Edge::new(
            EdgeId::new("edge-1").expect("id"),
            node_id("start-1"),
            node_id("task-1"),
        ));
        graph
    }

    #[test]
    fn export_is_pretty_printed_with_wire_keys() {
        let text = export_snapshot(&sample_graph()).expect("export");
        assert!(text.contains('\n'));
        assert!(text.contains("\"dueDate\": \"2026-09-01\""));
        assert!(text.contains("\"summaryFlag\": true"));
        assert!(text.contains("\"title\": \"New Hire Onboarding\""));
        assert!(text.contains("\"metadata\": []"));
        assert!(!text.contains("validationIssues"));
    }

    #[test]
    fn round_trip_preserves_id_sets_and_payloads() {
        let graph = sample_graph();
        let text = export_snapshot(&graph).expect("export");
        let imported = import_snapshot(&text).expect("import");

        assert_eq!(imported.nodes().len(), graph.nodes().len());
        assert_eq!(imported.edges().len(), graph.edges().len());
        for node in graph.nodes() {
            let round_tripped = imported.node(node.id()).expect("node survives");
            assert_eq!(round_tripped.payload(), node.payload());
        }
    }

    #[test]
    fn import_rejects_non_array_collections() {
        let err = import_snapshot(r#"{"nodes": {}, "edges": []}"#).unwrap_err();
        assert_eq!(err, SnapshotImportError::MissingCollections);

        let err = import_snapshot(r#"{"nodes": []}"#).unwrap_err();
        assert_eq!(err, SnapshotImportError::MissingCollections);

        assert_eq!(
            err.to_string(),
            "Invalid workflow file. Expected JSON with `nodes` and `edges` arrays."
        );
    }

    #[test]
    fn import_rejects_unparseable_text() {
        let err = import_snapshot("not json").unwrap_err();
        assert_eq!(err, SnapshotImportError::InvalidJson);
    }

    #[test]
    fn import_tolerates_element_level_shape_problems() {
        let text = r#"{
            "nodes": [
                {"id": "task-1", "type": "task", "position": {"x": "oops"}, "data": {"title": 7}},
                {"id": "mystery-1", "type": "cron"},
                {"type": "task"}
            ],
            "edges": [
                {"id": "edge-1", "source": "task-1", "target": "task-1"},
                {"id": "edge-2", "source": "task-1"}
            ]
        }"#;

        let graph = import_snapshot(text).expect("import");
        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.edges().len(), 1);

        let node = graph.node(&node_id("task-1")).expect("node");
        assert_eq!(node.kind(), NodeKind::Task);
        assert_eq!(node.position(), Position::new(0.0, 0.0));
        // Malformed payload decays to the kind's default shape.
        assert_eq!(node.payload().title(), Some(""));
    }

    #[test]
    fn import_accepts_foreign_documents_without_optional_fields() {
        let text = r#"{
            "nodes": [
                {"id": "start-1", "type": "start", "position": {"x": 1, "y": 2}, "data": {"title": "Kickoff"}},
                {"id": "end-1", "type": "end", "position": {"x": 3, "y": 4}, "data": {}}
            ],
            "edges": [
                {"id": "edge-1", "source": "start-1", "target": "end-1"}
            ]
        }"#;

        let graph = import_snapshot(text).expect("import");
        assert_eq!(graph.nodes().len(), 2);
        let end = graph.node(&node_id("end-1")).expect("end");
        let NodePayload::End(data) = end.payload() else {
            panic!("expected end payload");
        };
        assert_eq!(data.end_message, None);
        assert!(!data.summary_flag);
    }

    #[test]
    fn version_envelope_round_trips() {
        let doc = VersionDoc {
            snapshot: SnapshotDoc::from_graph(&sample_graph()),
            version_number: 3,
        };

        let text = serde_json::to_string(&doc).expect("serialize");
        assert!(text.contains("\"version_number\":3"));
        let parsed: VersionDoc = serde_json::from_str(&text).expect("parse");
        assert_eq!(parsed, doc);
    }
}
