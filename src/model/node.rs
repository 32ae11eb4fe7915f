// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::actions::AutomationAction;
use super::ids::NodeId;

/// The step categories a workflow graph is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Start,
    Task,
    Approval,
    Automated,
    End,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Start,
        NodeKind::Task,
        NodeKind::Approval,
        NodeKind::Automated,
        NodeKind::End,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Task => "task",
            Self::Approval => "approval",
            Self::Automated => "automated",
            Self::End => "end",
        }
    }

    /// Human-facing label used when a payload carries no title of its own.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Task => "Task",
            Self::Approval => "Approval",
            Self::Automated => "Automated Step",
            Self::End => "End",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "task" => Ok(Self::Task),
            "approval" => Ok(Self::Approval),
            "automated" => Ok(Self::Automated),
            "end" => Ok(Self::End),
            _ => Err(ParseNodeKindError {
                found: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeKindError {
    found: String,
}

impl fmt::Display for ParseNodeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node kind '{}'", self.found)
    }
}

impl std::error::Error for ParseNodeKindError {}

/// A 2D canvas position. Positions are presentation state; only the layout
/// engine and callers ever write them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// An ordered key/value row as edited in metadata and custom-field lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StartData {
    pub title: String,
    pub metadata: Vec<KeyValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskData {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub custom_fields: Vec<KeyValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApprovalData {
    pub title: String,
    pub approver_role: String,
    pub auto_approve_threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutomatedData {
    pub title: String,
    pub action_id: Option<String>,
    pub params: BTreeMap<String, String>,
}

impl AutomatedData {
    /// Selects (or clears) the backing catalog action.
    ///
    /// Params are rebuilt from the keys the action declares; values for keys
    /// that survive the switch are preserved, everything else is dropped.
    pub fn select_action(&mut self, action: Option<&AutomationAction>) {
        match action {
            Some(action) => {
                let mut next = BTreeMap::new();
                for param in action.params() {
                    let value = self.params.get(param).cloned().unwrap_or_default();
                    next.insert(param.clone(), value);
                }
                self.action_id = Some(action.id().to_owned());
                self.params = next;
            }
            None => {
                self.action_id = None;
                self.params.clear();
            }
        }
    }

    /// Sets a param value. Keys outside the selected action's declared set are
    /// rejected; returns whether the write was applied.
    pub fn set_param(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.params.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EndData {
    pub end_message: Option<String>,
    pub summary_flag: bool,
}

/// Per-kind payload, tagged by the node kind.
///
/// Form and render logic dispatches over this exhaustively; there is no
/// untyped field probing anywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    Start(StartData),
    Task(TaskData),
    Approval(ApprovalData),
    Automated(AutomatedData),
    End(EndData),
}

impl NodePayload {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Start(_) => NodeKind::Start,
            Self::Task(_) => NodeKind::Task,
            Self::Approval(_) => NodeKind::Approval,
            Self::Automated(_) => NodeKind::Automated,
            Self::End(_) => NodeKind::End,
        }
    }

    /// The editable title, where the kind has one. End nodes carry a message
    /// instead of a title.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Start(data) => Some(&data.title),
            Self::Task(data) => Some(&data.title),
            Self::Approval(data) => Some(&data.title),
            Self::Automated(data) => Some(&data.title),
            Self::End(_) => None,
        }
    }

    /// Merges a partial edit into this payload. Returns `false` (leaving the
    /// payload untouched) when the patch targets a different kind.
    pub fn apply(&mut self, patch: &NodePatch) -> bool {
        match (self, patch) {
            (Self::Start(data), NodePatch::Start(patch)) => {
                if let Some(title) = &patch.title {
                    data.title = title.clone();
                }
                if let Some(metadata) = &patch.metadata {
                    data.metadata = metadata.clone();
                }
                true
            }
            (Self::Task(data), NodePatch::Task(patch)) => {
                if let Some(title) = &patch.title {
                    data.title = title.clone();
                }
                if let Some(description) = &patch.description {
                    data.description = Some(description.clone());
                }
                if let Some(assignee) = &patch.assignee {
                    data.assignee = Some(assignee.clone());
                }
                if let Some(due_date) = &patch.due_date {
                    data.due_date = Some(due_date.clone());
                }
                if let Some(custom_fields) = &patch.custom_fields {
                    data.custom_fields = custom_fields.clone();
                }
                true
            }
            (Self::Approval(data), NodePatch::Approval(patch)) => {
                if let Some(title) = &patch.title {
                    data.title = title.clone();
                }
                if let Some(approver_role) = &patch.approver_role {
                    data.approver_role = approver_role.clone();
                }
                if let Some(threshold) = patch.auto_approve_threshold {
                    data.auto_approve_threshold = Some(threshold);
                }
                true
            }
            (Self::Automated(data), NodePatch::Automated(patch)) => {
                if let Some(title) = &patch.title {
                    data.title = title.clone();
                }
                true
            }
            (Self::End(data), NodePatch::End(patch)) => {
                if let Some(end_message) = &patch.end_message {
                    data.end_message = Some(end_message.clone());
                }
                if let Some(summary_flag) = patch.summary_flag {
                    data.summary_flag = summary_flag;
                }
                true
            }
            _ => false,
        }
    }
}

/// Partial payload edits, one patch shape per kind. Fields left as `None` are
/// untouched by the merge.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePatch {
    Start(StartPatch),
    Task(TaskPatch),
    Approval(ApprovalPatch),
    Automated(AutomatedPatch),
    End(EndPatch),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartPatch {
    pub title: Option<String>,
    pub metadata: Option<Vec<KeyValue>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub custom_fields: Option<Vec<KeyValue>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApprovalPatch {
    pub title: Option<String>,
    pub approver_role: Option<String>,
    pub auto_approve_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutomatedPatch {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndPatch {
    pub end_message: Option<String>,
    pub summary_flag: Option<bool>,
}

/// A typed step in the workflow graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    position: Position,
    payload: NodePayload,
}

impl Node {
    pub fn new(id: NodeId, position: Position, payload: NodePayload) -> Self {
        Self {
            id,
            position,
            payload,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut NodePayload {
        &mut self.payload
    }

    /// Trace/display label: payload title where present, the kind label otherwise.
    pub fn label(&self) -> &str {
        self.payload
            .title()
            .unwrap_or_else(|| self.kind().display_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::actions;

    #[test]
    fn node_kind_parses_all_wire_names() {
        for kind in NodeKind::ALL {
            let parsed: NodeKind = kind.as_str().parse().expect("kind");
            assert_eq!(parsed, kind);
        }
        assert!("cron".parse::<NodeKind>().is_err());
    }

    #[test]
    fn task_patch_merges_only_given_fields() {
        let mut payload = NodePayload::Task(TaskData {
            title: "Collect Documents".to_owned(),
            description: Some("gather IDs".to_owned()),
            assignee: None,
            due_date: None,
            custom_fields: Vec::new(),
        });

        let applied = payload.apply(&NodePatch::Task(TaskPatch {
            assignee: Some("casey".to_owned()),
            ..TaskPatch::default()
        }));
        assert!(applied);

        let NodePayload::Task(data) = &payload else {
            panic!("expected task payload");
        };
        assert_eq!(data.title, "Collect Documents");
        assert_eq!(data.description.as_deref(), Some("gather IDs"));
        assert_eq!(data.assignee.as_deref(), Some("casey"));
    }

    #[test]
    fn mismatched_patch_kind_is_rejected() {
        let mut payload = NodePayload::End(EndData::default());
        let before = payload.clone();

        let applied = payload.apply(&NodePatch::Task(TaskPatch {
            title: Some("nope".to_owned()),
            ..TaskPatch::default()
        }));

        assert!(!applied);
        assert_eq!(payload, before);
    }

    #[test]
    fn select_action_rebuilds_params_preserving_overlap() {
        let catalog = actions::builtin_catalog();
        let send_email = catalog.find("send_email").expect("send_email");
        let create_ticket = catalog.find("create_ticket").expect("create_ticket");

        let mut data = AutomatedData {
            title: "Send Welcome Email".to_owned(),
            ..AutomatedData::default()
        };

        data.select_action(Some(send_email));
        assert_eq!(data.action_id.as_deref(), Some("send_email"));
        assert!(data.set_param("to", "new.hire@example.com"));
        assert!(!data.set_param("priority", "high"));

        data.select_action(Some(create_ticket));
        assert_eq!(
            data.params.keys().map(String::as_str).collect::<Vec<_>>(),
            ["priority", "summary", "system"]
        );
        assert!(data.params.values().all(String::is_empty));

        data.select_action(None);
        assert_eq!(data.action_id, None);
        assert!(data.params.is_empty());
    }

    #[test]
    fn end_node_label_falls_back_to_kind_label() {
        let node = Node::new(
            NodeId::new("end-1").expect("id"),
            Position::default(),
            NodePayload::End(EndData::default()),
        );
        assert_eq!(node.label(), "End");
    }
}
