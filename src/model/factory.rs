// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Default payloads for freshly added nodes.

use std::collections::BTreeMap;

use super::ids::NodeId;
use super::node::{
    ApprovalData, AutomatedData, EndData, Node, NodeKind, NodePayload, Position, StartData,
    TaskData,
};

/// The default payload for a node of the given kind. Deterministic; position
/// and id are caller-supplied.
pub fn default_payload(kind: NodeKind) -> NodePayload {
    match kind {
        NodeKind::Start => NodePayload::Start(StartData {
            title: "New Hire Onboarding".to_owned(),
            metadata: Vec::new(),
        }),
        NodeKind::Task => NodePayload::Task(TaskData {
            title: "Collect Documents".to_owned(),
            description: None,
            assignee: None,
            due_date: None,
            custom_fields: Vec::new(),
        }),
        NodeKind::Approval => NodePayload::Approval(ApprovalData {
            title: "Manager Approval".to_owned(),
            approver_role: "Manager".to_owned(),
            auto_approve_threshold: Some(0.0),
        }),
        NodeKind::Automated => NodePayload::Automated(AutomatedData {
            title: "Send Welcome Email".to_owned(),
            action_id: None,
            params: BTreeMap::new(),
        }),
        NodeKind::End => NodePayload::End(EndData {
            end_message: Some("Onboarding completed".to_owned()),
            summary_flag: true,
        }),
    }
}

pub fn create(id: NodeId, kind: NodeKind, position: Position) -> Node {
    Node::new(id, position, default_payload(kind))
}

#[cfg(test)]
mod tests {
    use super::{create, default_payload};
    use crate::model::{NodeId, NodeKind, NodePayload, Position};

    #[test]
    fn defaults_match_kind() {
        for kind in NodeKind::ALL {
            assert_eq!(default_payload(kind).kind(), kind);
        }
    }

    #[test]
    fn task_default_title() {
        let node = create(
            NodeId::new("task-1").expect("id"),
            NodeKind::Task,
            Position::new(300.0, 200.0),
        );
        assert_eq!(node.payload().title(), Some("Collect Documents"));
        assert_eq!(node.position().x(), 300.0);
    }

    #[test]
    fn automated_default_has_no_action_selected() {
        let NodePayload::Automated(data) = default_payload(NodeKind::Automated) else {
            panic!("expected automated payload");
        };
        assert_eq!(data.title, "Send Welcome Email");
        assert_eq!(data.action_id, None);
        assert!(data.params.is_empty());
    }
}
