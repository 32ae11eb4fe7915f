// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! The automation action catalog consumed by automated steps.
//!
//! The catalog is supplied by an external collaborator; the built-in set here
//! mirrors what that collaborator serves and is what demos and tests use.

use std::time::Duration;

/// One catalog entry: an action id, its display label, and the param keys an
/// automated step configured with this action may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationAction {
    id: String,
    label: String,
    params: Vec<String>,
}

impl AutomationAction {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionCatalog {
    actions: Vec<AutomationAction>,
}

impl ActionCatalog {
    pub fn new(actions: Vec<AutomationAction>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[AutomationAction] {
        &self.actions
    }

    pub fn find(&self, action_id: &str) -> Option<&AutomationAction> {
        self.actions.iter().find(|action| action.id == action_id)
    }
}

/// The built-in HR automation set.
pub fn builtin_catalog() -> ActionCatalog {
    ActionCatalog::new(vec![
        AutomationAction::new("send_email", "Send Email", ["to", "subject"]),
        AutomationAction::new(
            "generate_doc",
            "Generate Document",
            ["template", "recipient"],
        ),
        AutomationAction::new(
            "create_ticket",
            "Create IT Ticket",
            ["system", "priority", "summary"],
        ),
        AutomationAction::new(
            "schedule_orientation",
            "Schedule Orientation",
            ["date", "location"],
        ),
        AutomationAction::new("sync_hris", "Sync to HRIS", ["employeeId", "system"]),
    ])
}

const CATALOG_FETCH_LATENCY: Duration = Duration::from_millis(200);

/// Fetches the catalog as the external collaborator would: asynchronously,
/// with its typical latency.
pub async fn fetch_actions() -> ActionCatalog {
    tokio::time::sleep(CATALOG_FETCH_LATENCY).await;
    builtin_catalog()
}
