// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Seams for the external persistence and authorization collaborators.
//!
//! The real implementations live behind HTTP routes over a hosted database;
//! the engine only depends on these traits and must keep working when calls
//! fail (local edits never wait on persistence).

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{OrgId, WorkflowGraph, WorkflowId};

/// Load/replace/version access to stored workflow graphs.
pub trait WorkflowRepository {
    fn load(&self, workflow_id: &WorkflowId) -> Result<WorkflowGraph, RepositoryError>;

    /// Replaces the stored nodes/edges wholesale.
    fn replace(
        &mut self,
        workflow_id: &WorkflowId,
        graph: &WorkflowGraph,
    ) -> Result<(), RepositoryError>;

    /// Appends an immutable version snapshot; returns its assigned,
    /// incrementing version number.
    fn append_version(
        &mut self,
        workflow_id: &WorkflowId,
        graph: &WorkflowGraph,
    ) -> Result<u64, RepositoryError>;

    fn list_versions(&self, workflow_id: &WorkflowId) -> Result<Vec<VersionRecord>, RepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    version_number: u64,
    created_at_millis: u64,
}

impl VersionRecord {
    pub fn version_number(&self) -> u64 {
        self.version_number
    }

    pub fn created_at_millis(&self) -> u64 {
        self.created_at_millis
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    NotFound { workflow_id: WorkflowId },
    Unavailable { message: String },
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { workflow_id } => write!(f, "workflow not found (id={workflow_id})"),
            Self::Unavailable { message } => write!(f, "persistence unavailable: {message}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Resolves a caller's session token to an organization, or rejects it.
/// Tenant isolation is this collaborator's job, not the engine's.
pub trait AccessGate {
    fn organization_for(&self, session_token: &str) -> Result<OrgId, AccessError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    Unauthenticated,
    NoOrganization,
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("authentication failed"),
            Self::NoOrganization => f.write_str("no organization membership found"),
        }
    }
}

impl std::error::Error for AccessError {}

#[derive(Debug, Clone, Default)]
struct StoredWorkflow {
    graph: WorkflowGraph,
    versions: Vec<(VersionRecord, WorkflowGraph)>,
}

/// In-memory repository for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    workflows: BTreeMap<WorkflowId, StoredWorkflow>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, workflow_id: WorkflowId, graph: WorkflowGraph) {
        self.workflows.insert(
            workflow_id,
            StoredWorkflow {
                graph,
                versions: Vec::new(),
            },
        );
    }

    fn stored_mut(&mut self, workflow_id: &WorkflowId) -> Result<&mut StoredWorkflow, RepositoryError> {
        self.workflows
            .get_mut(workflow_id)
            .ok_or_else(|| RepositoryError::NotFound {
                workflow_id: workflow_id.clone(),
            })
    }
}

impl WorkflowRepository for InMemoryRepository {
    fn load(&self, workflow_id: &WorkflowId) -> Result<WorkflowGraph, RepositoryError> {
        self.workflows
            .get(workflow_id)
            .map(|stored| stored.graph.clone())
            .ok_or_else(|| RepositoryError::NotFound {
                workflow_id: workflow_id.clone(),
            })
    }

    fn replace(
        &mut self,
        workflow_id: &WorkflowId,
        graph: &WorkflowGraph,
    ) -> Result<(), RepositoryError> {
        self.stored_mut(workflow_id)?.graph = graph.clone();
        Ok(())
    }

    fn append_version(
        &mut self,
        workflow_id: &WorkflowId,
        graph: &WorkflowGraph,
    ) -> Result<u64, RepositoryError> {
        let stored = self.stored_mut(workflow_id)?;
        let version_number = stored.versions.len() as u64 + 1;
        let record = VersionRecord {
            version_number,
            created_at_millis: now_millis(),
        };
        stored.versions.push((record, graph.clone()));
        Ok(version_number)
    }

    fn list_versions(&self, workflow_id: &WorkflowId) -> Result<Vec<VersionRecord>, RepositoryError> {
        self.workflows
            .get(workflow_id)
            .map(|stored| stored.versions.iter().map(|(record, _)| record.clone()).collect())
            .ok_or_else(|| RepositoryError::NotFound {
                workflow_id: workflow_id.clone(),
            })
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A fixed token-to-organization gate for tests.
#[derive(Debug, Clone)]
pub struct StaticGate {
    token: String,
    org: OrgId,
}

impl StaticGate {
    pub fn new(token: impl Into<String>, org: OrgId) -> Self {
        Self {
            token: token.into(),
            org,
        }
    }
}

impl AccessGate for StaticGate {
    fn organization_for(&self, session_token: &str) -> Result<OrgId, AccessError> {
        if session_token == self.token {
            Ok(self.org.clone())
        } else {
            Err(AccessError::Unauthenticated)
        }
    }
}
