// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Portable snapshot documents (export/import and persistence payloads).

pub mod snapshot;

pub use snapshot::{
    export_snapshot, import_snapshot, EdgeDoc, NodeDataDoc, NodeDoc, PositionDoc, SnapshotDoc,
    SnapshotImportError, VersionDoc,
};
