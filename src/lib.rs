// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Onflow, a workflow graph engine for HR process builders.
//!
//! The crate owns the graph model and everything derived from it: incremental
//! mutation with undo/redo ([`store`]), structural validation ([`validate`]),
//! topological auto-layout ([`layout`]), mock simulation ([`sim`]), and the
//! portable snapshot document ([`format`]). Route handlers, auth, and the
//! database live elsewhere and talk to this crate through [`store::persist`].

pub mod format;
pub mod layout;
pub mod model;
pub mod sim;
pub mod store;
pub mod validate;
