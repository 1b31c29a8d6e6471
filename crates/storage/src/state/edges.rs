// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Applier for dependency-edge records.
//!
//! Cycle rejection happens before a record is ever built (see
//! `Store::create_edge`); by the time a `CreateEdge` reaches here it is
//! assumed acyclic and is just folded in.

use super::MaterializedState;
use crate::record::Record;
use jobctl_core::DependencyEdge;

pub(super) fn apply(state: &mut MaterializedState, record: &Record) {
    if let Record::CreateEdge { waiter, waited_for } = record {
        let edge = DependencyEdge::new(*waiter, *waited_for);
        if !state.edges.contains(&edge) {
            state.edges.push(edge);
        }
    }
}
