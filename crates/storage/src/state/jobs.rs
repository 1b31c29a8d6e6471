// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Appliers for job, array-element, and lifecycle records.

use super::MaterializedState;
use crate::record::Record;
use jobctl_core::{ArrayElement, ExternalId};

/// Fold one non-edge record into `state`. Idempotent: re-applying the same
/// `CreateJob`/`CreateArrayElement` twice leaves state unchanged, and
/// updates against a job that has since been deleted are no-ops.
pub(super) fn apply(state: &mut MaterializedState, record: &Record) {
    match record {
        Record::CreateJob { job } => {
            let id = job.unique;
            state.jobs.entry(id).or_insert_with(|| (**job).clone());
            state.elements.entry(id).or_default();
        }
        Record::CreateArrayElement { job, index } => {
            let elements = state.elements.entry(*job).or_default();
            if !elements.iter().any(|e| e.index == *index) {
                elements.push(ArrayElement::new(*index));
            }
        }
        Record::UpdateStatus { job, element_index, status, result } => match element_index {
            Some(idx) => {
                if let Some(elements) = state.elements.get_mut(job) {
                    if let Some(element) = elements.iter_mut().find(|e| e.index == *idx) {
                        element.status = *status;
                        element.result = *result;
                    }
                }
            }
            None => {
                if let Some(existing) = state.jobs.get_mut(job) {
                    existing.status = *status;
                    existing.result = *result;
                }
            }
        },
        Record::UpdateExternalId { job, external_id } => {
            if let Some(existing) = state.jobs.get_mut(job) {
                existing.external_id = ExternalId(*external_id);
            }
        }
        Record::UpdateName { job, name } => {
            if let Some(existing) = state.jobs.get_mut(job) {
                existing.name = name.clone();
            }
        }
        Record::UpdateQueue { job, queue_name } => {
            if let Some(existing) = state.jobs.get_mut(job) {
                existing.queue_name = queue_name.clone();
            }
        }
        Record::DeleteCascade { job } => {
            state.jobs.remove(job);
            state.elements.remove(job);
            state.edges.retain(|e| e.waiter != *job && e.waited_for != *job);
        }
        Record::CreateEdge { .. } => unreachable!("dispatched to state::edges::apply"),
    }
}
