// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Progress events and the reporter capability
//!
//! Reporters only observe: nothing they do feeds back into the engine, and
//! they have no way to fail a run.

use crate::model::{DeletionScope, ElementKind, VertexId};
use std::fmt;

/// Something worth telling the operator while a drain runs
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// A generic drain is about to start
    DrainStarted {
        kind: ElementKind,
        scope: DeletionScope,
    },
    /// The initial count found nothing to remove
    NothingToDrain,
    /// The initial count snapshot
    TotalCount { count: u64 },
    /// Running total after a delete batch
    Drained { total: u64 },
    /// The batch loop has ended
    DrainFinished { total: u64 },
    /// A batch removed more than the limit; the loop stops
    LimitExceeded { removed: u64, limit: u64 },
    /// Super-vertex outer loop: vertices still carrying the label
    VerticesRemaining { label: String, count: u64 },
    /// Super-vertex outer loop: the vertex being detached next
    VertexSelected { vertex: VertexId },
    /// A full batch of edges was detached; more may remain
    EdgesDetached { vertex: VertexId, count: u64 },
    /// The vertex itself was removed
    VertexRemoved { vertex: VertexId, count: u64 },
    /// Dry run: how many elements a drain would start from
    Surveyed {
        kind: ElementKind,
        scope: DeletionScope,
        count: u64,
    },
}

impl Progress {
    /// Transient events may be overwritten by the next one
    pub fn is_transient(&self) -> bool {
        matches!(self, Progress::Drained { .. })
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::DrainStarted { kind, scope } => match scope {
                DeletionScope::AllElements => write!(f, "Start to remove all {}:", kind),
                DeletionScope::ByLabel(label) => {
                    write!(f, "Start to remove all {} with label {}:", kind, label)
                }
            },
            Progress::NothingToDrain => write!(f, "total count: 0, nothing to drain"),
            Progress::TotalCount { count } => write!(f, "total count: {}, begin to drain", count),
            Progress::Drained { total } => write!(f, "{}", total),
            Progress::DrainFinished { total } => write!(f, "removed: {}", total),
            Progress::LimitExceeded { removed, limit } => write!(
                f,
                "batch removed {} elements, more than the limit of {}; stopping",
                removed, limit
            ),
            Progress::VerticesRemaining { label, count } => {
                if *count == 0 {
                    write!(f, "current {} vertex count: 0, no need to drop", label)
                } else {
                    write!(f, "current {} vertex count: {}, continue to drop", label, count)
                }
            }
            Progress::VertexSelected { vertex } => write!(f, "current vertex: {}", vertex),
            Progress::EdgesDetached { vertex, count } => {
                write!(f, "dropped edges, vertex: {}, edge count: {}", vertex, count)
            }
            Progress::VertexRemoved { vertex, count } => {
                write!(f, "dropped vertex: {}, removed: {}", vertex, count)
            }
            Progress::Surveyed { kind, scope, count } => {
                write!(f, "{} ({}): {}", kind, scope, count)
            }
        }
    }
}

/// Receiver of progress events
pub trait ProgressReporter {
    fn report(&mut self, event: &Progress);
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for &mut T {
    fn report(&mut self, event: &Progress) {
        (**self).report(event)
    }
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for Box<T> {
    fn report(&mut self, event: &Progress) {
        (**self).report(event)
    }
}

/// Reporter that forwards events to the `log` facade
///
/// Transient running totals go to `debug`, everything else to `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&mut self, event: &Progress) {
        match event {
            Progress::LimitExceeded { .. } => log::warn!("{}", event),
            e if e.is_transient() => log::debug!("{}", e),
            e => log::info!("{}", e),
        }
    }
}

/// Reporter that keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    events: Vec<Progress>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Progress] {
        &self.events
    }

    /// Rendered messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(|e| e.to_string()).collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&mut self, event: &Progress) {
        self.events.push(event.clone());
    }
}
