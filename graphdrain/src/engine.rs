// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! The drain engine
//!
//! Two algorithms live here:
//!
//! - the generic batch drain, which counts the matching elements once and
//!   then issues bounded delete statements until that many are removed;
//! - super-vertex detachment, which removes labelled vertices one at a time,
//!   stripping their incident edges in bounded batches before the vertex
//!   itself is dropped.
//!
//! Nothing here is transactional. Every statement is committed by the server
//! as soon as it returns, and any executor error aborts the run with the
//! graph partially drained.

use crate::error::Result;
use crate::executor::QueryExecutor;
use crate::model::{BatchLimit, DeletionScope, ElementKind, VertexId};
use crate::progress::{Progress, ProgressReporter};
use crate::query::{
    CountQuery, DeleteBatchQuery, DeleteVertexQuery, DetachEdgesQuery, PickVertexQuery, Statement,
};
use log::{debug, info, warn};

/// One drain operation: which elements, which filter, how many per call
#[derive(Debug, Clone, PartialEq)]
pub struct DrainRequest {
    pub kind: ElementKind,
    pub scope: DeletionScope,
    pub limit: BatchLimit,
}

impl DrainRequest {
    pub fn new(kind: ElementKind, scope: DeletionScope, limit: BatchLimit) -> Self {
        DrainRequest { kind, scope, limit }
    }
}

/// What a drain removed
#[derive(Debug, Clone, PartialEq)]
pub struct DrainOutcome {
    pub kind: ElementKind,
    pub scope: DeletionScope,
    /// Sum of the per-call counts reported by the server
    pub removed: u64,
    /// Number of delete statements issued
    pub batches: u64,
}

/// What super-vertex detachment removed for one label
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuperVertexOutcome {
    pub label: String,
    pub vertices: u64,
    pub edges: u64,
    pub edge_batches: u64,
    pub vertex_calls: u64,
}

impl SuperVertexOutcome {
    /// Split into per-kind outcomes, edges first
    pub fn into_outcomes(self) -> [DrainOutcome; 2] {
        let scope = DeletionScope::ByLabel(self.label);
        [
            DrainOutcome {
                kind: ElementKind::Edge,
                scope: scope.clone(),
                removed: self.edges,
                batches: self.edge_batches,
            },
            DrainOutcome {
                kind: ElementKind::Vertex,
                scope,
                removed: self.vertices,
                batches: self.vertex_calls,
            },
        ]
    }
}

/// Batch-draining deletion engine
///
/// Owns the executor for the duration of a run. Statements are issued one at
/// a time and each is fully answered before the next is built.
///
/// # Examples
///
/// ```no_run
/// use graphdrain::{
///     BatchLimit, DeletionScope, DrainEngine, DrainRequest, ElementKind, GremlinClient,
///     LogReporter, ServerConfig,
/// };
///
/// # fn main() -> Result<(), graphdrain::Error> {
/// let client = GremlinClient::connect(&ServerConfig::new("localhost", "admin", "secret"))?;
/// let mut engine = DrainEngine::new(client, LogReporter);
/// let request = DrainRequest::new(
///     ElementKind::Vertex,
///     DeletionScope::ByLabel("Temp".into()),
///     BatchLimit::default(),
/// );
/// let outcome = engine.drain(&request)?;
/// println!("removed {}", outcome.removed);
/// # Ok(())
/// # }
/// ```
pub struct DrainEngine<E, R> {
    executor: E,
    reporter: R,
}

impl<E: QueryExecutor, R: ProgressReporter> DrainEngine<E, R> {
    pub fn new(executor: E, reporter: R) -> Self {
        DrainEngine { executor, reporter }
    }

    /// Give back the executor and reporter
    pub fn into_parts(self) -> (E, R) {
        (self.executor, self.reporter)
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub(crate) fn report(&mut self, event: Progress) {
        self.reporter.report(&event);
    }

    fn execute_count(&mut self, statement: &Statement) -> Result<u64> {
        self.executor.execute(statement)?.count()
    }

    /// Count the elements of one kind matching a scope
    pub fn count(&mut self, kind: ElementKind, scope: &DeletionScope) -> Result<u64> {
        let statement = CountQuery { kind, scope }.statement();
        self.execute_count(&statement)
    }

    /// Remove every element matched by the request, one bounded batch at a time
    pub fn drain(&mut self, request: &DrainRequest) -> Result<DrainOutcome> {
        info!(
            "Draining {} ({}) with batch limit {}",
            request.kind, request.scope, request.limit
        );
        self.report(Progress::DrainStarted {
            kind: request.kind,
            scope: request.scope.clone(),
        });

        let count = CountQuery {
            kind: request.kind,
            scope: &request.scope,
        }
        .statement();
        let delete = DeleteBatchQuery {
            kind: request.kind,
            scope: &request.scope,
            limit: request.limit,
        }
        .statement();

        let (removed, batches) = self.batch_drain(&count, &delete, request.limit)?;

        Ok(DrainOutcome {
            kind: request.kind,
            scope: request.scope.clone(),
            removed,
            batches,
        })
    }

    /// Count once, then delete batches until the counted total is removed
    ///
    /// The count is a snapshot. A batch that removes nothing ends the loop
    /// early when concurrent writers shrank the collection; elements added
    /// after the count may survive, and a caller wanting them gone re-runs
    /// the drain.
    fn batch_drain(
        &mut self,
        count: &Statement,
        delete: &Statement,
        limit: BatchLimit,
    ) -> Result<(u64, u64)> {
        let total = self.execute_count(count)?;
        if total == 0 {
            self.report(Progress::NothingToDrain);
            return Ok((0, 0));
        }
        self.report(Progress::TotalCount { count: total });

        let mut removed = 0u64;
        let mut batches = 0u64;
        while removed < total {
            let dropped = self.execute_count(delete)?;
            batches += 1;
            removed += dropped;
            self.report(Progress::Drained { total: removed });

            if dropped == 0 {
                break;
            }
            if dropped > limit.get() {
                warn!(
                    "Batch removed {} elements with limit {}; stopping drain",
                    dropped, limit
                );
                self.report(Progress::LimitExceeded {
                    removed: dropped,
                    limit: limit.get(),
                });
                break;
            }
        }

        debug!("Drain finished after {} batches, {} removed", batches, removed);
        self.report(Progress::DrainFinished { total: removed });
        Ok((removed, batches))
    }

    /// Remove every vertex carrying `label`, detaching its edges first
    ///
    /// Works on one vertex at a time: pick any matching vertex, drop up to
    /// `limit` of its edges per call until a call comes back short, then drop
    /// the vertex and recount. Recounting each round means no list of
    /// processed vertices is kept.
    pub fn drain_super_vertices(
        &mut self,
        label: &str,
        limit: BatchLimit,
    ) -> Result<SuperVertexOutcome> {
        info!(
            "Draining vertices with label '{}' edge-first, batch limit {}",
            label, limit
        );
        let scope = DeletionScope::ByLabel(label.to_string());
        let count = CountQuery {
            kind: ElementKind::Vertex,
            scope: &scope,
        }
        .statement();
        let pick = PickVertexQuery { label }.statement();

        let mut outcome = SuperVertexOutcome {
            label: label.to_string(),
            ..Default::default()
        };

        loop {
            let remaining = self.execute_count(&count)?;
            self.report(Progress::VerticesRemaining {
                label: label.to_string(),
                count: remaining,
            });
            if remaining == 0 {
                break;
            }

            // The vertex may have vanished between the count and the pick
            let Some(vertex) = self.executor.execute(&pick)?.vertex_id() else {
                debug!("No vertex returned for label '{}'; recounting", label);
                continue;
            };
            self.report(Progress::VertexSelected {
                vertex: vertex.clone(),
            });

            self.detach_and_remove(&vertex, limit, &mut outcome)?;
        }

        Ok(outcome)
    }

    fn detach_and_remove(
        &mut self,
        vertex: &VertexId,
        limit: BatchLimit,
        outcome: &mut SuperVertexOutcome,
    ) -> Result<()> {
        let detach = DetachEdgesQuery { vertex, limit }.statement();
        loop {
            let dropped = self.execute_count(&detach)?;
            outcome.edge_batches += 1;
            outcome.edges += dropped;

            if dropped < limit.get() {
                let statement = DeleteVertexQuery { vertex }.statement();
                let removed = self.execute_count(&statement)?;
                outcome.vertex_calls += 1;
                outcome.vertices += removed;
                self.report(Progress::VertexRemoved {
                    vertex: vertex.clone(),
                    count: removed,
                });
                return Ok(());
            }

            self.report(Progress::EdgesDetached {
                vertex: vertex.clone(),
                count: dropped,
            });
        }
    }
}
