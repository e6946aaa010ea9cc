// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Deletion modes and their dispatch onto the engine

use crate::engine::{DrainEngine, DrainOutcome, DrainRequest};
use crate::error::Result;
use crate::executor::QueryExecutor;
use crate::model::{BatchLimit, DeletionScope, ElementKind};
use crate::progress::{Progress, ProgressReporter};
use std::fmt;

/// What a run removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrainMode {
    /// Every edge, then (unless `edges_only`) every vertex
    Everything { edges_only: bool },
    /// Every element of one kind carrying `label`
    ByLabel { label: String, kind: ElementKind },
    /// Every vertex carrying `label`, edges detached per vertex first
    SuperVertex { label: String },
}

impl DrainMode {
    /// Select a mode from the command-line switches
    ///
    /// Without a label the super-vertex switch has nothing to act on and is
    /// ignored.
    pub fn from_options(label: Option<String>, edges_only: bool, with_super_v: bool) -> Self {
        match label {
            None => DrainMode::Everything { edges_only },
            Some(label) if with_super_v => DrainMode::SuperVertex { label },
            Some(label) => DrainMode::ByLabel {
                label,
                kind: if edges_only {
                    ElementKind::Edge
                } else {
                    ElementKind::Vertex
                },
            },
        }
    }

    /// The generic drains this mode runs, in order
    ///
    /// Empty for [`DrainMode::SuperVertex`], which has its own routine.
    pub fn requests(&self, limit: BatchLimit) -> Vec<DrainRequest> {
        match self {
            DrainMode::Everything { edges_only } => {
                let mut requests = vec![DrainRequest::new(
                    ElementKind::Edge,
                    DeletionScope::AllElements,
                    limit,
                )];
                if !edges_only {
                    requests.push(DrainRequest::new(
                        ElementKind::Vertex,
                        DeletionScope::AllElements,
                        limit,
                    ));
                }
                requests
            }
            DrainMode::ByLabel { label, kind } => vec![DrainRequest::new(
                *kind,
                DeletionScope::ByLabel(label.clone()),
                limit,
            )],
            DrainMode::SuperVertex { .. } => Vec::new(),
        }
    }

    /// The (kind, scope) pairs whose counts a dry run reports
    fn surveyed(&self) -> Vec<(ElementKind, DeletionScope)> {
        match self {
            DrainMode::SuperVertex { label } => {
                vec![(ElementKind::Vertex, DeletionScope::ByLabel(label.clone()))]
            }
            other => other
                .requests(BatchLimit::default())
                .into_iter()
                .map(|r| (r.kind, r.scope))
                .collect(),
        }
    }
}

impl fmt::Display for DrainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainMode::Everything { edges_only: true } => f.write_str("all edges"),
            DrainMode::Everything { edges_only: false } => f.write_str("all edges and vertices"),
            DrainMode::ByLabel { label, kind } => write!(f, "{} with label '{}'", kind, label),
            DrainMode::SuperVertex { label } => {
                write!(f, "vertices with label '{}' (super-vertex aware)", label)
            }
        }
    }
}

/// A dry-run count
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyCount {
    pub kind: ElementKind,
    pub scope: DeletionScope,
    pub count: u64,
}

impl<E: QueryExecutor, R: ProgressReporter> DrainEngine<E, R> {
    /// Run one mode to completion
    ///
    /// Returns one outcome per drained collection, in the order they ran.
    pub fn run(&mut self, mode: &DrainMode, limit: BatchLimit) -> Result<Vec<DrainOutcome>> {
        log::info!("Running drain of {}", mode);
        match mode {
            DrainMode::SuperVertex { label } => {
                let outcome = self.drain_super_vertices(label, limit)?;
                Ok(outcome.into_outcomes().to_vec())
            }
            _ => mode
                .requests(limit)
                .iter()
                .map(|request| self.drain(request))
                .collect(),
        }
    }

    /// Count what a mode would remove, without deleting anything
    pub fn survey(&mut self, mode: &DrainMode) -> Result<Vec<SurveyCount>> {
        let mut counts = Vec::new();
        for (kind, scope) in mode.surveyed() {
            let count = self.count(kind, &scope)?;
            self.report(Progress::Surveyed {
                kind,
                scope: scope.clone(),
                count,
            });
            counts.push(SurveyCount { kind, scope, count });
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        assert_eq!(
            DrainMode::from_options(None, false, false),
            DrainMode::Everything { edges_only: false }
        );
        assert_eq!(
            DrainMode::from_options(None, true, true),
            DrainMode::Everything { edges_only: true }
        );
        assert_eq!(
            DrainMode::from_options(Some("Temp".into()), true, false),
            DrainMode::ByLabel {
                label: "Temp".into(),
                kind: ElementKind::Edge
            }
        );
        assert_eq!(
            DrainMode::from_options(Some("Hub".into()), true, true),
            DrainMode::SuperVertex { label: "Hub".into() }
        );
    }

    #[test]
    fn test_everything_drains_edges_before_vertices() {
        let limit = BatchLimit::default();
        let requests = DrainMode::Everything { edges_only: false }.requests(limit);
        let kinds: Vec<ElementKind> = requests.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ElementKind::Edge, ElementKind::Vertex]);
        assert!(requests
            .iter()
            .all(|r| r.scope == DeletionScope::AllElements && r.limit == limit));

        let requests = DrainMode::Everything { edges_only: true }.requests(limit);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].kind, ElementKind::Edge);
    }

    #[test]
    fn test_super_vertex_has_no_generic_requests() {
        let mode = DrainMode::SuperVertex { label: "Hub".into() };
        assert!(mode.requests(BatchLimit::default()).is_empty());
        assert_eq!(
            mode.surveyed(),
            vec![(ElementKind::Vertex, DeletionScope::ByLabel("Hub".into()))]
        );
    }
}
