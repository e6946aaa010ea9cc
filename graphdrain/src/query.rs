// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed Gremlin statements
//!
//! Each query shape the drain engine sends is a small struct exposing its
//! parameters as fields. Rendering produces a [`Statement`]: a fixed script
//! with named placeholders plus the binding map for those placeholders.
//! User-supplied values (labels, ids) only ever travel as bindings, never
//! spliced into the script text.

use crate::model::{BatchLimit, DeletionScope, ElementKind, VertexId};
use serde::Serialize;
use serde_json::{Map, Value};

/// Binding name carrying the label filter
pub const DROP_LABEL: &str = "drop_label";
/// Binding name carrying the batch limit
pub const LIMIT: &str = "limit";
/// Binding name carrying a vertex identifier
pub const VID: &str = "vid";

/// Parameter bindings sent alongside a script
pub type Bindings = Map<String, Value>;

/// A script plus its parameter bindings, ready for submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub gremlin: String,
    pub bindings: Bindings,
}

impl Statement {
    pub fn new(gremlin: impl Into<String>) -> Self {
        Statement {
            gremlin: gremlin.into(),
            bindings: Bindings::new(),
        }
    }

    /// Add a binding
    pub fn bind(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.bindings.insert(name.to_string(), value.into());
        self
    }

    /// Look up a bound value by name
    pub fn binding(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

/// Fluent builder for the traversal shapes used by the engine
///
/// ```text
/// Traversal::start("V").has_label().limit().drop_and_count()
///   => "g.V().hasLabel(drop_label).limit(limit).sideEffect(drop()).count()"
/// ```
#[derive(Debug)]
struct Traversal {
    steps: Vec<String>,
}

impl Traversal {
    fn start(marker: &str) -> Self {
        Traversal {
            steps: vec![format!("{}()", marker)],
        }
    }

    fn start_at(vertex_param: &str) -> Self {
        Traversal {
            steps: vec![format!("V({})", vertex_param)],
        }
    }

    fn step(mut self, step: &str) -> Self {
        self.steps.push(step.to_string());
        self
    }

    fn has_label(self) -> Self {
        let step = format!("hasLabel({})", DROP_LABEL);
        self.step(&step)
    }

    fn limit(self) -> Self {
        let step = format!("limit({})", LIMIT);
        self.step(&step)
    }

    fn scoped(self, scope: &DeletionScope) -> Self {
        match scope {
            DeletionScope::AllElements => self,
            DeletionScope::ByLabel(_) => self.has_label(),
        }
    }

    fn count(self) -> String {
        self.step("count()").build()
    }

    fn drop_and_count(self) -> String {
        self.step("sideEffect(drop())").count()
    }

    fn build(&self) -> String {
        format!("g.{}", self.steps.join("."))
    }
}

fn bind_scope(statement: Statement, scope: &DeletionScope) -> Statement {
    match scope {
        DeletionScope::AllElements => statement,
        DeletionScope::ByLabel(label) => statement.bind(DROP_LABEL, label.as_str()),
    }
}

/// Count the elements of one kind matching a scope
#[derive(Debug, Clone, Copy)]
pub struct CountQuery<'a> {
    pub kind: ElementKind,
    pub scope: &'a DeletionScope,
}

impl CountQuery<'_> {
    pub fn statement(&self) -> Statement {
        let gremlin = Traversal::start(self.kind.step()).scoped(self.scope).count();
        bind_scope(Statement::new(gremlin), self.scope)
    }
}

/// Remove up to `limit` elements matching a scope, returning how many went
#[derive(Debug, Clone, Copy)]
pub struct DeleteBatchQuery<'a> {
    pub kind: ElementKind,
    pub scope: &'a DeletionScope,
    pub limit: BatchLimit,
}

impl DeleteBatchQuery<'_> {
    pub fn statement(&self) -> Statement {
        let gremlin = Traversal::start(self.kind.step())
            .scoped(self.scope)
            .limit()
            .drop_and_count();
        bind_scope(Statement::new(gremlin), self.scope).bind(LIMIT, self.limit.get())
    }
}

/// Fetch the identifier of one arbitrary vertex carrying a label
#[derive(Debug, Clone, Copy)]
pub struct PickVertexQuery<'a> {
    pub label: &'a str,
}

impl PickVertexQuery<'_> {
    pub fn statement(&self) -> Statement {
        let gremlin = Traversal::start(ElementKind::Vertex.step())
            .has_label()
            .step("limit(1)")
            .step("id()")
            .build();
        Statement::new(gremlin).bind(DROP_LABEL, self.label)
    }
}

/// Remove up to `limit` edges incident to one vertex, in either direction
#[derive(Debug, Clone, Copy)]
pub struct DetachEdgesQuery<'a> {
    pub vertex: &'a VertexId,
    pub limit: BatchLimit,
}

impl DetachEdgesQuery<'_> {
    pub fn statement(&self) -> Statement {
        let gremlin = Traversal::start_at(VID)
            .step("bothE()")
            .limit()
            .drop_and_count();
        Statement::new(gremlin)
            .bind(VID, self.vertex.as_binding().clone())
            .bind(LIMIT, self.limit.get())
    }
}

/// Remove one vertex by identifier
#[derive(Debug, Clone, Copy)]
pub struct DeleteVertexQuery<'a> {
    pub vertex: &'a VertexId,
}

impl DeleteVertexQuery<'_> {
    pub fn statement(&self) -> Statement {
        let gremlin = Traversal::start_at(VID).drop_and_count();
        Statement::new(gremlin).bind(VID, self.vertex.as_binding().clone())
    }
}
