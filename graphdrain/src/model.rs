// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Drain model types: element kinds, deletion scopes, batch limits and
//! vertex identifiers

use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::num::NonZeroU64;

/// Which collection of the graph a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Edge,
}

impl ElementKind {
    /// Gremlin start step marker (`V` or `E`)
    pub fn step(&self) -> &'static str {
        match self {
            ElementKind::Vertex => "V",
            ElementKind::Edge => "E",
        }
    }

    /// Plural noun used in progress messages
    pub fn plural(&self) -> &'static str {
        match self {
            ElementKind::Vertex => "vertices",
            ElementKind::Edge => "edges",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Filter applied to the elements of a drain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeletionScope {
    /// Every element of the selected kind
    AllElements,
    /// Only elements whose label equals the given string exactly
    ByLabel(String),
}

impl DeletionScope {
    /// Build a scope from an optional label, `None` meaning everything
    pub fn from_label(label: Option<String>) -> Self {
        match label {
            Some(label) => DeletionScope::ByLabel(label),
            None => DeletionScope::AllElements,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            DeletionScope::AllElements => None,
            DeletionScope::ByLabel(label) => Some(label),
        }
    }
}

impl fmt::Display for DeletionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionScope::AllElements => f.write_str("all"),
            DeletionScope::ByLabel(label) => write!(f, "label '{}'", label),
        }
    }
}

/// Maximum number of elements a single delete or detach call may remove
///
/// Fixed for the whole run of a drain. Zero is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimit(NonZeroU64);

impl BatchLimit {
    pub const DEFAULT: u64 = 500;

    pub fn new(limit: u64) -> Result<Self> {
        NonZeroU64::new(limit)
            .map(BatchLimit)
            .ok_or_else(|| Error::InvalidArgument("batch limit must be at least 1".to_string()))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl Default for BatchLimit {
    fn default() -> Self {
        // 500 is non-zero
        BatchLimit(NonZeroU64::MIN.saturating_add(Self::DEFAULT - 1))
    }
}

impl fmt::Display for BatchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a vertex as returned by the server
///
/// The engine never interprets the token: it is captured from one response
/// and bound unchanged into later requests. Numeric ids stay numbers, string
/// ids stay strings, composite ids stay objects.
///
/// The token is held after GraphSON envelopes are stripped, so the numeric
/// width is lost: a `g:Int64` id of `7` is bound as the plain JSON number `7`.
/// Servers that resolve untyped numbers to a narrower type than the stored
/// id (TinkerGraph with the `ANY` id manager holding `Long` ids) will not
/// find the vertex. Such a vertex is picked again on the next round and the
/// super-vertex loop does not finish. Use string or `LONG`-managed ids
/// against those servers.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexId(Value);

impl VertexId {
    /// Wrap a decoded response item. Returns `None` for `null`.
    pub fn from_response(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            other => Some(VertexId(other)),
        }
    }

    /// The token as it must be bound into a request
    pub fn as_binding(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}
