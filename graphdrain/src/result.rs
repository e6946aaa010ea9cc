// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result handling for submitted statements
//!
//! Gremlin Server answers every request with a list of result items. Servers
//! configured with a GraphSON 2/3 serializer wrap values in
//! `{"@type": ..., "@value": ...}` envelopes; untyped JSON servers do not.
//! [`ResultSet`] strips the envelopes once, on construction, so the rest of
//! the crate only sees plain JSON.

use crate::error::{Error, Result};
use crate::model::VertexId;
use serde_json::{Map, Value};

/// Items returned by one statement
///
/// # Examples
///
/// ```no_run
/// # use graphdrain::ResultSet;
/// let result = ResultSet::from_data(serde_json::json!(
///     {"@type": "g:List", "@value": [{"@type": "g:Int64", "@value": 1300}]}
/// ));
/// assert_eq!(result.count()?, 1300);
/// # Ok::<(), graphdrain::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    items: Vec<Value>,
}

impl ResultSet {
    /// Create a result set from already untyped items
    pub fn new(items: Vec<Value>) -> Self {
        ResultSet { items }
    }

    /// Build a result set from the `result.data` member of a server response
    ///
    /// Accepts a typed `g:List`, a plain array, a single bare value, or
    /// `null` (no results).
    pub fn from_data(data: Value) -> Self {
        match untyped(&data) {
            Value::Null => ResultSet::default(),
            Value::Array(items) => ResultSet { items },
            single => ResultSet { items: vec![single] },
        }
    }

    /// Check if the result is empty (no items)
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The first item, if any
    pub fn one(&self) -> Option<&Value> {
        self.items.first()
    }

    /// Read the first item as an element count
    ///
    /// Counts arrive as JSON integers, but some serializers render longs as
    /// whole-valued doubles; both are accepted.
    pub fn count(&self) -> Result<u64> {
        let value = self
            .one()
            .ok_or_else(|| Error::Protocol("expected a count, got no results".to_string()))?;

        if let Some(n) = value.as_u64() {
            return Ok(n);
        }
        match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
            _ => Err(Error::Protocol(format!(
                "expected a non-negative count, got {}",
                value
            ))),
        }
    }

    /// Take the first item as an opaque vertex identifier
    pub fn vertex_id(&self) -> Option<VertexId> {
        self.one().cloned().and_then(VertexId::from_response)
    }
}

/// Strip GraphSON type envelopes from a value, recursively
pub fn untyped(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(untyped).collect()),
        Value::Object(map) => match (map.get("@type"), map.get("@value")) {
            (Some(Value::String(kind)), Some(inner)) if map.len() == 2 => {
                untyped_envelope(kind, inner)
            }
            _ => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), untyped(v)))
                    .collect::<Map<String, Value>>(),
            ),
        },
        other => other.clone(),
    }
}

fn untyped_envelope(kind: &str, inner: &Value) -> Value {
    match (kind, inner) {
        // GraphSON 3 maps are flat [k1, v1, k2, v2, ...] lists
        ("g:Map", Value::Array(flat)) => {
            let mut map = Map::new();
            for pair in flat.chunks(2) {
                let key = match untyped(&pair[0]) {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                let value = pair.get(1).map(untyped).unwrap_or(Value::Null);
                map.insert(key, value);
            }
            Value::Object(map)
        }
        _ => untyped(inner),
    }
}
