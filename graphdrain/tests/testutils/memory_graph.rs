//! In-memory graph fixture for drain tests
//!
//! Interprets exactly the statements the drain engine renders and applies
//! them to a small vertex/edge store, with Gremlin semantics: dropping a
//! vertex also drops its incident edges. Every statement is recorded so
//! tests can assert on the request sequence.

use graphdrain::query::{DROP_LABEL, LIMIT, VID};
use graphdrain::{Error, QueryExecutor, ResultSet, Statement};
use serde_json::{json, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct EdgeRecord {
    label: String,
    out_v: u64,
    in_v: u64,
}

/// In-memory graph executor
#[derive(Debug, Default)]
pub struct MemoryGraph {
    vertices: BTreeMap<u64, String>,
    edges: BTreeMap<u64, EdgeRecord>,
    next_id: u64,
    string_ids: bool,
    /// Vertices added by a simulated concurrent writer after the next delete
    pending_writes: Vec<(String, u64)>,
    fail_after: Option<usize>,
    pub log: Vec<Statement>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        MemoryGraph {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Hand out ids as strings ("v12") instead of numbers
    pub fn with_string_ids(mut self) -> Self {
        self.string_ids = true;
        self
    }

    /// Fail every statement after the first `n` with a connection error
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Add `n` vertices with `label` right after the next delete batch
    pub fn write_concurrently(&mut self, label: &str, n: u64) {
        self.pending_writes.push((label.to_string(), n));
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_vertex(&mut self, label: &str) -> u64 {
        let id = self.fresh_id();
        self.vertices.insert(id, label.to_string());
        id
    }

    pub fn add_vertices(&mut self, label: &str, n: u64) -> Vec<u64> {
        (0..n).map(|_| self.add_vertex(label)).collect()
    }

    pub fn add_edge(&mut self, label: &str, out_v: u64, in_v: u64) -> u64 {
        let id = self.fresh_id();
        self.edges.insert(
            id,
            EdgeRecord {
                label: label.to_string(),
                out_v,
                in_v,
            },
        );
        id
    }

    /// Vertex with `degree` edges to fresh leaf vertices labelled `leaf_label`
    pub fn add_star(&mut self, label: &str, leaf_label: &str, degree: u64) -> u64 {
        let hub = self.add_vertex(label);
        for i in 0..degree {
            let leaf = self.add_vertex(leaf_label);
            if i % 2 == 0 {
                self.add_edge("links", hub, leaf);
            } else {
                self.add_edge("links", leaf, hub);
            }
        }
        hub
    }

    pub fn vertex_count(&self) -> u64 {
        self.vertices.len() as u64
    }

    pub fn edge_count(&self) -> u64 {
        self.edges.len() as u64
    }

    pub fn vertices_labelled(&self, label: &str) -> u64 {
        self.vertices.values().filter(|l| l.as_str() == label).count() as u64
    }

    pub fn edges_labelled(&self, label: &str) -> u64 {
        self.edges.values().filter(|e| e.label == label).count() as u64
    }

    /// Number of recorded statements whose script equals `gremlin`
    pub fn issued(&self, gremlin: &str) -> usize {
        self.log.iter().filter(|s| s.gremlin == gremlin).count()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.log.iter().map(|s| s.gremlin.clone()).collect()
    }

    fn render_id(&self, id: u64) -> Value {
        if self.string_ids {
            json!(format!("v{}", id))
        } else {
            json!(id)
        }
    }

    fn parse_id(&self, value: &Value) -> Result<u64, Error> {
        let parsed = if self.string_ids {
            value
                .as_str()
                .and_then(|s| s.strip_prefix('v'))
                .and_then(|s| s.parse().ok())
        } else {
            value.as_u64()
        };
        parsed.ok_or_else(|| Error::Query {
            status: 597,
            message: format!("bad vertex id binding {}", value),
        })
    }

    fn label_binding(statement: &Statement) -> Result<String, Error> {
        statement
            .binding(DROP_LABEL)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| missing(DROP_LABEL))
    }

    fn limit_binding(statement: &Statement) -> Result<usize, Error> {
        statement
            .binding(LIMIT)
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .ok_or_else(|| missing(LIMIT))
    }

    fn vertex_ids(&self, label: Option<&str>) -> Vec<u64> {
        self.vertices
            .iter()
            .filter(|(_, l)| label.map_or(true, |want| l.as_str() == want))
            .map(|(id, _)| *id)
            .collect()
    }

    fn edge_ids(&self, label: Option<&str>) -> Vec<u64> {
        self.edges
            .iter()
            .filter(|(_, e)| label.map_or(true, |want| e.label == want))
            .map(|(id, _)| *id)
            .collect()
    }

    fn drop_vertex(&mut self, id: u64) -> bool {
        if self.vertices.remove(&id).is_none() {
            return false;
        }
        self.edges.retain(|_, e| e.out_v != id && e.in_v != id);
        true
    }

    fn apply_pending_writes(&mut self) {
        for (label, n) in std::mem::take(&mut self.pending_writes) {
            self.add_vertices(&label, n);
        }
    }

    fn count_of(n: usize) -> ResultSet {
        ResultSet::new(vec![json!(n)])
    }

    fn run(&mut self, statement: &Statement) -> Result<ResultSet, Error> {
        let gremlin = statement.gremlin.as_str();
        match gremlin {
            "g.V().count()" => Ok(Self::count_of(self.vertices.len())),
            "g.E().count()" => Ok(Self::count_of(self.edges.len())),
            "g.V().hasLabel(drop_label).count()" => {
                let label = Self::label_binding(statement)?;
                Ok(Self::count_of(self.vertex_ids(Some(&label)).len()))
            }
            "g.E().hasLabel(drop_label).count()" => {
                let label = Self::label_binding(statement)?;
                Ok(Self::count_of(self.edge_ids(Some(&label)).len()))
            }
            "g.V().limit(limit).sideEffect(drop()).count()"
            | "g.V().hasLabel(drop_label).limit(limit).sideEffect(drop()).count()" => {
                let label = if gremlin.contains("hasLabel") {
                    Some(Self::label_binding(statement)?)
                } else {
                    None
                };
                let limit = Self::limit_binding(statement)?;
                let batch: Vec<u64> = self
                    .vertex_ids(label.as_deref())
                    .into_iter()
                    .take(limit)
                    .collect();
                for id in &batch {
                    self.drop_vertex(*id);
                }
                self.apply_pending_writes();
                Ok(Self::count_of(batch.len()))
            }
            "g.E().limit(limit).sideEffect(drop()).count()"
            | "g.E().hasLabel(drop_label).limit(limit).sideEffect(drop()).count()" => {
                let label = if gremlin.contains("hasLabel") {
                    Some(Self::label_binding(statement)?)
                } else {
                    None
                };
                let limit = Self::limit_binding(statement)?;
                let batch: Vec<u64> = self
                    .edge_ids(label.as_deref())
                    .into_iter()
                    .take(limit)
                    .collect();
                for id in &batch {
                    self.edges.remove(id);
                }
                self.apply_pending_writes();
                Ok(Self::count_of(batch.len()))
            }
            "g.V().hasLabel(drop_label).limit(1).id()" => {
                let label = Self::label_binding(statement)?;
                let items = self
                    .vertex_ids(Some(&label))
                    .first()
                    .map(|id| vec![self.render_id(*id)])
                    .unwrap_or_default();
                Ok(ResultSet::new(items))
            }
            "g.V(vid).bothE().limit(limit).sideEffect(drop()).count()" => {
                let vid = statement.binding(VID).ok_or_else(|| missing(VID))?;
                let vid = self.parse_id(vid)?;
                let limit = Self::limit_binding(statement)?;
                let batch: Vec<u64> = self
                    .edges
                    .iter()
                    .filter(|(_, e)| e.out_v == vid || e.in_v == vid)
                    .map(|(id, _)| *id)
                    .take(limit)
                    .collect();
                for id in &batch {
                    self.edges.remove(id);
                }
                Ok(Self::count_of(batch.len()))
            }
            "g.V(vid).sideEffect(drop()).count()" => {
                let vid = statement.binding(VID).ok_or_else(|| missing(VID))?;
                let vid = self.parse_id(vid)?;
                let dropped = self.drop_vertex(vid);
                Ok(Self::count_of(dropped as usize))
            }
            other => Err(Error::Query {
                status: 599,
                message: format!("unsupported script: {}", other),
            }),
        }
    }
}

fn missing(name: &str) -> Error {
    Error::Query {
        status: 597,
        message: format!("No such property: {}", name),
    }
}

impl QueryExecutor for MemoryGraph {
    fn execute(&mut self, statement: &Statement) -> Result<ResultSet, Error> {
        self.log.push(statement.clone());
        if let Some(n) = self.fail_after {
            if self.log.len() > n {
                return Err(Error::Connection("connection reset by peer".to_string()));
            }
        }
        self.run(statement)
    }
}
