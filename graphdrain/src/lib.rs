// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GraphDrain - batched bulk deletion for Gremlin graph databases
//!
//! Dropping a large graph with a single `g.V().drop()` can time out or take a
//! server down. This crate removes elements in bounded batches instead, and
//! handles super-vertices (vertices with more incident edges than one request
//! can safely touch) by detaching their edges batch by batch before removing
//! the vertex.
//!
//! # Quick Start
//!
//! ```no_run
//! use graphdrain::{BatchLimit, DrainEngine, DrainMode, GremlinClient, LogReporter, ServerConfig};
//!
//! # fn main() -> Result<(), graphdrain::Error> {
//! let config = ServerConfig::new("localhost", "admin", "secret");
//! let client = GremlinClient::connect(&config)?;
//!
//! let mut engine = DrainEngine::new(client, LogReporter);
//! let mode = DrainMode::from_options(Some("Temp".to_string()), false, false);
//! for outcome in engine.run(&mode, BatchLimit::default())? {
//!     println!("{} ({}): {}", outcome.kind, outcome.scope, outcome.removed);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   graphdrain CLI / application code     │
//! └─────────────────────────────────────────┘
//!                  │ DrainMode + BatchLimit
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  DrainEngine                            │
//! │  - generic batch drain                  │
//! │  - super-vertex detachment              │──▶ ProgressReporter
//! └─────────────────────────────────────────┘
//!                  │ Statement (script + bindings)
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  QueryExecutor (GremlinClient over HTTP)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`model`] - element kinds, scopes, batch limits, vertex identifiers
//! - [`query`] - typed statements for each query shape
//! - [`result`] - result sets and GraphSON decoding
//! - [`executor`] - the query executor capability
//! - [`client`] - Gremlin Server HTTP executor
//! - [`progress`] - progress events and reporters
//! - [`engine`] - the drain algorithms
//! - [`mode`] - deletion modes and dispatch
//! - [`error`] - error types

pub mod client;
pub mod engine;
pub mod error;
pub mod executor;
pub mod mode;
pub mod model;
pub mod progress;
pub mod query;
pub mod result;

pub use client::{GremlinClient, ServerConfig};
pub use engine::{DrainEngine, DrainOutcome, DrainRequest, SuperVertexOutcome};
pub use error::{Error, Result};
pub use executor::QueryExecutor;
pub use mode::{DrainMode, SurveyCount};
pub use model::{BatchLimit, DeletionScope, ElementKind, VertexId};
pub use progress::{LogReporter, Progress, ProgressReporter, RecordingReporter};
pub use query::{Bindings, Statement};
pub use result::ResultSet;

/// GraphDrain version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
