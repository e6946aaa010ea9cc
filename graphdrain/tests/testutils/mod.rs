//! Test utilities for GraphDrain integration tests
//!
//! - MemoryGraph: in-memory executor that understands the fixed drain statements

#![allow(dead_code)]

pub mod memory_graph;
