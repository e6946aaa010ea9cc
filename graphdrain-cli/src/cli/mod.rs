// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for GraphDrain
//!
//! Parses the command line, connects to the Gremlin Server and runs one
//! drain mode with console progress output.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::Cli;
pub use handlers::handle_drain;
