// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for GraphDrain
//!
//! Every failure the engine can observe comes from the query executor or from
//! building a request. The engine never recovers locally: errors propagate
//! unchanged and abort the current drain.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// GraphDrain errors
#[derive(Error, Debug)]
pub enum Error {
    /// The server could not be reached, or refused the credentials
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server accepted the request but rejected the script or bindings
    #[error("Query error (status {status}): {message}")]
    Query { status: u16, message: String },

    /// The response decoded but does not have the expected shape
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A value supplied by the caller is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A successful response whose body is not JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error means the server is unreachable or refused the session
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Error::Protocol(error.to_string())
        } else {
            Error::Connection(error.to_string())
        }
    }
}
