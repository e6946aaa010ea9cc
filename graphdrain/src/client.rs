// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Gremlin Server connection
//!
//! This module provides the concrete [`QueryExecutor`] used by the CLI: a
//! blocking HTTP client for the Gremlin Server script endpoint. Each call
//! posts `{"gremlin": ..., "bindings": ...}` and waits for the whole
//! response before returning, so the engine stays strictly sequential.

use crate::error::{Error, Result};
use crate::executor::QueryExecutor;
use crate::query::{Bindings, Statement};
use crate::result::ResultSet;
use log::{debug, trace};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Default Gremlin Server port
pub const DEFAULT_PORT: u16 = 8182;
/// Default endpoint path
pub const DEFAULT_PATH: &str = "/gremlin";

/// Where and how to reach the Gremlin Server
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub tls: bool,
    pub username: String,
    pub password: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        ServerConfig {
            host: host.into(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            tls: false,
            username: username.into(),
            password: password.into(),
            timeout: None,
        }
    }

    /// Full URL of the script endpoint
    pub fn endpoint(&self) -> Result<String> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidArgument("host must not be empty".to_string()));
        }
        let scheme = if self.tls { "https" } else { "http" };
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        Ok(format!("{}://{}:{}{}", scheme, self.host, self.port, path))
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("tls", &self.tls)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct ScriptRequest<'a> {
    #[serde(rename = "requestId")]
    request_id: Uuid,
    gremlin: &'a str,
    bindings: &'a Bindings,
    language: &'static str,
}

/// Blocking client for one Gremlin Server
///
/// # Examples
///
/// ```no_run
/// use graphdrain::{GremlinClient, QueryExecutor, ServerConfig, Statement};
///
/// # fn main() -> Result<(), graphdrain::Error> {
/// let config = ServerConfig::new("localhost", "admin", "secret");
/// let mut client = GremlinClient::connect(&config)?;
/// let result = client.execute(&Statement::new("g.V().count()"))?;
/// println!("vertices: {}", result.count()?);
/// # Ok(())
/// # }
/// ```
pub struct GremlinClient {
    http: Client,
    endpoint: String,
    username: String,
    password: String,
}

impl GremlinClient {
    /// Prepare a client for the configured server
    ///
    /// No request is sent here; an unreachable server or bad credentials
    /// surface as [`Error::Connection`] on the first statement.
    pub fn connect(config: &ServerConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Connection(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Gremlin endpoint {} as user '{}'", endpoint, config.username);

        Ok(GremlinClient {
            http,
            endpoint,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// The URL statements are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QueryExecutor for GremlinClient {
    fn execute(&mut self, statement: &Statement) -> Result<ResultSet> {
        let request = ScriptRequest {
            request_id: Uuid::new_v4(),
            gremlin: &statement.gremlin,
            bindings: &statement.bindings,
            language: "gremlin-groovy",
        };
        debug!(
            "[{}] {} {}",
            request.request_id,
            statement.gremlin,
            Value::Object(statement.bindings.clone())
        );

        let response = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        trace!("[{}] {} {}", request.request_id, status, text);

        decode_response(status, &text)
    }
}

/// Turn an HTTP status plus body into a result set or an error
fn decode_response(status: StatusCode, text: &str) -> Result<ResultSet> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::Connection(format!(
            "authentication rejected ({})",
            status
        )));
    }

    let body: Value = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(e) if status.is_success() => return Err(Error::from(e)),
        Err(_) => {
            return Err(Error::Query {
                status: status.as_u16(),
                message: text.trim().to_string(),
            });
        }
    };

    // Gremlin status codes: 200 success, 204 no content, 206 partial content
    let code = body
        .pointer("/status/code")
        .and_then(Value::as_u64)
        .map(|c| c as u16)
        .unwrap_or_else(|| status.as_u16());

    if !status.is_success() || !matches!(code, 200 | 204 | 206) {
        return Err(Error::Query {
            status: code,
            message: error_message(&body).unwrap_or_else(|| body.to_string()),
        });
    }

    if code == 204 {
        return Ok(ResultSet::default());
    }

    let data = body
        .pointer("/result/data")
        .cloned()
        .ok_or_else(|| Error::Protocol("response has no result.data member".to_string()))?;
    Ok(ResultSet::from_data(data))
}

fn error_message(body: &Value) -> Option<String> {
    body.pointer("/status/message")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
