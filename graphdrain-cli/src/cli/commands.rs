// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line arguments for GraphDrain

use clap::{Parser, ValueEnum};
use graphdrain::client::{DEFAULT_PATH, DEFAULT_PORT};
use graphdrain::model::BatchLimit;

/// Drain vertices and edges from a Gremlin graph in bounded batches
#[derive(Parser, Debug)]
#[command(name = "graphdrain", version, about, long_about = None)]
pub struct Cli {
    /// Gremlin Server host
    #[arg(long)]
    pub host: String,

    /// Gremlin Server port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Endpoint path of the script API
    #[arg(long, default_value = DEFAULT_PATH)]
    pub path: String,

    /// Connect over https
    #[arg(long)]
    pub tls: bool,

    /// Username for authentication
    #[arg(short = 'u', long)]
    pub username: String,

    /// Password (prompted if not provided)
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Maximum number of elements removed per request
    #[arg(long, default_value_t = BatchLimit::DEFAULT, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: u64,

    /// Only drop elements with this label
    #[arg(long)]
    pub label: Option<String>,

    /// Only drop edges
    #[arg(long = "edge")]
    pub edges_only: bool,

    /// Detach each labelled vertex's edges in batches before dropping it
    #[arg(long = "with-super-v", alias = "with_super_v", requires = "label")]
    pub with_super_v: bool,

    /// Count what would be removed without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose logging (equivalent to --log-level debug)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

/// Log verbosity accepted by `--log-level`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["graphdrain", "--host", "gdb", "-u", "admin"]).unwrap();
        assert_eq!(cli.port, 8182);
        assert_eq!(cli.limit, 500);
        assert_eq!(cli.path, "/gremlin");
        assert!(cli.label.is_none());
        assert!(!cli.edges_only);
        assert!(!cli.with_super_v);
        assert!(cli.password.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from([
            "graphdrain", "--host", "gdb", "-u", "a", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_super_vertex_requires_label() {
        assert!(Cli::try_parse_from(["graphdrain", "--host", "gdb", "-u", "a", "--with-super-v"]).is_err());

        let cli = Cli::try_parse_from([
            "graphdrain", "--host", "gdb", "-u", "a", "--label", "Hub", "--with_super_v",
        ])
        .unwrap();
        assert!(cli.with_super_v);
        assert_eq!(cli.label.as_deref(), Some("Hub"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(Cli::try_parse_from(["graphdrain", "--host", "gdb", "-u", "a", "--limit", "0"]).is_err());
    }
}
