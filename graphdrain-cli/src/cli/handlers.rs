// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for GraphDrain

use colored::Colorize;
use graphdrain::{BatchLimit, DrainEngine, DrainMode, GremlinClient, ServerConfig};
use std::time::{Duration, Instant};

use super::commands::Cli;
use super::output::{ConsoleReporter, SummaryFormatter};

/// Run the drain selected by the command line
///
/// Exactly one mode runs to completion. Any executor failure is returned
/// as-is so the process exits non-zero with the server's diagnostic.
pub fn handle_drain(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let limit = BatchLimit::new(cli.limit)?;
    let mode = DrainMode::from_options(cli.label.clone(), cli.edges_only, cli.with_super_v);
    let config = server_config(&cli)?;

    let client = GremlinClient::connect(&config)?;
    println!(
        "{}",
        format!("Connected to {} as {}", client.endpoint(), config.username).cyan()
    );
    println!("Mode: {}, batch limit: {}", mode, limit);

    let mut engine = DrainEngine::new(client, ConsoleReporter::stdout());

    if cli.dry_run {
        let counts = engine.survey(&mode)?;
        println!("\n{}", SummaryFormatter::survey(&counts));
        return Ok(());
    }

    let started = Instant::now();
    let outcomes = engine.run(&mode, limit)?;
    println!(
        "\n{}",
        SummaryFormatter::outcomes(&outcomes, started.elapsed())
    );
    Ok(())
}

/// Build the server configuration, prompting for a password if needed
fn server_config(cli: &Cli) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let password = match &cli.password {
        Some(pwd) => pwd.clone(),
        None => {
            print!("Password for {}: ", cli.username);
            std::io::Write::flush(&mut std::io::stdout())?;
            rpassword::read_password()?
        }
    };

    let mut config = ServerConfig::new(cli.host.clone(), cli.username.clone(), password);
    config.port = cli.port;
    config.path = cli.path.clone();
    config.tls = cli.tls;
    config.timeout = cli.timeout.map(Duration::from_secs);
    Ok(config)
}
