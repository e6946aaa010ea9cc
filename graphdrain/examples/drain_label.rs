//! Drain every vertex carrying a label from a Gremlin Server
//!
//! Run with:
//! GDB_HOST=localhost GDB_USER=admin GDB_PASSWORD=secret \
//!     cargo run --example drain_label -- Temp

use graphdrain::{
    BatchLimit, DeletionScope, DrainEngine, DrainRequest, ElementKind, Error, GremlinClient,
    LogReporter, ServerConfig,
};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let label = std::env::args()
        .nth(1)
        .ok_or_else(|| Error::InvalidArgument("usage: drain_label <label>".to_string()))?;

    let config = ServerConfig::new(
        std::env::var("GDB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        std::env::var("GDB_USER").unwrap_or_else(|_| "admin".to_string()),
        std::env::var("GDB_PASSWORD").unwrap_or_default(),
    );
    let client = GremlinClient::connect(&config)?;
    let mut engine = DrainEngine::new(client, LogReporter);

    // Edges first so the vertex batches stay cheap
    for kind in [ElementKind::Edge, ElementKind::Vertex] {
        let scope = DeletionScope::ByLabel(label.clone());
        let request = DrainRequest::new(kind, scope, BatchLimit::default());
        let outcome = engine.drain(&request)?;
        println!("{} with label {}: {} removed", kind, label, outcome.removed);
    }

    Ok(())
}
