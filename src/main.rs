use anyhow::Context;
use clap::Parser;
use routefinder::{load_graph, RestApi};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Shortest-path and closest-vertex server for a coordinate graph
#[derive(Parser, Debug)]
#[command(name = "routefinder")]
#[command(about = "Shortest paths over a Euclidean coordinate graph", long_about = None)]
struct Args {
    /// Path to the JSON graph description
    #[arg(short, long, default_value = "./data/graph_example.json")]
    graph: PathBuf,

    /// Address to bind the HTTP API to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .with_context(|| format!("invalid log level {:?}", args.log_level))?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting routefinder v{}", env!("CARGO_PKG_VERSION"));
    info!("Graph description: {:?}", args.graph);

    let (description, graph) = load_graph(&args.graph)
        .with_context(|| format!("failed to load graph from {:?}", args.graph))?;
    info!(
        "Graph loaded: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );
    let description = Arc::new(description);

    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", host, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(description, host, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
