//! spa-router
//!
//! Command-line driver for the hash router. Loads page bundles from a
//! directory or an HTTP origin into an in-memory document.
//!
//! # Architecture Overview
//!
//! ```text
//!     navigate_to("/about")
//!            │
//!            ▼
//!     ┌────────────┐   change    ┌────────────┐   PageId   ┌──────────────┐
//!     │  Location  │────────────▶│   Router   │───────────▶│ BundleLoader │
//!     │  (#hash)   │             │  run loop  │            │  + registry  │
//!     └────────────┘             └─────┬──────┘            └──────┬───────┘
//!                                      │                          │ fetch
//!                                      │ RouteChanged             ▼
//!                                      ▼                   ┌──────────────┐
//!                                ┌────────────┐            │   Fetcher    │
//!                                │  EventBus  │            │ dir / http   │
//!                                └────────────┘            └──────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use spa_router::bundle::{fetcher, verify_bundles, BundleFetcher, BundleLayout};
use spa_router::config::{load_config, BundleSource, RouterConfig};
use spa_router::observability::{logging, metrics};
use spa_router::routing::RouteTable;
use spa_router::services::{TracingIndicator, TracingNotifier};
use spa_router::{lifecycle, Router, RouterEvent, Shutdown};

#[derive(Parser)]
#[command(name = "spa-router")]
#[command(about = "Hash router for single-page applications", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve page bundles from this directory
    #[arg(long, conflicts_with = "base_url")]
    bundles: Option<PathBuf>,

    /// Fetch page bundles from this origin
    #[arg(long)]
    base_url: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table
    Routes,
    /// Navigate to each path in order and print the outcome
    Visit {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Check that every routed page has its markup
    Verify,
    /// Read paths from stdin and navigate as they arrive
    Shell,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(root) = cli.bundles.clone() {
        config.bundles.source = BundleSource::Directory { root };
    }
    if let Some(base_url) = cli.base_url.clone() {
        config.bundles.source = BundleSource::Http { base_url };
    }
    if let Some(level) = cli.log_level.clone() {
        config.observability.log_level = level;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!(routes = config.routes.len(), source = ?config.bundles.source, "spa-router starting");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let fetcher = fetcher::from_config(&config.bundles)?;

    match cli.command {
        Commands::Routes => {
            let table = RouteTable::from_config(&config.routes);
            for (path, page) in table.entries() {
                println!("{path:<24} {page}");
            }
        }
        Commands::Visit { paths } => {
            let router = new_router(&config, fetcher);
            let mut events = router.subscribe();

            let mut steps = Vec::with_capacity(paths.len() + 1);
            steps.push(serde_json::json!({ "path": router.current_hash(), "navigation": router.resolve().await }));
            for path in &paths {
                router.navigate_to(path);
                let navigation = router.resolve().await;
                steps.push(serde_json::json!({ "path": path, "navigation": navigation }));
            }

            let mut published: Vec<RouterEvent> = Vec::new();
            while let Ok(event) = events.try_recv() {
                published.push(event);
            }

            let report = serde_json::json!({
                "steps": steps,
                "events": published,
                "current_page": router.current_page(),
                "registry": router.registry().snapshot(),
                "document": router.document(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Verify => {
            let layout = BundleLayout::new(config.bundles.pages_prefix.as_str());
            let table = RouteTable::from_config(&config.routes);
            let checks = verify_bundles(&table, fetcher.as_ref(), &layout).await;
            println!("{}", serde_json::to_string_pretty(&checks)?);

            let missing = checks.iter().filter(|c| !c.is_ok()).count();
            if missing > 0 {
                eprintln!("Error: {missing} of {} page bundles missing", checks.len());
                std::process::exit(1);
            }
        }
        Commands::Shell => {
            let router = Arc::new(new_router(&config, fetcher));
            let shutdown = Shutdown::new();

            let mut events = router.subscribe();
            tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    if let Ok(line) = serde_json::to_string(&event) {
                        println!("{line}");
                    }
                }
            });

            let run = tokio::spawn(Arc::clone(&router).run(shutdown.subscribe()));
            tokio::spawn(lifecycle::shutdown_on_ctrl_c(shutdown.clone()));

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut stop = shutdown.subscribe();
            loop {
                tokio::select! {
                    line = lines.next_line() => match line? {
                        Some(path) if !path.trim().is_empty() => router.navigate_to(path.trim()),
                        Some(_) => {}
                        None => break,
                    },
                    _ = stop.recv() => break,
                }
            }

            shutdown.trigger();
            run.await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn new_router(config: &RouterConfig, fetcher: Arc<dyn BundleFetcher>) -> Router {
    Router::new(config, fetcher)
        .with_loading_indicator(Arc::new(TracingIndicator::new()))
        .with_notifier(Arc::new(TracingNotifier))
}
