//! Interactive terminal client for the task server
//!
//! Plays the role the browser UI plays in front of the same API: one
//! process, one session cookie, one store.

mod repl;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use td_core::api::{HttpConfig, HttpTaskApi};
use td_core::store::ClientTaskStore;

/// Terminal front-end for the task-management server
#[derive(Debug, Parser)]
#[command(name = "td", version, about)]
struct Cli {
    /// Server origin, e.g. http://127.0.0.1:18080 (defaults to $TD_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "td_core=info,td_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let base_url = cli.base_url.unwrap_or_else(|| {
        std::env::var("TD_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:18080".to_string())
    });

    tracing::info!("Using server {}", base_url);

    let api = HttpTaskApi::new(HttpConfig {
        base_url,
        timeout: Duration::from_secs(cli.timeout_secs),
    })?;
    let store = ClientTaskStore::new(Arc::new(api));

    repl::run(store).await
}
