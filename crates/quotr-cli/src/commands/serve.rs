//! Serve command - run the HTTP API.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use crate::server::{self, AppState};

use super::{build_extractor, load_config, load_working_set};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Bind address (default: configured host)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (default: configured port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Dataset file (default: configured dataset, else bundled sample)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Seconds to wait for the model on each extraction
    #[arg(short, long)]
    timeout: Option<u64>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let quotations = load_working_set(&config, args.dataset.as_deref())?;
    let extractor = build_extractor(&config, args.timeout)?;

    if std::env::var(&config.gateway.api_key_env).is_err() {
        eprintln!(
            "{} {} is not set; extraction requests will fail until it is.",
            style("⚠").yellow(),
            config.gateway.api_key_env
        );
    }

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    info!(
        "Serving {} quotations, extracting with {}",
        quotations.len(),
        extractor.model_name()
    );
    eprintln!("{} Listening on http://{}", style("✓").green(), addr);

    let state = AppState::new(quotations, extractor, config.dataset.page_size);
    server::start_server(&addr, state).await
}
