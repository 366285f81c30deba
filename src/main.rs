use crate::config::AppConfig;
use crate::fetch::HttpFetcher;
use crate::responses::error_to_response;
use crate::router::{handle, is_api_path};
use crate::state::AppState;
use anyhow::{Context, Result};
use astra::Server;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

mod config;
mod domain;
mod errors;
mod fetch;
mod geocode;
mod lookup;
mod parcels;
mod probe;
mod registry;
mod responses;
mod router;
mod state;
mod templates;

#[cfg(test)]
mod tests;

/// Look up Pennsylvania property parcels by street address
#[derive(Parser, Debug)]
#[command(name = "parcel-lookup")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (defaults to ./parcel-lookup.toml when present)
    #[arg(long, env = "PARCEL_LOOKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overrides `bind` in the config file
    #[arg(long, env = "BIND_ADDR")]
    bind: Option<String>,

    /// Number of request worker threads, overrides `workers` in the config file
    #[arg(long)]
    workers: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let fetcher = HttpFetcher::new(&config.user_agent).context("Failed to create HTTP client")?;
    let state = AppState::from_config(&config, Arc::new(fetcher)).context("Invalid configuration")?;

    let names = state.registry().names();
    let counties = if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    };
    info!(
        %counties,
        fallback = ?config.fallback,
        demo_mode = ?config.demo_mode,
        regrid_token = config.regrid.token().is_some(),
        "configuration loaded"
    );

    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {:?}", config.bind))?;
    info!("Starting server at http://{addr}");

    let state = Arc::new(state);
    let server = Server::bind(&addr).max_workers(config.workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        let resp = match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err, is_api_path(&path)),
        };

        info!(
            %method,
            %path,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );
        resp
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        return Err(e.into());
    }

    info!("Server shut down cleanly.");
    Ok(())
}
