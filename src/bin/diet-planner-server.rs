// ABOUTME: Diet planner server binary
// ABOUTME: Loads configuration, initializes logging, and serves the web UI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Diet Planner Server Binary
//!
//! Starts the web UI. Configuration comes from the environment (and an
//! optional `.env` file); `--http-port` and `--host` override it.

use anyhow::Result;
use clap::Parser;
use diet_planner::{config::environment::ServerConfig, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "diet-planner-server")]
#[command(about = "Diet planner - recipe search plus generated meal plans")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let config = match ServerConfig::from_env() {
        Ok(config) => config.with_overrides(args.http_port, args.host),
        Err(e) => {
            error!("Configuration error: {e}");
            return Err(e.into());
        }
    };

    info!("Starting diet planner");
    info!("{}", config.summary());
    info!("Endpoints:");
    info!("  Form:   GET  http://{}:{}/", config.host, config.http_port);
    info!("  Plan:   POST http://{}:{}/plan", config.host, config.http_port);
    info!("  Health: GET  http://{}:{}/health", config.host, config.http_port);

    if let Err(e) = server::serve(&config).await {
        error!("Server error: {e}");
        return Err(e.into());
    }
    Ok(())
}
