// ABOUTME: Server binary for the digital twin scenario and flood alert API
// ABOUTME: Loads configuration and datasets, then serves HTTP until interrupted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Digital Twin Server Binary
//!
//! Starts the HTTP API. Configuration comes from the environment; the port
//! and dataset paths can be overridden on the command line.

use anyhow::Result;
use clap::Parser;
use digital_twin_server::config::ServerConfig;
use digital_twin_server::logging;
use digital_twin_server::resources::ServerResources;
use digital_twin_server::server;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "digital-twin-server")]
#[command(about = "Digital twin API - what-if scenario impact and rainfall flood alerts")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the hotspot GeoJSON path
    #[arg(long)]
    hotspots: Option<PathBuf>,

    /// Override the road network JSON path
    #[arg(long)]
    road_network: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(path) = args.hotspots {
        config.datasets.hotspots_path = path;
    }
    if let Some(path) = args.road_network {
        config.datasets.road_network_path = path;
    }

    logging::init_from_env()?;

    info!("Starting digital twin server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config));
    if resources.datasets.hotspots.is_none() {
        info!("Flood alert endpoints will answer 503 until a hotspot dataset is provided");
    }
    if resources.datasets.network.is_none() {
        info!("Scenario traffic impact will use the length heuristic");
    }

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    info!("Server stopped");
    Ok(())
}
