//! Traffic Scraper - Main Daemon
//!
//! A server-side daemon that continuously:
//! 1. Polls the live-traffic tile service for one fixed region
//! 2. Flattens incident clusters into leaf records
//! 3. Appends the records to the PostgreSQL traffic warehouse
//!
//! One cycle every two minutes, forever; failures cost one cycle and are
//! visible only as log lines.
//!
//! Usage:
//!   cargo run --release
//!
//! Environment:
//!   DATABASE_URL - PostgreSQL connection string
//!   RUST_LOG     - log filter (defaults to info)

use log::info;
use std::process;
use trafmon_service::config;
use trafmon_service::daemon;
use trafmon_service::db;
use trafmon_service::ingest::tomtom;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load_config();
    info!(
        "polling zoom {} over ({}, {}) .. ({}, {})",
        config.service.zoom,
        config.region.lower_left_latitude,
        config.region.lower_left_longitude,
        config.region.upper_right_latitude,
        config.region.upper_right_longitude,
    );

    // The sink must be reachable before the loop starts; once running, a
    // database outage costs cycles, not the process.
    if let Err(e) = db::connect_and_verify() {
        eprintln!("Database validation failed: {}", e);
        process::exit(1);
    }
    info!("database validated");

    let http = match tomtom::build_http_client(&config.service) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("HTTP client construction failed: {}", e);
            process::exit(1);
        }
    };
    match &config.service.proxy_host {
        Some(host) => info!("requests routed through proxy {}:8080", host),
        None => info!("requests going direct (no proxy configured)"),
    }

    info!(
        "starting poll loop: one cycle every {}s",
        config.service.poll_interval_secs
    );
    daemon::run(&config, &http);
}
