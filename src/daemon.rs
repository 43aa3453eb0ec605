/// Poll-cycle orchestration.
///
/// One cycle is fetch → parse → expand → order → persist, expressed as a
/// plain function over immutable configuration. The outer driver runs
/// cycles forever, strictly one at a time: every error is caught at the
/// cycle boundary, logged, and followed by the same fixed delay a
/// successful or empty cycle gets. There is no backoff, no jitter, and no
/// cancellation signal beyond process termination.

use crate::config::ScraperConfig;
use crate::flatten;
use crate::ingest::tomtom;
use crate::model::ScrapeError;
use crate::persist;
use log::{error, info};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// How one completed poll cycle ended.
#[derive(Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Incidents were decoded and this many rows were written.
    Persisted(usize),
    /// The feed returned no incident list; nothing was written.
    Empty,
}

/// Runs one complete poll cycle.
///
/// An empty cycle (feed returned no incident list) short-circuits before
/// any sink work. Otherwise the sink connection lives inside
/// `persist_cycle`, so it is released before this function returns on every
/// path.
pub fn run_cycle(
    config: &ScraperConfig,
    http: &reqwest::blocking::Client,
) -> Result<CycleOutcome, ScrapeError> {
    let body = tomtom::fetch_traffic(http, &config.region, &config.service)?;
    let snapshot = tomtom::parse_traffic_response(&body)?;

    let Some(incidents) = snapshot.incidents else {
        return Ok(CycleOutcome::Empty);
    };

    let mut records = flatten::expand_clusters(incidents);
    flatten::order_records(&mut records);

    let written = persist::persist_cycle(&snapshot.timestamp_ms, &records)?;

    Ok(CycleOutcome::Persisted(written))
}

// ---------------------------------------------------------------------------
// Driver loop
// ---------------------------------------------------------------------------

/// Wall-clock abstraction so the inter-cycle delay is testable without real
/// time.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

/// Production clock: blocks the polling thread.
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Closes out one driver iteration: logs the cycle result, then holds for
/// the fixed interval. Split from `run` so the delay policy is testable
/// with a fake clock and a canned cycle result.
pub fn finish_cycle(
    result: Result<CycleOutcome, ScrapeError>,
    interval: Duration,
    clock: &impl Clock,
) {
    match result {
        Ok(CycleOutcome::Persisted(rows)) => info!("cycle complete: {} rows written", rows),
        Ok(CycleOutcome::Empty) => info!("cycle complete: feed returned no incident list"),
        Err(e) => error!("cycle failed: {}", e),
    }

    clock.sleep(interval);
}

/// Main daemon loop (runs indefinitely).
pub fn run(config: &ScraperConfig, http: &reqwest::blocking::Client) -> ! {
    let interval = config.service.poll_interval();
    let clock = SystemClock;

    loop {
        finish_cycle(run_cycle(config, http), interval, &clock);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
