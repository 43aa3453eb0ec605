/// trafmon_service: live-traffic incident warehousing service.
///
/// # Module structure
///
/// ```text
/// trafmon_service
/// ├── model    — shared data types (TrafficSnapshot, Incident, ScrapeError, …)
/// ├── config   — deployment configuration loader (scraper.toml)
/// ├── mercator — spherical Web Mercator ↔ WGS84 conversions
/// ├── ingest
/// │   ├── tomtom   — traffic tile API: URL construction + JSON parsing
/// │   └── fixtures (test only) — representative API response payloads
/// ├── flatten  — cluster expansion and deterministic insert ordering
/// ├── db       — sink connectivity and startup validation
/// ├── persist  — per-cycle warehouse writer
/// └── daemon   — poll loop (cycle orchestration, fixed-interval delay)
/// ```

/// Public modules
pub mod config;
pub mod daemon;
pub mod db;
pub mod flatten;
pub mod ingest;
pub mod mercator;
pub mod model;
pub mod persist;
