/// Shared data types for the traffic scraper.
///
/// Everything here is cycle-scoped: a `TrafficSnapshot` and its incidents
/// are built fresh from each poll response and discarded once the cycle's
/// rows are written (or the cycle fails). Nothing in this module survives
/// across cycles.

use serde::Deserialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A position in the spherical Web Mercator plane (EPSG:900913), as reported
/// by the tile service. Converted to WGS84 latitude/longitude only at the
/// warehouse boundary — see `mercator` and `persist`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Feed classification codes
// ---------------------------------------------------------------------------

/// Incident classification, from the feed's `ic` code.
///
/// The code space is open: the service has shipped codes with no published
/// meaning before (1 and 13 below). Codes outside the known set are carried
/// through `Unlisted` so they reach the warehouse unchanged rather than
/// failing the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i32")]
pub enum IncidentKind {
    Unknown1,
    AccidentCleared,
    TrafficJam,
    Roadwork,
    Accident,
    LongTermRoadwork,
    Unknown13,
    /// A code not yet observed in feed captures.
    Unlisted(i32),
}

impl IncidentKind {
    /// The feed's numeric code for this kind, as stored in `jam_type`.
    pub fn code(self) -> i32 {
        match self {
            IncidentKind::Unknown1 => 1,
            IncidentKind::AccidentCleared => 3,
            IncidentKind::TrafficJam => 6,
            IncidentKind::Roadwork => 7,
            IncidentKind::Accident => 8,
            IncidentKind::LongTermRoadwork => 9,
            IncidentKind::Unknown13 => 13,
            IncidentKind::Unlisted(code) => code,
        }
    }
}

impl From<i32> for IncidentKind {
    fn from(code: i32) -> Self {
        match code {
            1 => IncidentKind::Unknown1,
            3 => IncidentKind::AccidentCleared,
            6 => IncidentKind::TrafficJam,
            7 => IncidentKind::Roadwork,
            8 => IncidentKind::Accident,
            9 => IncidentKind::LongTermRoadwork,
            13 => IncidentKind::Unknown13,
            other => IncidentKind::Unlisted(other),
        }
    }
}

impl Default for IncidentKind {
    /// Cluster summaries and sparse detail entries omit `ic`; the feed's
    /// implied value is code 0.
    fn default() -> Self {
        IncidentKind::Unlisted(0)
    }
}

/// Delay severity, from the feed's `ty` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i32")]
pub enum Severity {
    NoDelay,
    SlowTraffic,
    QueuingTraffic,
    StationaryTraffic,
    Closed,
    /// A code not yet observed in feed captures.
    Unlisted(i32),
}

impl Severity {
    /// The feed's numeric code for this severity, as stored in `severity`.
    pub fn code(self) -> i32 {
        match self {
            Severity::NoDelay => 0,
            Severity::SlowTraffic => 1,
            Severity::QueuingTraffic => 2,
            Severity::StationaryTraffic => 3,
            Severity::Closed => 4,
            Severity::Unlisted(code) => code,
        }
    }
}

impl From<i32> for Severity {
    fn from(code: i32) -> Self {
        match code {
            0 => Severity::NoDelay,
            1 => Severity::SlowTraffic,
            2 => Severity::QueuingTraffic,
            3 => Severity::StationaryTraffic,
            4 => Severity::Closed,
            other => Severity::Unlisted(other),
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::NoDelay
    }
}

// ---------------------------------------------------------------------------
// Incidents
// ---------------------------------------------------------------------------

/// One traffic incident from the feed: either a leaf event (jam, accident,
/// roadwork) or a cluster summarizing nearby events through `sub_incidents`.
///
/// The feed omits most fields on cluster summaries and on sparse detail
/// entries, so everything except `id` defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Incident {
    /// Unique per leaf within a response. Incidents can reappear across
    /// polls (and across overlapping cluster detail lists) under the same id.
    pub id: String,

    /// Incident position, projected.
    #[serde(default, rename = "p")]
    pub position: ProjectedPoint,

    #[serde(default, rename = "ic")]
    pub kind: IncidentKind,

    #[serde(default, rename = "ty")]
    pub severity: Severity,

    /// Bounding corners of the cluster this incident summarizes.
    #[serde(default, rename = "cbl")]
    pub cluster_bottom_left: ProjectedPoint,
    #[serde(default, rename = "ctr")]
    pub cluster_top_right: ProjectedPoint,

    /// Number of clustered leaf incidents; 0 for a leaf.
    #[serde(default, rename = "cs")]
    pub cluster_size: u32,

    /// Detail list for a cluster. The feed can leave this out even when
    /// `cluster_size > 0`.
    #[serde(default, rename = "cpoi")]
    pub sub_incidents: Option<Vec<Incident>>,

    #[serde(default, rename = "d")]
    pub description: Option<String>,

    /// Where the jam starts.
    #[serde(default, rename = "f")]
    pub from_road: Option<String>,

    /// Where the jam ends.
    #[serde(default, rename = "t")]
    pub to_road: Option<String>,

    #[serde(default, rename = "r")]
    pub road: Option<String>,

    /// Delay length in meters.
    #[serde(default, rename = "l")]
    pub delay_length_m: i64,

    /// Delay duration in seconds.
    #[serde(default, rename = "dl")]
    pub delay_time_s: i64,

    #[serde(default, rename = "c")]
    pub cause: Option<String>,
}

/// One decoded poll response: the service timestamp plus the top-level
/// incident list.
///
/// `incidents` is `None` when the feed returned no `poi` list at all, which
/// is a valid empty cycle rather than an error.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficSnapshot {
    /// Feed timestamp: unix epoch milliseconds as a decimal string. The wire
    /// key is the reserved identifier `@id`, mapped here at the schema
    /// binding rather than by rewriting the response text.
    #[serde(rename = "@id")]
    pub timestamp_ms: String,

    #[serde(default, rename = "poi")]
    pub incidents: Option<Vec<Incident>>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can end a poll cycle early. Each variant carries the
/// underlying message; the daemon logs it and sleeps out the interval.
#[derive(Debug)]
pub enum ScrapeError {
    /// Request construction, transport failure, or a non-success status.
    Network(String),
    /// Malformed JSON or a required field missing from the response.
    Parse(String),
    /// Sink connection or insert failure.
    Database(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Network(msg) => write!(f, "network error: {}", msg),
            ScrapeError::Parse(msg) => write!(f, "parse error: {}", msg),
            ScrapeError::Database(msg) => write!(f, "database error: {}", msg),
        }
    }
}

impl std::error::Error for ScrapeError {}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        ScrapeError::Network(e.to_string())
    }
}

impl From<postgres::Error> for ScrapeError {
    fn from(e: postgres::Error) -> Self {
        ScrapeError::Database(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
