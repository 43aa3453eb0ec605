/// TomTom live-traffic tile API client.
///
/// Handles URL construction and JSON response parsing for the LBS traffic
/// endpoint:
///   http://www.tomtom.com/livetraffic/lbs/services/traffic/tm/
///
/// The request path embeds a bounding box in spherical Web Mercator, so the
/// configured WGS84 corners are projected here via `mercator`. The response
/// nests cluster detail lists one level deep; see `fixtures.rs` for
/// annotated examples of the structure.
///
/// One wire irregularity: the snapshot timestamp arrives under the reserved
/// key `@id`. That is handled with a field rename on `TrafficSnapshot` at
/// the schema binding — the response text is never rewritten.

use crate::config::{RegionConfig, ServiceConfig};
use crate::mercator;
use crate::model::{Incident, ScrapeError, TrafficSnapshot};
use serde::Deserialize;

const TRAFFIC_BASE_URL: &str = "http://www.tomtom.com/livetraffic/lbs/services/traffic/tm/1";

/// Proxy deployments front the service on this port.
const PROXY_PORT: u16 = 8080;

// ---------------------------------------------------------------------------
// Serde structure for the response envelope
// ---------------------------------------------------------------------------

/// The feed wraps the snapshot in a root `tm` object.
#[derive(Deserialize)]
struct TrafficEnvelope {
    tm: TrafficSnapshot,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the bounded-box traffic request URL for the configured region and
/// zoom level.
///
/// Path order is lower-left y, lower-left x, upper-right y, upper-right x
/// (projected meters), then the zoom level and API key. The trailing style
/// parameters are fixed; `expandCluster=true` asks the service to attach
/// cluster detail lists.
pub fn build_traffic_url(region: &RegionConfig, service: &ServiceConfig) -> String {
    format!(
        "{}/{},{},{},{}/{}/0,0,0,0/0/json/{};projection=EPSG900913;language=en;style=s3;expandCluster=true",
        TRAFFIC_BASE_URL,
        mercator::lat_to_y(region.lower_left_latitude),
        mercator::lon_to_x(region.lower_left_longitude),
        mercator::lat_to_y(region.upper_right_latitude),
        mercator::lon_to_x(region.upper_right_longitude),
        service.zoom,
        service.api_key,
    )
}

// ---------------------------------------------------------------------------
// HTTP client and fetch
// ---------------------------------------------------------------------------

/// Builds the shared blocking HTTP client, routed through the configured
/// proxy when one is set. Built once at startup; every cycle reuses it.
pub fn build_http_client(service: &ServiceConfig) -> Result<reqwest::blocking::Client, ScrapeError> {
    let mut builder = reqwest::blocking::Client::builder();

    if let Some(host) = &service.proxy_host {
        let proxy = reqwest::Proxy::all(format!("http://{}:{}", host, PROXY_PORT))?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// Issues the bounded-box request and returns the raw response body.
///
/// # Errors
/// `ScrapeError::Network` — transport failure or a non-success status.
pub fn fetch_traffic(
    client: &reqwest::blocking::Client,
    region: &RegionConfig,
    service: &ServiceConfig,
) -> Result<String, ScrapeError> {
    let url = build_traffic_url(region, service);

    let response = client.get(&url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Network(format!(
            "traffic service returned {}",
            status
        )));
    }

    Ok(response.text()?)
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a traffic response body into a `TrafficSnapshot`.
///
/// A response whose `poi` list is null or absent parses successfully with
/// `incidents: None` — the feed reports an incident-free region that way,
/// and the cycle treats it as valid and empty.
///
/// # Errors
/// `ScrapeError::Parse` — malformed JSON, a missing required field, or an
/// incident (at any nesting level) with an empty id.
pub fn parse_traffic_response(body: &str) -> Result<TrafficSnapshot, ScrapeError> {
    let envelope: TrafficEnvelope = serde_json::from_str(body)
        .map_err(|e| ScrapeError::Parse(format!("traffic JSON deserialization failed: {}", e)))?;

    let snapshot = envelope.tm;

    // Identifiers key the warehouse rows and the insert ordering; an empty
    // one is treated the same as an absent field.
    if let Some(incidents) = &snapshot.incidents {
        check_ids(incidents)?;
    }

    Ok(snapshot)
}

fn check_ids(incidents: &[Incident]) -> Result<(), ScrapeError> {
    for incident in incidents {
        if incident.id.is_empty() {
            return Err(ScrapeError::Parse(
                "incident with empty id in response".to_string(),
            ));
        }
        if let Some(children) = &incident.sub_incidents {
            check_ids(children)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
