/// Per-cycle warehouse writer.
///
/// Opens one scoped sink connection per cycle, prepares the insert once,
/// and appends one row per flattened record. The projected positions are
/// converted to WGS84 here — nothing upstream sees geographic coordinates.
///
/// Inserts are not individually isolated: a failure partway through a cycle
/// abandons the remaining rows, and rows already written stay. The daemon
/// logs the failure and the next cycle starts from a fresh snapshot.

use crate::db;
use crate::mercator;
use crate::model::{Incident, ScrapeError};
use chrono::{DateTime, TimeZone, Utc};

/// One row per flattened incident. The camelCase columns predate this
/// service and are quoted to match the deployed schema.
const INSERT_TRAFFIC: &str = "INSERT INTO traffic \
     (request_time, jam_id, description, jam_type, severity, latitude, longitude, \
      starting, ending, road, \"delayLength\", \"delayTime\", cause) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)";

/// Converts the feed timestamp (unix epoch milliseconds in a decimal
/// string) to the calendar timestamp stored in `request_time`.
pub fn request_time_from_millis(timestamp_ms: &str) -> Result<DateTime<Utc>, ScrapeError> {
    let millis: i64 = timestamp_ms.trim().parse().map_err(|_| {
        ScrapeError::Parse(format!(
            "feed timestamp is not unix milliseconds: {:?}",
            timestamp_ms
        ))
    })?;

    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ScrapeError::Parse(format!("feed timestamp out of range: {}", millis)))
}

/// Writes one cycle's records to the warehouse.
///
/// The connection is opened here and owned by this scope, so it is released
/// on every exit path — success, a failed insert, or an unreachable sink.
/// The cycle timestamp is converted once and reused for every row.
///
/// # Errors
/// `ScrapeError::Parse` — unusable cycle timestamp (checked before the
/// connection is opened).
/// `ScrapeError::Database` — connection or insert failure; rows written
/// before the failure remain.
pub fn persist_cycle(timestamp_ms: &str, records: &[Incident]) -> Result<usize, ScrapeError> {
    let request_time = request_time_from_millis(timestamp_ms)?;

    let mut client =
        db::connect_with_validation().map_err(|e| ScrapeError::Database(e.to_string()))?;

    let insert = client.prepare(INSERT_TRAFFIC)?;

    let mut written = 0;
    for record in records {
        let latitude = mercator::y_to_lat(record.position.y);
        let longitude = mercator::x_to_lon(record.position.x);

        client.execute(
            &insert,
            &[
                &request_time,
                &record.id,
                &record.description,
                &record.kind.code(),
                &record.severity.code(),
                &latitude,
                &longitude,
                &record.from_road,
                &record.to_road,
                &record.road,
                &record.delay_length_m,
                &record.delay_time_s,
                &record.cause,
            ],
        )?;

        written += 1;
    }

    Ok(written)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_time_known_value() {
        let dt = request_time_from_millis("1000000000000").expect("should parse");
        assert_eq!(dt.to_rfc3339(), "2001-09-09T01:46:40+00:00");
    }

    #[test]
    fn test_request_time_keeps_millisecond_precision() {
        let dt = request_time_from_millis("1357854878123").expect("should parse");
        assert_eq!(dt.timestamp_millis(), 1_357_854_878_123);
    }

    #[test]
    fn test_request_time_epoch() {
        let dt = request_time_from_millis("0").expect("should parse");
        assert_eq!(dt.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_request_time_tolerates_surrounding_whitespace() {
        assert!(request_time_from_millis(" 1000000000000 ").is_ok());
    }

    #[test]
    fn test_request_time_rejects_non_numeric() {
        for bad in ["", "not-a-number", "1357854878000.5", "12h"] {
            let result = request_time_from_millis(bad);
            assert!(
                matches!(result, Err(ScrapeError::Parse(_))),
                "{:?} should be a parse error, got {:?}",
                bad,
                result
            );
        }
    }
}
