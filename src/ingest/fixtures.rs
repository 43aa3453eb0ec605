/// Test fixtures: representative JSON payloads from the live-traffic API.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parser. They reflect the real envelope returned
/// by the LBS traffic tile endpoint (JSON rendering, EPSG:900913
/// projection, expandCluster=true).
///
/// Traffic response shape:
///   response.tm
///     ."@id"     — snapshot time as unix epoch milliseconds, in a STRING,
///                  under a reserved-character key
///     .poi[]     — may be null/absent for an incident-free region
///       .id      — incident identifier
///       .p       — position {x, y}, spherical Web Mercator meters
///       .ic      — incident kind code
///       .ty      — severity code
///       .cbl/.ctr — cluster bounding corners
///       .cs      — clustered leaf count; 0 for a leaf
///       .cpoi[]  — cluster detail list; can be absent even when cs > 0
///       .d/.f/.t/.r/.c — description, from, to, road, cause
///       .l/.dl   — delay length (meters) / delay duration (seconds)
///
/// Note: the timestamp is a decimal string even though it represents a
/// number, and cluster summaries omit most leaf fields. Parsers must handle
/// both.

/// One snapshot over the Toronto box with all three top-level shapes: a
/// plain leaf, a two-leaf cluster carrying its detail list, and a cluster
/// the feed left without one (cs = 3, no cpoi).
#[cfg(test)]
pub(crate) fn fixture_toronto_mixed_json() -> &'static str {
    r#"{
      "tm": {
        "@id": "1357854878000",
        "poi": [
          {
            "id": "CLUSTER_TRAFFIC_DEADLOCK-401-1",
            "p": { "x": -8850571.2, "y": 5421294.8 },
            "ic": 6,
            "ty": 3,
            "cbl": { "x": -8851002.5, "y": 5420880.1 },
            "ctr": { "x": -8850120.9, "y": 5421700.4 },
            "cs": 0,
            "d": "stationary traffic for 2 miles",
            "f": "Keele St",
            "t": "Yonge St",
            "r": "Hwy 401",
            "l": 3200,
            "dl": 930,
            "c": "accident"
          },
          {
            "id": "CLUSTER_DOWNTOWN-7",
            "p": { "x": -8838512.0, "y": 5410968.3 },
            "ic": 13,
            "ty": 1,
            "cbl": { "x": -8840233.7, "y": 5409122.6 },
            "ctr": { "x": -8836901.4, "y": 5412490.0 },
            "cs": 2,
            "cpoi": [
              {
                "id": "TRAFFIC_GARDINER-3",
                "p": { "x": -8839410.5, "y": 5409880.2 },
                "ic": 7,
                "ty": 1,
                "cs": 0,
                "d": "roadwork, right lane closed",
                "r": "Gardiner Expy",
                "l": 800,
                "dl": 240
              },
              {
                "id": "TRAFFIC_LAKESHORE-9",
                "p": { "x": -8837755.1, "y": 5410412.7 },
                "ic": 8,
                "ty": 2,
                "cs": 0,
                "d": "accident",
                "r": "Lake Shore Blvd",
                "l": 1100,
                "dl": 360,
                "c": "collision"
              }
            ]
          },
          {
            "id": "CLUSTER_EAST_END-2",
            "p": { "x": -8820144.9, "y": 5415733.0 },
            "ic": 13,
            "ty": 0,
            "cbl": { "x": -8822400.0, "y": 5414100.5 },
            "ctr": { "x": -8818655.2, "y": 5417019.8 },
            "cs": 3
          }
        ]
      }
    }"#
}

/// An incident-free region: the feed returns a null `poi` list. This is a
/// valid empty cycle, not an error.
#[cfg(test)]
pub(crate) fn fixture_null_poi_json() -> &'static str {
    r#"{
      "tm": {
        "@id": "1357854878000",
        "poi": null
      }
    }"#
}
