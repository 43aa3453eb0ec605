/// Cluster expansion and insert ordering.
///
/// The feed's top-level incident list mixes plain leaf incidents with
/// clusters that summarize several nearby leaves through a detail list.
/// The warehouse stores only leaves, so each cycle flattens the two-level
/// hierarchy here before anything touches the sink, then sorts the result
/// so batched inserts land in a deterministic order.

use crate::model::Incident;
use log::warn;

// ---------------------------------------------------------------------------
// Cluster expansion
// ---------------------------------------------------------------------------

/// Flattens a top-level incident list into the records to persist.
///
/// Per top-level incident:
/// - a leaf (`cluster_size == 0`) is emitted unchanged;
/// - a cluster with a detail list is replaced by its detail entries, one
///   level only — detail entries are emitted as-is even if they claim a
///   cluster size of their own;
/// - a cluster without a detail list is dropped entirely. The upstream
///   feed does omit `cpoi` on non-trivial clusters, and those incidents are
///   lost for the cycle. Kept compatible with the warehouse's historical
///   contents; a warning marks each occurrence.
pub fn expand_clusters(incidents: Vec<Incident>) -> Vec<Incident> {
    let mut records = Vec::with_capacity(incidents.len());

    for incident in incidents {
        if incident.cluster_size == 0 {
            records.push(incident);
        } else if let Some(children) = incident.sub_incidents {
            records.extend(children);
        } else {
            warn!(
                "dropping cluster {} ({} incidents) with no detail list",
                incident.id, incident.cluster_size
            );
        }
    }

    records
}

// ---------------------------------------------------------------------------
// Insert ordering
// ---------------------------------------------------------------------------

/// Comparison key for insert ordering: the incident identifier, compared
/// byte-wise (ordinal, not locale-aware).
fn ordering_key(incident: &Incident) -> &[u8] {
    incident.id.as_bytes()
}

/// Sorts records ascending by identifier so each cycle's inserts are
/// deterministic.
///
/// The sort is stable and keeps duplicates: the same incident surfacing in
/// two overlapping cluster detail lists is persisted twice, by design —
/// deduplication would be a separate, explicit step.
pub fn order_records(records: &mut [Incident]) {
    records.sort_by(|a, b| ordering_key(a).cmp(ordering_key(b)));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> Incident {
        Incident {
            id: id.to_string(),
            ..Incident::default()
        }
    }

    fn cluster(id: &str, size: u32, children: Option<Vec<Incident>>) -> Incident {
        Incident {
            id: id.to_string(),
            cluster_size: size,
            sub_incidents: children,
            ..Incident::default()
        }
    }

    fn ids(records: &[Incident]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    // --- expansion ----------------------------------------------------------

    #[test]
    fn test_leaf_passes_through_unchanged() {
        let mut input = leaf("a");
        input.delay_length_m = 512;

        let records = expand_clusters(vec![input]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[0].delay_length_m, 512, "leaf fields must survive expansion");
    }

    #[test]
    fn test_cluster_is_replaced_by_its_detail_list() {
        let records = expand_clusters(vec![cluster(
            "b",
            2,
            Some(vec![leaf("c"), leaf("d")]),
        )]);

        assert_eq!(ids(&records), vec!["c", "d"], "parent must not be emitted");
    }

    #[test]
    fn test_cluster_without_detail_list_is_dropped() {
        let records = expand_clusters(vec![cluster("e", 1, None)]);
        assert!(
            records.is_empty(),
            "a non-trivial cluster with no detail list yields no records"
        );
    }

    #[test]
    fn test_expansion_is_one_level_only() {
        // A detail entry that itself claims to be a cluster is emitted
        // as-is, not re-expanded.
        let nested = cluster("inner", 2, Some(vec![leaf("x"), leaf("y")]));
        let records = expand_clusters(vec![cluster("outer", 1, Some(vec![nested]))]);

        assert_eq!(ids(&records), vec!["inner"]);
        assert!(
            records[0].sub_incidents.is_some(),
            "the nested detail list rides along unexpanded"
        );
    }

    #[test]
    fn test_mixed_input_scenario() {
        // Leaf a, cluster b → {c, d}, detail-less cluster e: flat output is
        // a, c, d with e silently dropped.
        let input = vec![
            leaf("a"),
            cluster("b", 2, Some(vec![leaf("c"), leaf("d")])),
            cluster("e", 1, None),
        ];

        let records = expand_clusters(input);

        assert_eq!(ids(&records), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_expansion_preserves_input_order() {
        let input = vec![
            cluster("k2", 2, Some(vec![leaf("z"), leaf("m")])),
            leaf("q"),
        ];
        let records = expand_clusters(input);
        assert_eq!(
            ids(&records),
            vec!["z", "m", "q"],
            "expansion itself must not reorder; ordering is a separate step"
        );
    }

    // --- ordering -----------------------------------------------------------

    #[test]
    fn test_order_is_ascending_by_id() {
        let mut records = vec![leaf("m"), leaf("a"), leaf("z"), leaf("k")];
        order_records(&mut records);
        assert_eq!(ids(&records), vec!["a", "k", "m", "z"]);
    }

    #[test]
    fn test_order_is_ordinal_not_case_insensitive() {
        // Byte-wise: every uppercase letter sorts before every lowercase one.
        let mut records = vec![leaf("apple"), leaf("Zebra")];
        order_records(&mut records);
        assert_eq!(ids(&records), vec!["Zebra", "apple"]);
    }

    #[test]
    fn test_order_keeps_duplicate_ids_stably() {
        let mut first = leaf("dup");
        first.delay_time_s = 1;
        let mut second = leaf("dup");
        second.delay_time_s = 2;

        let mut records = vec![leaf("x"), first, second];
        order_records(&mut records);

        assert_eq!(ids(&records), vec!["dup", "dup", "x"], "no deduplication");
        assert_eq!(
            (records[0].delay_time_s, records[1].delay_time_s),
            (1, 2),
            "equal ids must keep their relative order"
        );
    }

    #[test]
    fn test_expand_then_order_end_to_end() {
        let input = vec![
            leaf("t"),
            cluster("b", 2, Some(vec![leaf("f"), leaf("c")])),
            cluster("e", 3, None),
        ];

        let mut records = expand_clusters(input);
        order_records(&mut records);

        assert_eq!(ids(&records), vec!["c", "f", "t"]);
        assert!(
            records.windows(2).all(|w| w[0].id <= w[1].id),
            "output must be non-decreasing by id"
        );
    }
}
