//! Construction of KairosDB query documents for check history.

use crate::models::{
    Aggregator, AggregatorBlock, GroupBy, MetricBlock, QueryRequest, RelativeTime, Sampling,
    TagFilter, TimeWindow,
};

/// Check results are stored under `zmon.check.<check_id>`.
pub const CHECK_METRIC_PREFIX: &str = "zmon.check.";

/// Grouping tag for per-entity series.
const GROUP_BY_TAG: &str = "key";

pub const DEFAULT_SAMPLING_SECONDS: i64 = 300;

/// Builds the query document for one check over a relative time window.
///
/// The document always carries a single metric block filtered by the `entity`
/// tag (an empty `entities` slice matches everything stored for the check),
/// grouped by the `key` tag, with one aligned-sampling aggregator.
/// `cache_time` is fixed at 0 so the backend never serves a stale answer.
pub fn build_query(
    check_id: &str,
    entities: &[String],
    window: TimeWindow,
    aggregator: Aggregator,
    sampling_seconds: i64,
) -> QueryRequest {
    QueryRequest {
        metrics: vec![MetricBlock {
            name: format!("{}{}", CHECK_METRIC_PREFIX, check_id),
            tags: TagFilter {
                entity: entities.to_vec(),
            },
            group_by: vec![GroupBy {
                name: "tag".to_string(),
                tags: vec![GROUP_BY_TAG.to_string()],
            }],
            aggregators: vec![AggregatorBlock {
                name: aggregator,
                align_sampling: true,
                sampling: Sampling::seconds(sampling_seconds),
            }],
        }],
        cache_time: 0,
        start_relative: RelativeTime::seconds_ago(window.from_seconds_ago),
        end_relative: RelativeTime::seconds_ago(window.to_seconds_ago),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn metric_name_is_prefixed_check_id() {
        for check_id in ["17", "some-check", ""] {
            let query = build_query(
                check_id,
                &[],
                TimeWindow::default(),
                Aggregator::Avg,
                DEFAULT_SAMPLING_SECONDS,
            );
            assert_eq!(query.metrics[0].name, format!("zmon.check.{}", check_id));
        }
    }

    #[test]
    fn entity_list_becomes_tag_filter() {
        let query = build_query(
            "1",
            &entities(&["GLOBAL", "host-a"]),
            TimeWindow::default(),
            Aggregator::Avg,
            DEFAULT_SAMPLING_SECONDS,
        );
        assert_eq!(query.metrics[0].tags.entity, entities(&["GLOBAL", "host-a"]));

        let query = build_query(
            "1",
            &[],
            TimeWindow::default(),
            Aggregator::Avg,
            DEFAULT_SAMPLING_SECONDS,
        );
        assert_eq!(query.metrics[0].tags.entity, Vec::<String>::new());
    }

    #[test]
    fn wire_document_shape() {
        let query = build_query(
            "42",
            &entities(&["GLOBAL"]),
            TimeWindow::new(900, 600),
            Aggregator::Dev,
            300,
        );
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "metrics": [
                    {
                        "name": "zmon.check.42",
                        "tags": {"entity": ["GLOBAL"]},
                        "group_by": [{"name": "tag", "tags": ["key"]}],
                        "aggregators": [
                            {
                                "name": "dev",
                                "align_sampling": true,
                                "sampling": {"value": 300, "unit": "seconds"}
                            }
                        ]
                    }
                ],
                "cache_time": 0,
                "start_relative": {"value": 900, "unit": "seconds"},
                "end_relative": {"value": 600, "unit": "seconds"}
            })
        );
    }

    #[test]
    fn cache_time_is_always_zero() {
        let query = build_query(
            "7",
            &[],
            TimeWindow::new(3600, 0),
            Aggregator::Avg,
            60,
        );
        assert_eq!(query.cache_time, 0);
    }

    #[test]
    fn whole_window_sampling_pins_reversed_sign() {
        // fetch_aggregated derives sampling from span_seconds; a reversed
        // window therefore produces a negative sampling value on the wire.
        let window = TimeWindow::new(100, 700);
        let query = build_query("7", &[], window, Aggregator::Avg, window.span_seconds());
        assert_eq!(query.metrics[0].aggregators[0].sampling.value, -600);
    }
}
