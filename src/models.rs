use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ONE_WEEK: i64 = 7 * 24 * 60 * 60;
pub const ONE_WEEK_AND_5MIN: i64 = ONE_WEEK + 5 * 60;

/// Query window expressed in seconds relative to "now".
/// `from_seconds_ago` is intended to be the further-in-the-past bound; this is
/// not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from_seconds_ago: i64,
    pub to_seconds_ago: i64,
}

impl TimeWindow {
    pub fn new(from_seconds_ago: i64, to_seconds_ago: i64) -> Self {
        TimeWindow {
            from_seconds_ago,
            to_seconds_ago,
        }
    }

    /// Width of a single bucket covering the whole window, computed as
    /// `from - to`. Negative when the bounds are passed in reverse order;
    /// the sign is deliberately not normalized.
    pub fn span_seconds(&self) -> i64 {
        self.from_seconds_ago - self.to_seconds_ago
    }
}

impl Default for TimeWindow {
    /// The week-old window used by check history lookups.
    fn default() -> Self {
        TimeWindow::new(ONE_WEEK_AND_5MIN, ONE_WEEK)
    }
}

/// Backend-side reduction applied over a sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregator {
    Avg,
    Dev,
    Min,
    Max,
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub metrics: Vec<MetricBlock>,
    pub cache_time: u32,
    pub start_relative: RelativeTime,
    pub end_relative: RelativeTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBlock {
    pub name: String,
    pub tags: TagFilter,
    pub group_by: Vec<GroupBy>,
    pub aggregators: Vec<AggregatorBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagFilter {
    pub entity: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBy {
    pub name: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorBlock {
    pub name: Aggregator,
    pub align_sampling: bool,
    pub sampling: Sampling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sampling {
    pub value: i64,
    pub unit: String,
}

impl Sampling {
    pub fn seconds(value: i64) -> Self {
        Sampling {
            value,
            unit: "seconds".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeTime {
    pub value: i64,
    pub unit: String,
}

impl RelativeTime {
    pub fn seconds_ago(value: i64) -> Self {
        RelativeTime {
            value,
            unit: "seconds".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub queries: Vec<QueryBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryBlock {
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

/// One grouped series in a query response. `values` rows are
/// `[timestamp, value]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub tags: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub values: Vec<(i64, f64)>,
}

impl QueryResult {
    /// First value of the `key` grouping tag, when present.
    pub fn key_tag(&self) -> Option<&str> {
        self.tags.get("key").and_then(|v| v.first()).map(String::as_str)
    }
}
