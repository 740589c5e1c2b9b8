use crate::classifier::Severity;
use std::fmt;

/// Label for the most recent event, shown verbatim next to the graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LatencyLabel {
    Value(f64),
    Timeout,
}

impl fmt::Display for LatencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatencyLabel::Value(value_ms) => write!(f, "{value_ms} ms"),
            LatencyLabel::Timeout => f.write_str("timeout"),
        }
    }
}

/// Immutable view of aggregate state after one classified event.
///
/// The presentation layer formats this and nothing else; it never reaches
/// back into the aggregator.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Mean over all latency replies so far; `None` until the first reply.
    pub mean_latency_ms: Option<f64>,
    /// Min/max over the current graph buffer; `None` while it is empty.
    pub graph_min: Option<f64>,
    pub graph_max: Option<f64>,
    /// Mean absolute difference of consecutive graph samples; `None` below
    /// two samples.
    pub jitter_ms: Option<f64>,
    /// Graph buffer contents, oldest to newest.
    pub graph: Vec<f64>,
    pub online: bool,
    /// Percentage of classified events that were online, 0..=100.
    pub online_pct: f64,
    pub online_count: u64,
    pub offline_count: u64,
    pub timeout_count: u64,
    pub current_online_streak: u64,
    pub max_online_streak: u64,
    pub reachable: bool,
    pub severity: Severity,
    pub last_latency: LatencyLabel,
}
