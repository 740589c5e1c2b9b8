use crate::classifier::{Verdict, classify};
use crate::config::MonitorConfig;
use crate::metrics::{LatencyLabel, Snapshot};
use crate::probe::ProbeEvent;
use std::collections::VecDeque;

/// Rolling connectivity statistics over the event stream.
///
/// Single logical owner of all mutable aggregate state: counters, streaks,
/// and the bounded graph buffer. One event is folded in atomically by
/// [`AggregateState::apply`]; no partial update is ever observable because
/// the only output is the snapshot built after the fold.
pub struct AggregateState {
    config: MonitorConfig,
    latency_sum: f64,
    response_count: u64,
    timeout_count: u64,
    offline_count: u64,
    online_count: u64,
    current_online_streak: u64,
    max_online_streak: u64,
    graph: VecDeque<f64>,
    // Decimation countdown. 0 admits the next graph push; starts at 0 so the
    // first eligible sample is always plotted.
    tick: u32,
}

impl AggregateState {
    pub fn new(config: MonitorConfig) -> Self {
        let graph = VecDeque::with_capacity(config.graph_max);
        Self {
            config,
            latency_sum: 0.0,
            response_count: 0,
            timeout_count: 0,
            offline_count: 0,
            online_count: 0,
            current_online_streak: 0,
            max_online_streak: 0,
            graph,
            tick: 0,
        }
    }

    /// Folds one event into the aggregate and returns the resulting
    /// snapshot, or `None` for `Unrecognized` (which changes nothing).
    pub fn apply(&mut self, event: &ProbeEvent, reachable: bool) -> Option<Snapshot> {
        let verdict = classify(event, reachable, &self.config)?;

        let last_latency = match event {
            ProbeEvent::Latency { value_ms, .. } => {
                self.response_count += 1;
                self.latency_sum += value_ms;
                self.push_graph(*value_ms);
                LatencyLabel::Value(*value_ms)
            }
            ProbeEvent::Timeout { .. } => {
                self.timeout_count += 1;
                // Timeouts show as a spike at the graph ceiling, not a gap.
                self.push_graph(self.config.max_graph_value);
                LatencyLabel::Timeout
            }
            ProbeEvent::Unrecognized => return None,
        };

        if verdict.online {
            self.online_count += 1;
            self.current_online_streak += 1;
            if self.current_online_streak > self.max_online_streak {
                self.max_online_streak = self.current_online_streak;
            }
        } else {
            self.offline_count += 1;
            self.current_online_streak = 0;
        }

        Some(self.snapshot(verdict, reachable, last_latency))
    }

    fn push_graph(&mut self, value: f64) {
        if self.tick > 0 {
            self.tick -= 1;
            return;
        }
        if self.graph.len() >= self.config.graph_max {
            self.graph.pop_front();
        }
        self.graph.push_back(value.clamp(0.0, self.config.max_graph_value));
        self.tick = self.config.graph_tick;
    }

    fn jitter(&self) -> Option<f64> {
        if self.graph.len() < 2 {
            return None;
        }
        let mut sum = 0.0;
        for (prev, next) in self.graph.iter().zip(self.graph.iter().skip(1)) {
            sum += (next - prev).abs();
        }
        Some(sum / (self.graph.len() - 1) as f64)
    }

    fn snapshot(&self, verdict: Verdict, reachable: bool, last_latency: LatencyLabel) -> Snapshot {
        let classified = self.online_count + self.offline_count;
        let online_pct = if classified == 0 {
            0.0
        } else {
            self.online_count as f64 / classified as f64 * 100.0
        };
        let mean_latency_ms = if self.response_count == 0 {
            None
        } else {
            Some(self.latency_sum / self.response_count as f64)
        };
        let graph_min = self.graph.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.min(v)))
        });
        let graph_max = self.graph.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        });

        Snapshot {
            mean_latency_ms,
            graph_min,
            graph_max,
            jitter_ms: self.jitter(),
            graph: self.graph.iter().copied().collect(),
            online: verdict.online,
            online_pct,
            online_count: self.online_count,
            offline_count: self.offline_count,
            timeout_count: self.timeout_count,
            current_online_streak: self.current_online_streak,
            max_online_streak: self.max_online_streak,
            reachable,
            severity: verdict.severity,
            last_latency,
        }
    }
}
