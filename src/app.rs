use crate::config::{LineFormat, MonitorConfig};
use crate::metrics::Snapshot;
use crate::metrics_aggregate::AggregateState;
use crate::parser::LineParser;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Owns the line-processing pipeline: parse, classify, aggregate.
///
/// Single-threaded by construction — the UI loop feeds it one line at a
/// time, so each event is fully folded in before the next is read. The
/// reachability flag is the only state shared with another thread, and it
/// is read exactly once per line so one event sees one consistent value.
pub struct AppState {
    pub config: MonitorConfig,
    parser: LineParser,
    aggregate: AggregateState,
    reachable: Arc<AtomicBool>,
    /// Most recent snapshot, if any classified event has arrived.
    pub snapshot: Option<Snapshot>,
    /// Total lines consumed, recognized or not.
    pub lines_seen: u64,
}

impl AppState {
    pub fn new(config: MonitorConfig, format: LineFormat, reachable: Arc<AtomicBool>) -> Self {
        Self {
            parser: LineParser::new(format),
            aggregate: AggregateState::new(config.clone()),
            config,
            reachable,
            snapshot: None,
            lines_seen: 0,
        }
    }

    pub fn format(&self) -> LineFormat {
        self.parser.format()
    }

    /// Processes one raw line end to end. Returns `true` when the line was
    /// classified and the snapshot advanced; unrecognized lines leave the
    /// last snapshot in place so the display simply does not move.
    pub fn apply_line(&mut self, line: &str) -> bool {
        self.lines_seen += 1;
        let event = self.parser.parse(line);
        let reachable = self.reachable.load(Ordering::Relaxed);
        match self.aggregate.apply(&event, reachable) {
            Some(snapshot) => {
                self.snapshot = Some(snapshot);
                true
            }
            None => false,
        }
    }
}
