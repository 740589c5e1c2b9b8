use std::fmt;
use std::time::Duration;

pub const DEFAULT_PROBE_HOST: &str = "google.com";
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_millis(1000);

/// Which platform's ping output the parser expects. Fixed for the whole run;
/// there is no per-line auto-detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineFormat {
    Unix,
    Windows,
}

impl LineFormat {
    pub fn parse_cli(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "unix" | "linux" | "macos" | "bsd" => Some(LineFormat::Unix),
            "windows" | "win" | "win32" => Some(LineFormat::Windows),
            _ => None,
        }
    }

    /// Profile matching the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            LineFormat::Windows
        } else {
            LineFormat::Unix
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineFormat::Unix => "unix",
            LineFormat::Windows => "windows",
        }
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Tunable constants for the aggregation pipeline.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Graph buffer capacity; oldest samples are evicted beyond this.
    pub graph_max: usize,
    /// Decimation tick: only every (graph_tick + 1)-th eligible sample is
    /// pushed to the graph. 0 admits every sample.
    pub graph_tick: u32,
    /// Graph ceiling in ms. Latencies are clamped here and timeouts render
    /// as a spike at this value.
    pub max_graph_value: f64,
    /// Latencies above this are flagged as warnings.
    pub latency_warn_ms: f64,
    /// Latencies above this count as effectively offline even though a
    /// numeric reply arrived.
    pub latency_timeout_min_ms: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            graph_max: 180,
            graph_tick: 0,
            max_graph_value: 300.0,
            latency_warn_ms: 100.0,
            latency_timeout_min_ms: 101.0,
        }
    }
}
