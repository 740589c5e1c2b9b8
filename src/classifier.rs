use crate::config::MonitorConfig;
use crate::probe::ProbeEvent;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Per-event connectivity verdict.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Verdict {
    pub online: bool,
    pub severity: Severity,
}

/// Derives the online/offline verdict and latency severity for one event.
///
/// A latency reply counts as online only when it is both fast enough and the
/// reachability flag is set: ping frequently keeps working on networks where
/// name resolution is broken, and that state is offline for practical
/// purposes. Returns `None` for `Unrecognized` — such lines transition
/// nothing.
pub fn classify(event: &ProbeEvent, reachable: bool, config: &MonitorConfig) -> Option<Verdict> {
    match event {
        ProbeEvent::Latency { value_ms, .. } => {
            let severity = if *value_ms > config.latency_timeout_min_ms {
                Severity::Error
            } else if *value_ms > config.latency_warn_ms {
                Severity::Warning
            } else {
                Severity::Ok
            };
            Some(Verdict {
                online: *value_ms <= config.latency_timeout_min_ms && reachable,
                severity,
            })
        }
        ProbeEvent::Timeout { .. } => Some(Verdict {
            online: false,
            severity: Severity::Error,
        }),
        ProbeEvent::Unrecognized => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latency(value_ms: f64) -> ProbeEvent {
        ProbeEvent::Latency {
            value_ms,
            sequence: 1,
            ttl: 64,
            host: "8.8.8.8".to_string(),
        }
    }

    #[test]
    fn fast_reply_with_reachability_is_online_ok() {
        let verdict = classify(&latency(50.0), true, &MonitorConfig::default()).unwrap();
        assert!(verdict.online);
        assert_eq!(verdict.severity, Severity::Ok);
    }

    #[test]
    fn severity_tiers_follow_thresholds() {
        let config = MonitorConfig::default();
        assert_eq!(classify(&latency(100.0), true, &config).unwrap().severity, Severity::Ok);
        assert_eq!(
            classify(&latency(100.5), true, &config).unwrap().severity,
            Severity::Warning
        );
        assert_eq!(
            classify(&latency(101.0), true, &config).unwrap().severity,
            Severity::Warning
        );
        assert_eq!(
            classify(&latency(101.1), true, &config).unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn high_latency_reply_is_offline() {
        let verdict = classify(&latency(250.0), true, &MonitorConfig::default()).unwrap();
        assert!(!verdict.online);
        assert_eq!(verdict.severity, Severity::Error);
    }

    #[test]
    fn boundary_latency_is_still_online() {
        let verdict = classify(&latency(101.0), true, &MonitorConfig::default()).unwrap();
        assert!(verdict.online);
    }

    #[test]
    fn failed_resolution_overrides_low_latency() {
        let verdict = classify(&latency(50.0), false, &MonitorConfig::default()).unwrap();
        assert!(!verdict.online);
        assert_eq!(verdict.severity, Severity::Ok);
    }

    #[test]
    fn timeout_is_offline_error_regardless_of_reachability() {
        let event = ProbeEvent::Timeout { sequence: 3 };
        for reachable in [true, false] {
            let verdict = classify(&event, reachable, &MonitorConfig::default()).unwrap();
            assert!(!verdict.online);
            assert_eq!(verdict.severity, Severity::Error);
        }
    }

    #[test]
    fn unrecognized_yields_no_verdict() {
        assert!(classify(&ProbeEvent::Unrecognized, true, &MonitorConfig::default()).is_none());
    }
}
