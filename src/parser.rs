use crate::config::LineFormat;
use crate::probe::ProbeEvent;
use regex::Regex;
use std::sync::LazyLock;

// Unix/BSD ping: "64 bytes from 8.8.8.8: icmp_seq=1 ttl=64 time=42.0 ms"
static RE_RESPONSE_UNIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+) bytes from ([\d.]+): icmp_seq=(\d+) ttl=(\d+) time=([\d.]+) ms")
        .expect("unix response pattern")
});

// Unix/BSD ping: "Request timeout for icmp_seq 2"
static RE_TIMEOUT_UNIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Request timeout for icmp_seq (\d+)").expect("unix timeout pattern"));

// Windows ping: "Reply from 8.8.8.8: bytes=32 time=41ms TTL=116". Sub-millisecond
// replies print "time<1ms", hence the [=<]. No sequence number on this platform.
static RE_RESPONSE_WINDOWS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"from ([\d.]+): bytes=(\d+) time[=<]([\d.]+) ?ms TTL=(\d+)")
        .expect("windows response pattern")
});

// Windows ping failure lines carry a keyword rather than a structured field:
// "Request timed out.", "General failure.", "PING: transmit failed."
static RE_TIMEOUT_WINDOWS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)timed out|timeout|general failure|transmit failed")
        .expect("windows timeout pattern")
});

/// Classifies raw ping output lines for one format profile.
///
/// Pure over the line text: no state, no side effects. The response pattern
/// is tried first; a line matching neither pattern, or matching with a
/// numeric capture that does not parse, yields [`ProbeEvent::Unrecognized`].
pub struct LineParser {
    format: LineFormat,
    response: &'static Regex,
    timeout: &'static Regex,
}

impl LineParser {
    pub fn new(format: LineFormat) -> Self {
        let (response, timeout) = match format {
            LineFormat::Unix => (&*RE_RESPONSE_UNIX, &*RE_TIMEOUT_UNIX),
            LineFormat::Windows => (&*RE_RESPONSE_WINDOWS, &*RE_TIMEOUT_WINDOWS),
        };
        Self {
            format,
            response,
            timeout,
        }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    pub fn parse(&self, line: &str) -> ProbeEvent {
        if let Some(captures) = self.response.captures(line) {
            return match self.format {
                LineFormat::Unix => parse_response_unix(&captures),
                LineFormat::Windows => parse_response_windows(&captures),
            }
            .unwrap_or(ProbeEvent::Unrecognized);
        }

        if let Some(captures) = self.timeout.captures(line) {
            let sequence = match self.format {
                LineFormat::Unix => match captures.get(1).and_then(|m| m.as_str().parse().ok()) {
                    Some(sequence) => sequence,
                    None => return ProbeEvent::Unrecognized,
                },
                LineFormat::Windows => 0,
            };
            return ProbeEvent::Timeout { sequence };
        }

        ProbeEvent::Unrecognized
    }
}

fn parse_response_unix(captures: &regex::Captures<'_>) -> Option<ProbeEvent> {
    let host = captures.get(2)?.as_str().to_string();
    let sequence = captures.get(3)?.as_str().parse().ok()?;
    let ttl = captures.get(4)?.as_str().parse().ok()?;
    let value_ms = captures.get(5)?.as_str().parse().ok()?;
    Some(ProbeEvent::Latency {
        value_ms,
        sequence,
        ttl,
        host,
    })
}

fn parse_response_windows(captures: &regex::Captures<'_>) -> Option<ProbeEvent> {
    let host = captures.get(1)?.as_str().to_string();
    let value_ms = captures.get(3)?.as_str().parse().ok()?;
    let ttl = captures.get(4)?.as_str().parse().ok()?;
    Some(ProbeEvent::Latency {
        value_ms,
        sequence: 0,
        ttl,
        host,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unix_response_line() {
        let parser = LineParser::new(LineFormat::Unix);
        let event = parser.parse("64 bytes from 8.8.8.8: icmp_seq=1 ttl=64 time=42.0 ms");
        assert_eq!(
            event,
            ProbeEvent::Latency {
                value_ms: 42.0,
                sequence: 1,
                ttl: 64,
                host: "8.8.8.8".to_string(),
            }
        );
    }

    #[test]
    fn parses_unix_timeout_line() {
        let parser = LineParser::new(LineFormat::Unix);
        let event = parser.parse("Request timeout for icmp_seq 2");
        assert_eq!(event, ProbeEvent::Timeout { sequence: 2 });
    }

    #[test]
    fn parses_windows_response_line() {
        let parser = LineParser::new(LineFormat::Windows);
        let event = parser.parse("Reply from 8.8.8.8: bytes=32 time=41ms TTL=116");
        assert_eq!(
            event,
            ProbeEvent::Latency {
                value_ms: 41.0,
                sequence: 0,
                ttl: 116,
                host: "8.8.8.8".to_string(),
            }
        );
    }

    #[test]
    fn parses_windows_submillisecond_response() {
        let parser = LineParser::new(LineFormat::Windows);
        let event = parser.parse("Reply from 192.168.1.1: bytes=32 time<1ms TTL=64");
        assert_eq!(
            event,
            ProbeEvent::Latency {
                value_ms: 1.0,
                sequence: 0,
                ttl: 64,
                host: "192.168.1.1".to_string(),
            }
        );
    }

    #[test]
    fn parses_windows_timeout_keywords() {
        let parser = LineParser::new(LineFormat::Windows);
        assert_eq!(
            parser.parse("Request timed out."),
            ProbeEvent::Timeout { sequence: 0 }
        );
        assert_eq!(
            parser.parse("General failure."),
            ProbeEvent::Timeout { sequence: 0 }
        );
        assert_eq!(
            parser.parse("PING: transmit failed."),
            ProbeEvent::Timeout { sequence: 0 }
        );
    }

    #[test]
    fn profiles_do_not_cross_match() {
        let unix = LineParser::new(LineFormat::Unix);
        assert!(
            unix.parse("Reply from 8.8.8.8: bytes=32 time=41ms TTL=116")
                .is_unrecognized()
        );

        let windows = LineParser::new(LineFormat::Windows);
        assert!(
            windows
                .parse("64 bytes from 8.8.8.8: icmp_seq=1 ttl=64 time=42.0 ms")
                .is_unrecognized()
        );
    }

    #[test]
    fn noise_lines_are_unrecognized() {
        let parser = LineParser::new(LineFormat::Unix);
        assert!(parser.parse("PING google.com (142.250.80.46): 56 data bytes").is_unrecognized());
        assert!(parser.parse("").is_unrecognized());
        assert!(parser.parse("--- google.com ping statistics ---").is_unrecognized());
    }

    #[test]
    fn malformed_numeric_capture_degrades_to_unrecognized() {
        // "1.2.3" matches [\d.]+ but is not a valid float.
        let parser = LineParser::new(LineFormat::Unix);
        assert!(
            parser
                .parse("64 bytes from 8.8.8.8: icmp_seq=1 ttl=64 time=1.2.3 ms")
                .is_unrecognized()
        );
    }
}
