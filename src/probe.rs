/// One line of ping output, normalized.
///
/// `Unrecognized` covers both lines that match no known pattern and lines
/// whose matched numeric fields fail to parse; neither may disturb the
/// aggregation pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum ProbeEvent {
    Latency {
        value_ms: f64,
        sequence: u64,
        ttl: u32,
        host: String,
    },
    Timeout {
        sequence: u64,
    },
    Unrecognized,
}

impl ProbeEvent {
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, ProbeEvent::Unrecognized)
    }
}
