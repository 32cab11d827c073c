use prometheus::{Encoder, Histogram, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref MESSAGES_RECEIVED: IntCounter = IntCounter::new(
        "messages_received_total",
        "Total number of inbound text messages"
    ).unwrap();

    pub static ref LOG_APPEND_FAILURES: IntCounter = IntCounter::new(
        "message_log_failures_total",
        "Total number of failed message log appends"
    ).unwrap();

    pub static ref ADDRESSES_DETECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("addresses_detected_total", "Token addresses found in messages"),
        &["chain"]
    ).unwrap();

    pub static ref ADDRESSES_REJECTED: IntCounter = IntCounter::new(
        "addresses_rejected_total",
        "Candidates dropped by structural validation"
    ).unwrap();

    pub static ref LOOKUPS: IntCounterVec = IntCounterVec::new(
        Opts::new("token_lookups_total", "Price lookups by outcome"),
        &["outcome"]
    ).unwrap();

    pub static ref REPLIES_SENT: IntCounter = IntCounter::new(
        "replies_sent_total",
        "Total number of replies delivered"
    ).unwrap();

    pub static ref LOOKUP_LATENCY: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "token_lookup_latency_seconds",
            "Price lookup latency in seconds"
        ).buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0])
    ).unwrap();
}

pub fn init() -> Result<(), prometheus::Error> {
    REGISTRY.register(Box::new(MESSAGES_RECEIVED.clone()))?;
    REGISTRY.register(Box::new(LOG_APPEND_FAILURES.clone()))?;
    REGISTRY.register(Box::new(ADDRESSES_DETECTED.clone()))?;
    REGISTRY.register(Box::new(ADDRESSES_REJECTED.clone()))?;
    REGISTRY.register(Box::new(LOOKUPS.clone()))?;
    REGISTRY.register(Box::new(REPLIES_SENT.clone()))?;
    REGISTRY.register(Box::new(LOOKUP_LATENCY.clone()))?;
    Ok(())
}

/// Text exposition of everything in [`REGISTRY`].
pub fn render() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
