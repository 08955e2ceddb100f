//! Prometheus counters exposed on `/metrics`.
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    /// LOTs built and registered
    pub lots_created: IntCounter,
    /// Failed engine calls, by error code
    pub lot_errors: IntCounterVec,
    /// Exports served, by target
    pub exports: IntCounterVec,
    /// Requests, by matched route
    pub requests: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("lot".to_string()), None)?;

        let lots_created = IntCounter::new("lots_created_total", "LOTs built and registered")?;
        let lot_errors = IntCounterVec::new(
            Opts::new("errors_total", "Failed engine calls by error code"),
            &["code"],
        )?;
        let exports = IntCounterVec::new(
            Opts::new("exports_total", "Exports served by target"),
            &["target"],
        )?;
        let requests = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests by route"),
            &["route"],
        )?;

        registry.register(Box::new(lots_created.clone()))?;
        registry.register(Box::new(lot_errors.clone()))?;
        registry.register(Box::new(exports.clone()))?;
        registry.register(Box::new(requests.clone()))?;

        Ok(Self {
            registry,
            lots_created,
            lot_errors,
            exports,
            requests,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
