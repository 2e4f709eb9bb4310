//! Per-IP rate limits (token bucket) for the public and authenticated routers.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type Limiter = GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Limiter for the login page: burst of 100, then one request per 500 ms
/// (2 req/s).
///
/// Over-limit requests get `429 Too Many Requests`. Keys come from the
/// socket peer address, so the server must be started with connect info.
pub fn layer() -> Limiter {
    build(500, 100)
}

/// Limiter for authenticated API and dashboard routes: burst of 50, then
/// one request per 200 ms (5 req/s).
///
/// A dashboard load costs two requests and a save one.
pub fn secure_layer() -> Limiter {
    build(200, 50)
}

/// `replenish_ms` is the time it takes to earn back one request.
fn build(replenish_ms: u64, burst_size: u32) -> Limiter {
    let config = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(burst_size)
        .finish()
        .expect("rate limit period and burst size are non-zero");

    GovernorLayer::new(Arc::new(config))
}
