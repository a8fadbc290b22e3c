//! Per-client rate limiting with a token bucket.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type Limiter<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn limiter<K: KeyExtractor>(extractor: K, per_second: u64, burst: u32) -> Limiter<K> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(extractor)
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Limiter for credential endpoints (register, login).
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Keyed by the socket peer address. Requests over the limit receive
/// `429 Too Many Requests`.
pub fn auth_layer() -> Limiter<PeerIpKeyExtractor> {
    limiter(PeerIpKeyExtractor, 1, 10)
}

/// Same limits as [`auth_layer`], keyed by `X-Forwarded-For`, `X-Real-IP`
/// or `Forwarded` before falling back to the peer address.
///
/// Use only behind a trusted reverse proxy: clients can forge these headers.
pub fn proxied_auth_layer() -> Limiter<SmartIpKeyExtractor> {
    limiter(SmartIpKeyExtractor, 1, 10)
}
