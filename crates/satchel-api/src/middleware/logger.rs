//! Access log

use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, HttpMakeClassifier, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

/// One `info` span per request (method, uri) and one `info` event when the
/// response is ready, carrying its final status and the latency in ms.
pub fn access_log() -> TraceLayer<HttpMakeClassifier> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
