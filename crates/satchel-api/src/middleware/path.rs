//! Path normalization

use tower_http::normalize_path::NormalizePathLayer;

/// Appends `/` to the request path so `/settings` and `/settings/` route
/// the same. The query string is left untouched.
pub fn add_trailing_slash() -> NormalizePathLayer {
    NormalizePathLayer::append_trailing_slash()
}
