//! Request middleware
//!
//! Session gating is written with `axum::middleware::from_fn`; logging, panic
//! recovery and path normalization are `tower_http` layers. All of them are
//! registered on a [`Mux`](crate::Mux) through `use_middleware`.

pub mod auth;
pub mod logger;
pub mod path;
pub mod recover;

pub use auth::{load_current_user, require_session, require_session_or_redirect, RedirectGuard};
pub use logger::access_log;
pub use path::add_trailing_slash;
pub use recover::recover;
