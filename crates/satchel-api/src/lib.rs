//! # Satchel API
//!
//! Router with ordered middleware and groups, auth middleware, HTTP
//! handlers, DTOs and API errors.

pub mod app;
pub mod context;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use router::{Handler, Mux};
pub use state::AppState;
