use std::sync::Arc;

use satchel_core::AuthService;

use crate::cookie::SessionCookie;

/// Shared by handlers (as an `Extension`) and auth middleware (as `State`).
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub cookie: SessionCookie,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, cookie_name: impl Into<String>) -> Self {
        Self {
            auth,
            cookie: SessionCookie::new(cookie_name),
        }
    }
}
