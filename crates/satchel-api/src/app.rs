//! Route table

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Extension,
};

use crate::handlers::{auth, health, index, me, settings};
use crate::middleware::{
    access_log, add_trailing_slash, load_current_user, recover, require_session,
    require_session_or_redirect, RedirectGuard,
};
use crate::router::Mux;
use crate::state::AppState;

/// Builds the full application.
///
/// `/api/v1` serves JSON clients and answers auth failures with `401`.
/// Everything else falls through to the browser-facing group, which
/// redirects to `/` instead.
pub fn build_app(state: AppState) -> Mux {
    let mut mux = Mux::new();
    mux.use_middleware(access_log())
        .use_middleware(recover())
        .use_middleware(Extension(state.clone()));

    mux.route("/health", get(health::health_check));

    mux.group("/api/v1", |api| {
        api.use_middleware(add_trailing_slash());
        api.route("/signin/", post(auth::sign_in))
            .route("/signout/", get(auth::sign_out).post(auth::sign_out));

        api.group("/me", |me_group| {
            me_group.use_middleware(from_fn_with_state(state.clone(), require_session));
            me_group
                .route("/", get(me::get_me))
                .route("/password/", put(me::update_password))
                .route("/username/", put(me::update_username));
        });
    });

    mux.group("", |web| {
        web.use_middleware(add_trailing_slash())
            .use_middleware(from_fn_with_state(state.clone(), load_current_user));
        web.route("/", get(index::index))
            .route("/signin/", post(auth::sign_in_redirect))
            .route("/signout/", post(auth::sign_out_redirect));

        web.group("/settings", |settings_group| {
            settings_group.use_middleware(from_fn_with_state(
                RedirectGuard::new(state.clone(), auth::INDEX_PATH),
                require_session_or_redirect,
            ));
            settings_group
                .route("/", get(settings::settings_page))
                .route("/auth/password/", put(me::update_password))
                .route(
                    "/auth/users/",
                    get(settings::list_users).post(settings::create_user),
                )
                .route("/auth/users/{user_id}/", delete(settings::delete_user));
        });
    });

    mux
}
