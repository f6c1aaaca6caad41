//! Router with an ordered middleware chain and prefix groups
//!
//! Middleware wraps the whole router, so it runs before route matching and
//! can rewrite the path (see [`add_trailing_slash`](crate::middleware::add_trailing_slash())).
//! The first middleware registered is the outermost one.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{uri::PathAndQuery, Uri},
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Router,
};
use tower::{util::BoxCloneSyncService, Layer, Service, ServiceExt};

/// A finished, immutable request handler.
pub type Handler = BoxCloneSyncService<Request, Response, Infallible>;

type Middleware = Box<dyn Fn(Handler) -> Handler + Send + Sync>;

struct Mount {
    prefix: String,
    handler: Handler,
}

#[derive(Default)]
pub struct Mux {
    router: Router,
    mounts: Vec<Mount>,
    middlewares: Vec<Middleware>,
}

impl Mux {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware. Registering the same layer twice runs it twice.
    ///
    /// Any tower layer over [`Handler`] fits: `axum::middleware::from_fn`,
    /// `Extension`, or `tower_http` layers whose response body differs.
    /// Responses are converted back with `IntoResponse`.
    pub fn use_middleware<L>(&mut self, layer: L) -> &mut Self
    where
        L: Layer<Handler> + Send + Sync + 'static,
        L::Service: Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.middlewares.push(Box::new(move |next| {
            BoxCloneSyncService::new(layer.layer(next).map_response(IntoResponse::into_response))
        }));
        self
    }

    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        self.router = std::mem::take(&mut self.router).route(path, method_router);
        self
    }

    /// Mounts an isolated sub-router at `prefix`.
    ///
    /// Requests for `prefix` or anything below it reach the group with the
    /// prefix stripped (`/items/42/` is seen as `/42/`). The group's
    /// middleware applies to those requests only. An empty prefix (or `/`)
    /// makes the group the fallback for everything the parent does not match.
    pub fn group<F>(&mut self, prefix: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Mux),
    {
        let mut group = Mux::new();
        build(&mut group);
        let handler = group.into_handler();

        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            self.router = std::mem::take(&mut self.router).fallback_service(handler);
        } else {
            let prefix = if prefix.starts_with('/') {
                prefix.to_string()
            } else {
                format!("/{}", prefix)
            };
            self.mounts.push(Mount { prefix, handler });
            // Longest prefix wins
            self.mounts
                .sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        }
        self
    }

    /// Finalizes routes, groups and middleware into a single handler.
    pub fn into_handler(self) -> Handler {
        let Mux {
            router,
            mounts,
            middlewares,
        } = self;

        let routed = if mounts.is_empty() {
            BoxCloneSyncService::new(router)
        } else {
            let mounts = Arc::new(mounts);
            BoxCloneSyncService::new(tower::service_fn(move |request: Request| {
                let mounts = Arc::clone(&mounts);
                let router = router.clone();
                async move { dispatch(&mounts, router, request).await }
            }))
        };

        middlewares
            .iter()
            .rev()
            .fold(routed, |next, middleware| middleware(next))
    }

    /// Wraps the finished handler in an [`axum::Router`] for `axum::serve`.
    pub fn into_router(self) -> Router {
        Router::new().fallback_service(self.into_handler())
    }
}

async fn dispatch(mounts: &[Mount], router: Router, request: Request) -> Result<Response, Infallible> {
    for mount in mounts {
        if let Some(rest) = strip_prefix(request.uri().path(), &mount.prefix) {
            let rest = rest.to_string();
            let mut request = request;
            if let Some(uri) = replace_path(request.uri(), &rest) {
                *request.uri_mut() = uri;
            }
            return mount.handler.clone().oneshot(request).await;
        }
    }
    router.oneshot(request).await
}

/// `Some("/")` for an exact match, `Some("/rest")` for a path below `prefix`.
fn strip_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Same URI with a new path; the query string is kept.
pub(crate) fn replace_path(uri: &Uri, path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}
