/*!
 * Request Router
 *
 * This module implements the router that binds `"METHOD /path"` patterns
 * to handlers wrapped by scope-isolated middleware chains.
 *
 * # Scopes
 *
 * - The **global** scope lives on [`Router`]. Middleware added there wraps
 *   every dispatched request, matched or not.
 * - A **group** scope is opened with [`Router::group`] or [`Group::group`].
 *   It starts as a snapshot of its parent's route scope, and middleware
 *   added inside it only wraps routes registered inside it afterwards.
 *
 * A route is bound permanently when it is registered: middleware added to
 * its scope later does not reach it.
 *
 * # Lifecycle
 *
 * Registration happens on `&mut Router`. [`Router::into_service`] consumes
 * the router and returns a read-only [`RouterService`], so registration
 * cannot happen once requests are being served.
 */

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use thiserror::Error;
use tower::Service;

use crate::backend::error::BackendError;
use crate::backend::routes::chain::{handler_fn, Handler, Middleware, MiddlewareChain};

/// Route pattern errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The path part does not start with `/`
    #[error("route path must start with '/': {0:?}")]
    InvalidPath(String),

    /// The method part is not a valid HTTP method
    #[error("invalid HTTP method in route pattern: {0:?}")]
    InvalidMethod(String),
}

/// Parsed route pattern
///
/// `"GET /api/me"` matches only `GET` requests; `"/health"` matches any
/// method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePattern {
    method: Option<Method>,
    path: String,
}

impl RoutePattern {
    /// Pattern method, `None` for any method
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// Pattern path
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for RoutePattern {
    type Err = PatternError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let pattern = pattern.trim();
        let (method, path) = match pattern.split_once(char::is_whitespace) {
            Some((method, path)) => {
                let method = Method::from_bytes(method.as_bytes())
                    .map_err(|_| PatternError::InvalidMethod(method.to_string()))?;
                (Some(method), path.trim_start())
            }
            None => (None, pattern),
        };

        if !path.starts_with('/') || path.contains(char::is_whitespace) {
            return Err(PatternError::InvalidPath(path.to_string()));
        }

        Ok(Self {
            method,
            path: path.to_string(),
        })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{} {}", method, self.path),
            None => f.write_str(&self.path),
        }
    }
}

#[derive(Default)]
struct RouteTable {
    routes: HashMap<RoutePattern, Handler>,
}

impl RouteTable {
    fn bind(&mut self, pattern: &str, handler: Handler) {
        let pattern: RoutePattern = match pattern.parse() {
            Ok(pattern) => pattern,
            Err(e) => panic!("invalid route pattern {pattern:?}: {e}"),
        };

        if self.routes.contains_key(&pattern) {
            panic!("route `{pattern}` is already registered");
        }

        tracing::debug!(route = %pattern, "Registered route");
        self.routes.insert(pattern, handler);
    }
}

/// Fixed handler for requests that match no route
fn not_found() -> Handler {
    handler_fn(|req: Request| async move {
        tracing::debug!(method = %req.method(), path = %req.uri().path(), "No route matched");
        BackendError::NotFound
    })
}

/// Router under construction
pub struct Router {
    global: MiddlewareChain,
    table: RouteTable,
}

impl Router {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            global: MiddlewareChain::new(),
            table: RouteTable::default(),
        }
    }

    /// Append middleware to the global scope
    pub fn use_middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.global.push(middleware);
        self
    }

    /// Bind `pattern` to `handler`
    ///
    /// Routes registered at the root carry no route-scope middleware; the
    /// global scope still wraps them at dispatch.
    ///
    /// # Panics
    ///
    /// If the pattern is malformed or already registered.
    pub fn handle(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        self.table.bind(pattern, handler);
        self
    }

    /// Open a group scope
    ///
    /// The group starts from the root route scope, which is empty; global
    /// middleware is not copied into it.
    pub fn group<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Group<'_>),
    {
        let mut group = Group {
            table: &mut self.table,
            scope: MiddlewareChain::new(),
        };
        f(&mut group);
        self
    }

    /// Freeze the router for serving
    ///
    /// Every route handler and the not-found handler are wrapped with the
    /// global scope here, once, since the global scope can no longer change.
    pub fn into_service(self) -> RouterService {
        let Router { global, table } = self;

        let routes = table
            .routes
            .into_iter()
            .map(|(pattern, handler)| (pattern, global.wrap(handler)))
            .collect::<HashMap<_, _>>();
        let not_found = global.wrap(not_found());

        tracing::info!(routes = routes.len(), middleware = global.len(), "Router ready");

        RouterService {
            inner: Arc::new(Frozen { routes, not_found }),
        }
    }

    /// Freeze the router and mount it into an `axum::Router`
    pub fn into_axum(self) -> axum::Router {
        axum::Router::new().fallback_service(self.into_service())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Group scope handed to [`Router::group`] closures
pub struct Group<'r> {
    table: &'r mut RouteTable,
    scope: MiddlewareChain,
}

impl Group<'_> {
    /// Append middleware to this group's scope
    pub fn use_middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.scope.push(middleware);
        self
    }

    /// Bind `pattern` to `handler` wrapped by this group's current scope
    ///
    /// # Panics
    ///
    /// If the pattern is malformed or already registered.
    pub fn handle(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        let handler = self.scope.wrap(handler);
        self.table.bind(pattern, handler);
        self
    }

    /// Open a nested group starting from a snapshot of this scope
    pub fn group<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Group<'_>),
    {
        let mut child = Group {
            table: &mut *self.table,
            scope: self.scope.clone(),
        };
        f(&mut child);
        self
    }
}

struct Frozen {
    routes: HashMap<RoutePattern, Handler>,
    not_found: Handler,
}

impl Frozen {
    fn resolve(&self, method: &Method, path: &str) -> &Handler {
        let exact = RoutePattern {
            method: Some(method.clone()),
            path: path.to_string(),
        };
        if let Some(handler) = self.routes.get(&exact) {
            return handler;
        }

        let any_method = RoutePattern {
            method: None,
            path: exact.path,
        };
        self.routes.get(&any_method).unwrap_or(&self.not_found)
    }
}

/// Read-only router serving requests
///
/// Cheap to clone; all clones share one route table.
#[derive(Clone)]
pub struct RouterService {
    inner: Arc<Frozen>,
}

impl RouterService {
    /// Resolve and run the handler for `req`
    pub async fn dispatch(&self, req: Request) -> Response {
        let handler = Arc::clone(self.inner.resolve(req.method(), req.uri().path()));
        handler(req).await
    }

    /// Whether a route is bound to exactly this pattern
    pub fn has_route(&self, pattern: &str) -> bool {
        pattern
            .parse::<RoutePattern>()
            .map(|pattern| self.inner.routes.contains_key(&pattern))
            .unwrap_or(false)
    }
}

impl Service<Request> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { Ok(service.dispatch(req).await.into_response()) })
    }
}
