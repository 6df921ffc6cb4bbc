/*!
 * Handler and Middleware Primitives
 *
 * A [`Handler`] turns a request into a response. A [`Middleware`] wraps a
 * handler into a new handler, observing the request before and the
 * response after the inner handler runs.
 *
 * # Wrap Order
 *
 * A [`MiddlewareChain`] registered as `[A, B, C]` wraps a handler `H` as
 * `A(B(C(H)))`: `A` sees the request first and the response last.
 */

use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

/// Type-erased request handler
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Type-erased handler wrapper
pub type Middleware = Arc<dyn Fn(Handler) -> Handler + Send + Sync>;

/// Build a [`Handler`] from an async function
///
/// ```rust
/// use adboard::backend::routes::chain::handler_fn;
///
/// let hello = handler_fn(|_req| async { "hello" });
/// ```
pub fn handler_fn<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |req: Request| -> BoxFuture<'static, Response> {
        let fut = f(req);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// Build a [`Handler`] from an async function that also receives `state`
///
/// The state is cloned once per request.
pub fn stateful<S, F, Fut, R>(state: S, f: F) -> Handler
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    handler_fn(move |req| f(state.clone(), req))
}

/// Build a [`Middleware`] from an async function
///
/// The function receives the request and the wrapped handler; it may call
/// the handler, or answer on its own without ever calling it.
///
/// ```rust
/// use adboard::backend::routes::chain::from_fn;
///
/// let passthrough = from_fn(|req, next| async move { next(req).await });
/// ```
pub fn from_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(Request, Handler) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let f = Arc::new(f);
    Arc::new(move |next: Handler| -> Handler {
        let f = Arc::clone(&f);
        Arc::new(move |req: Request| -> BoxFuture<'static, Response> {
            Box::pin((*f)(req, Arc::clone(&next)))
        })
    })
}

/// Ordered sequence of middleware
///
/// Cloning produces an independent snapshot: pushing onto the clone never
/// affects the original and vice versa.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    layers: Vec<Middleware>,
}

impl MiddlewareChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware; it becomes the innermost wrapper
    pub fn push(&mut self, middleware: Middleware) {
        self.layers.push(middleware);
    }

    /// Number of middleware in the chain
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the chain is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Wrap `handler` so that the first registered middleware is outermost
    pub fn wrap(&self, handler: Handler) -> Handler {
        self.layers
            .iter()
            .rev()
            .fold(handler, |inner, middleware| middleware(inner))
    }
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("len", &self.layers.len())
            .finish()
    }
}
