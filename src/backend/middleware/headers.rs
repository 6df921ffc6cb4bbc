/**
 * Response Header Middleware
 *
 * CORS and Content-Security-Policy headers for the browser client. Both
 * answer `OPTIONS` preflight requests themselves with `200 OK` and the
 * headers set; wrapped handlers never see a preflight.
 */

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE,
    CONTENT_SECURITY_POLICY,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;

use crate::backend::routes::chain::{from_fn, Middleware};

/// Policy sent with every response
pub const CONTENT_SECURITY_POLICY_VALUE: &str = "default-src 'none'; script-src 'self'; \
connect-src 'self'; img-src 'self'; style-src 'self'; base-uri 'self'; form-action 'self'";

/// Middleware setting a fixed list of headers on every response
fn set_headers(headers: Vec<(HeaderName, HeaderValue)>) -> Middleware {
    from_fn(move |req: Request, next| {
        let headers = headers.clone();
        async move {
            let mut response = if req.method() == Method::OPTIONS {
                StatusCode::OK.into_response()
            } else {
                next(req).await
            };
            apply(response.headers_mut(), headers);
            response
        }
    })
}

fn apply(target: &mut HeaderMap, headers: Vec<(HeaderName, HeaderValue)>) {
    for (name, value) in headers {
        target.insert(name, value);
    }
}

/// CORS headers for a single allowed origin
pub fn cors(allowed_origin: HeaderValue) -> Middleware {
    set_headers(vec![
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST,GET"),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Authorization,Content-Type,X-Csrf-Token"),
        ),
        (
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ),
        (
            ACCESS_CONTROL_EXPOSE_HEADERS,
            HeaderValue::from_static("Authorization,X-Csrf-Token"),
        ),
        (ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin),
        (ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400")),
    ])
}

/// Content-Security-Policy header
pub fn content_security_policy() -> Middleware {
    set_headers(vec![(
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY_VALUE),
    )])
}
