//! HTTP request logging middleware.
//!
//! Wraps the rest of an axum stack, measures it, and writes one Info line
//! per request once the response is produced:
//!
//! ```text
//! GET /users/7 | 404 | Processed request in 1.2ms
//! ```
//!
//! The badge is green below 400, yellow for client errors and red for
//! server errors. Handlers that never set a status answer 200.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{OriginalUri, Request, State},
    http::Method,
    middleware::{self, Next},
    response::Response,
    Router,
};

use crate::logging::Log;
use crate::middleware::badge::status_badge;
use crate::middleware::measure::measure_http;

/// Middleware state: the logger request lines go to.
#[derive(Clone)]
pub struct HttpLogger {
    logger: Arc<dyn Log>,
}

impl HttpLogger {
    pub fn new(logger: Arc<dyn Log>) -> Self {
        Self { logger }
    }

    /// Write the completion line for one request.
    pub fn log_request(&self, method: &Method, path: &str, status: u16, duration: Duration) {
        self.logger.infof(format_args!(
            "{} {} | {} | Processed request in {:?}",
            method,
            path,
            status_badge(status),
            duration
        ));
    }
}

impl fmt::Debug for HttpLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLogger")
            .field("threshold", &self.logger.threshold())
            .finish()
    }
}

/// Middleware function for request logging.
///
/// Install with `axum::middleware::from_fn_with_state(HttpLogger::new(..), http_logging_middleware)`
/// or through [`wrap_router`].
///
/// The path logged is the one the client sent, including any prefix a
/// parent router stripped while nesting. Timing stops once the response
/// head is ready; body streaming is not counted.
pub async fn http_logging_middleware(
    State(state): State<HttpLogger>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.path())
        .unwrap_or_else(|| request.uri().path())
        .to_string();

    let (duration, response) = measure_http(|request| next.run(request), request).await;

    state.log_request(&method, &path, response.status().as_u16(), duration);
    response
}

/// Wrap every route of `router` with [`http_logging_middleware`].
pub fn wrap_router<S>(router: Router<S>, logger: Arc<dyn Log>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(
        HttpLogger::new(logger),
        http_logging_middleware,
    ))
}
