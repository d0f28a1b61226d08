//! Request/response logging middleware.
//!
//! # Data Flow
//! ```text
//! call arrives (unary RPC | streaming RPC | HTTP request)
//!     → rpc.rs / http.rs adapter
//!     → measure.rs (run handler once, time it)
//!     → badge.rs (classify outcome: OK/ERROR or status band)
//!     → one Info line through the injected `Log`
//!     → handler result returned unchanged
//! ```
//!
//! # Design Decisions
//! - Every adapter takes its logger explicitly; there is no process-wide default
//! - Exactly one line per call, written after the handler completes
//! - No timeouts: a handler that never completes is never logged

pub mod badge;
pub mod http;
pub mod measure;
pub mod rpc;

pub use badge::StatusBand;
pub use http::{http_logging_middleware, wrap_router, HttpLogger};
pub use measure::{measure_http, measure_stream, measure_unary};
pub use rpc::{StreamInterceptor, StreamServerInfo, UnaryInterceptor, UnaryServerInfo};
