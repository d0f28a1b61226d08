//! Leveled, colorized console logging with RPC and HTTP middleware.
//!
//! # Architecture Overview
//!
//! ```text
//!   APP_ENV / loggo.toml
//!          │
//!          ▼
//!   ┌─────────────┐      ┌──────────────────────────────────────────┐
//!   │   config    │─────▶│ logging                                  │
//!   │  factory    │      │  Level ─ Flags ─ Logger (impl Log) ─ Sink │──▶ stdout
//!   └─────────────┘      └──────────────────────────────────────────┘
//!                                   ▲ Arc<dyn Log>
//!                                   │
//!   ┌───────────────────────────────┴──────────────────────────────┐
//!   │ middleware                                                    │
//!   │  UnaryInterceptor   StreamInterceptor   http_logging_middleware│
//!   │        └──────────── measure ─── badge ────────┘              │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{routing::get, Router};
//! use loggo::{factory, infof, middleware};
//!
//! let logger = factory::new_default();
//! infof!(logger, "starting on port {}", 8080);
//!
//! let app: Router = middleware::wrap_router(
//!     Router::new().route("/", get(|| async { "hello" })),
//!     Arc::new(factory::new_with_prefix("http: ")),
//! );
//! # let _ = app;
//! ```

pub mod config;
pub mod logging;
pub mod middleware;
pub mod observability;

pub use config::{Environment, LoggingConfig};
pub use logging::{factory, Flags, Level, Log, Logger};
