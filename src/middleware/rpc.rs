//! Unary and streaming RPC interceptors.
//!
//! Both interceptors run the handler through the measurement helpers and
//! then write exactly one Info line per call:
//!
//! ```text
//! <full_method> | STATUS: < OK | ERROR > | Completed in <duration>
//! ```
//!
//! The handler's result is returned unchanged.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::logging::Log;
use crate::middleware::badge::rpc_badge;
use crate::middleware::measure::{measure_stream, measure_unary};

/// Metadata for a unary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryServerInfo {
    /// `/package.Service/Method`
    pub full_method: String,
}

impl UnaryServerInfo {
    pub fn new(full_method: impl Into<String>) -> Self {
        Self {
            full_method: full_method.into(),
        }
    }
}

/// Metadata for a streaming call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamServerInfo {
    pub full_method: String,
    pub is_client_stream: bool,
    pub is_server_stream: bool,
}

impl StreamServerInfo {
    pub fn new(full_method: impl Into<String>, is_client_stream: bool, is_server_stream: bool) -> Self {
        Self {
            full_method: full_method.into(),
            is_client_stream,
            is_server_stream,
        }
    }
}

fn log_completion(logger: &dyn Log, full_method: &str, failed: bool, duration: Duration) {
    logger.infof(format_args!(
        "{} | STATUS: {} | Completed in {:?}",
        full_method,
        rpc_badge(failed),
        duration
    ));
}

/// Logs every unary call it intercepts.
#[derive(Clone)]
pub struct UnaryInterceptor {
    logger: Arc<dyn Log>,
}

impl UnaryInterceptor {
    pub fn new(logger: Arc<dyn Log>) -> Self {
        Self { logger }
    }

    /// Run `handler(ctx, req)`, log its outcome and duration, return its result.
    pub async fn intercept<Ctx, Req, Resp, E, H, Fut>(
        &self,
        ctx: Ctx,
        req: Req,
        info: &UnaryServerInfo,
        handler: H,
    ) -> Result<Resp, E>
    where
        H: FnOnce(Ctx, Req) -> Fut,
        Fut: Future<Output = Result<Resp, E>>,
    {
        let (duration, result) = measure_unary(handler, ctx, req).await;
        log_completion(self.logger.as_ref(), &info.full_method, result.is_err(), duration);
        result
    }

    /// Bind `handler` to `info`, producing a logged handler of the same shape.
    pub fn wrap<Ctx, Req, Resp, E, H, Fut>(
        &self,
        info: UnaryServerInfo,
        handler: H,
    ) -> impl Fn(Ctx, Req) -> BoxFuture<'static, Result<Resp, E>> + Clone + Send + Sync + 'static
    where
        H: Fn(Ctx, Req) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<Resp, E>> + Send + 'static,
        Ctx: Send + 'static,
        Req: Send + 'static,
        Resp: Send + 'static,
        E: Send + 'static,
    {
        let interceptor = self.clone();
        let info = Arc::new(info);
        move |ctx: Ctx, req: Req| -> BoxFuture<'static, Result<Resp, E>> {
            let interceptor = interceptor.clone();
            let info = Arc::clone(&info);
            let handler = handler.clone();
            Box::pin(async move { interceptor.intercept(ctx, req, &info, handler).await })
        }
    }
}

impl fmt::Debug for UnaryInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryInterceptor")
            .field("threshold", &self.logger.threshold())
            .finish()
    }
}

/// Logs every streaming call it intercepts.
#[derive(Clone)]
pub struct StreamInterceptor {
    logger: Arc<dyn Log>,
}

impl StreamInterceptor {
    pub fn new(logger: Arc<dyn Log>) -> Self {
        Self { logger }
    }

    /// Run `handler(srv, stream)`, log its outcome and duration, return its result.
    pub async fn intercept<Srv, St, E, H, Fut>(
        &self,
        srv: Srv,
        stream: St,
        info: &StreamServerInfo,
        handler: H,
    ) -> Result<(), E>
    where
        H: FnOnce(Srv, St) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let (duration, result) = measure_stream(handler, srv, stream).await;
        log_completion(self.logger.as_ref(), &info.full_method, result.is_err(), duration);
        result
    }

    /// Bind `handler` to `info`, producing a logged handler of the same shape.
    pub fn wrap<Srv, St, E, H, Fut>(
        &self,
        info: StreamServerInfo,
        handler: H,
    ) -> impl Fn(Srv, St) -> BoxFuture<'static, Result<(), E>> + Clone + Send + Sync + 'static
    where
        H: Fn(Srv, St) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        Srv: Send + 'static,
        St: Send + 'static,
        E: Send + 'static,
    {
        let interceptor = self.clone();
        let info = Arc::new(info);
        move |srv: Srv, stream: St| -> BoxFuture<'static, Result<(), E>> {
            let interceptor = interceptor.clone();
            let info = Arc::clone(&info);
            let handler = handler.clone();
            Box::pin(async move { interceptor.intercept(srv, stream, &info, handler).await })
        }
    }
}

impl fmt::Debug for StreamInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamInterceptor")
            .field("threshold", &self.logger.threshold())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::RecordingLog;
    use crate::logging::Level;

    #[tokio::test]
    async fn unary_success_logs_ok_once() {
        let log = Arc::new(RecordingLog::new(Level::Debug));
        let interceptor = UnaryInterceptor::new(log.clone());
        let info = UnaryServerInfo::new("/greeter.Greeter/SayHello");

        let reply = interceptor
            .intercept((), "ada", &info, |_, name: &'static str| async move {
                Ok::<_, String>(format!("hello {name}"))
            })
            .await;

        assert_eq!(reply, Ok("hello ada".to_string()));
        let messages = log.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("/greeter.Greeter/SayHello | STATUS:  OK  | Completed in "));
        assert_eq!(log.records()[0].level, Level::Info);
    }

    #[tokio::test]
    async fn unary_error_logs_error_badge_only() {
        let log = Arc::new(RecordingLog::new(Level::Debug));
        let interceptor = UnaryInterceptor::new(log.clone());
        let info = UnaryServerInfo::new("/store.Store/Get");

        let reply = interceptor
            .intercept((), 5u32, &info, |_, _| async { Err::<String, _>("not found") })
            .await;

        assert_eq!(reply, Err("not found"));
        let messages = log.messages();
        assert_eq!(messages.len(), 1, "one line per call, got {messages:?}");
        assert!(messages[0].contains("STATUS:  ERROR  |"));
        assert!(!messages[0].contains(" OK "));
    }

    #[tokio::test]
    async fn stream_logs_once_per_call() {
        let log = Arc::new(RecordingLog::new(Level::Debug));
        let interceptor = StreamInterceptor::new(log.clone());
        let info = StreamServerInfo::new("/feed.Feed/Subscribe", false, true);

        let ok = interceptor
            .intercept((), vec![1, 2, 3], &info, |_, items: Vec<i32>| async move {
                assert_eq!(items.len(), 3);
                Ok::<(), String>(())
            })
            .await;
        let failed = interceptor
            .intercept((), (), &info, |_, _| async { Err::<(), _>("reset") })
            .await;

        assert!(ok.is_ok());
        assert_eq!(failed, Err("reset"));
        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("STATUS:  OK  |"));
        assert!(messages[1].contains("STATUS:  ERROR  |"));
    }

    #[tokio::test]
    async fn quiet_logger_suppresses_interceptor_lines() {
        let log = Arc::new(RecordingLog::new(Level::Quiet));
        let interceptor = UnaryInterceptor::new(log.clone());
        let info = UnaryServerInfo::new("/a.B/C");
        let _ = interceptor
            .intercept((), (), &info, |_, _| async { Ok::<_, ()>(()) })
            .await;
        assert!(log.records().is_empty());
    }

    #[tokio::test]
    async fn wrapped_unary_handler_keeps_its_shape() {
        let log = Arc::new(RecordingLog::new(Level::Debug));
        let interceptor = UnaryInterceptor::new(log.clone());
        let double = interceptor.wrap(UnaryServerInfo::new("/math.Math/Double"), |_: (), n: i64| async move {
            if n < 0 {
                Err(format!("negative: {n}"))
            } else {
                Ok(n * 2)
            }
        });

        assert_eq!(double((), 21).await, Ok(42));
        assert_eq!(double.clone()((), -1).await, Err("negative: -1".to_string()));

        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.starts_with("/math.Math/Double | ")));
    }

    #[tokio::test]
    async fn wrapped_stream_handler_runs_on_spawned_tasks() {
        let log = Arc::new(RecordingLog::new(Level::Debug));
        let interceptor = StreamInterceptor::new(log.clone());
        let handler = interceptor.wrap(
            StreamServerInfo::new("/chat.Chat/Connect", true, true),
            |_: (), _: u8| async { Ok::<(), String>(()) },
        );

        let tasks: Vec<_> = (0..4u8)
            .map(|i| tokio::spawn(handler((), i)))
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(log.messages().len(), 4);
    }
}
