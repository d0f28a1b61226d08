//! Duration measurement around wrapped calls.
//!
//! Each helper invokes the handler exactly once and hands back its output
//! untouched alongside the elapsed time. Timing uses `tokio::time::Instant`
//! so a paused test clock is observed.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Time a unary handler: `(elapsed, handler result)`.
pub async fn measure_unary<H, Fut, Ctx, Req, Resp, E>(
    handler: H,
    ctx: Ctx,
    req: Req,
) -> (Duration, Result<Resp, E>)
where
    H: FnOnce(Ctx, Req) -> Fut,
    Fut: Future<Output = Result<Resp, E>>,
{
    let start = Instant::now();
    let result = handler(ctx, req).await;
    (start.elapsed(), result)
}

/// Time a streaming handler: `(elapsed, handler result)`.
pub async fn measure_stream<H, Fut, Srv, St, E>(
    handler: H,
    srv: Srv,
    stream: St,
) -> (Duration, Result<(), E>)
where
    H: FnOnce(Srv, St) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let start = Instant::now();
    let result = handler(srv, stream).await;
    (start.elapsed(), result)
}

/// Time an HTTP handler: `(elapsed, response)`.
pub async fn measure_http<H, Fut, Req>(handler: H, request: Req) -> (Duration, Fut::Output)
where
    H: FnOnce(Req) -> Fut,
    Fut: Future,
{
    let start = Instant::now();
    let response = handler(request).await;
    (start.elapsed(), response)
}
