use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response};

use crate::error::BoxError;

/// What a pipeline resolves to: a response, a fall-through, or a failure.
pub type PipelineResult = Result<Option<Response<Bytes>>, BoxError>;

/// The application-side entry point the engine drives requests into.
///
/// A pipeline receives the fully-built request and resolves to
/// `Some(response)` if any of its stages produced one, or `None` if the
/// request fell through every stage unmatched. Errors cross the boundary
/// unmodified; the engine never converts them into synthetic responses.
///
/// Async functions work directly:
///
/// ```
/// use bytes::Bytes;
/// use engine::{PipelineResult, TestEngine};
/// use http::{Request, Response};
///
/// async fn ping(request: Request<Bytes>) -> PipelineResult {
///     if request.uri().path() == "/ping" {
///         let response = Response::builder().body(Bytes::from("pong")).unwrap();
///         Ok(Some(response))
///     } else {
///         Ok(None)
///     }
/// }
///
/// let engine = TestEngine::new(ping);
/// ```
pub trait Pipeline: Send + Sync {
    fn handle(
        &self,
        request: Request<Bytes>,
    ) -> BoxFuture<'_, PipelineResult>;
}

impl<F, Fut> Pipeline for F
where
    F: Fn(Request<Bytes>) -> Fut + Send + Sync,
    Fut: Future<Output = PipelineResult> + Send + 'static,
{
    fn handle(
        &self,
        request: Request<Bytes>,
    ) -> BoxFuture<'_, PipelineResult> {
        Box::pin(self(request))
    }
}
