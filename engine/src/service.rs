use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response};
use http_body::Body;
use http_body_util::{BodyExt, Full};
use tower::{Service, ServiceExt};

use crate::pipeline::{Pipeline, PipelineResult};

/// Adapts a tower service (an `axum::Router`, for instance) into a
/// [`Pipeline`], driving it with `oneshot` and collecting the response body.
///
/// A tower service always responds, so an adapted pipeline never reports the
/// unhandled outcome; a router's fallback 404 arrives as a handled response.
pub struct ServicePipeline<S> {
    inner: S,
}

impl<S> ServicePipeline<S> {
    pub fn new(service: S) -> Self {
        Self { inner: service }
    }
}

impl<S, B> Pipeline for ServicePipeline<S>
where
    S: Service<Request<Full<Bytes>>, Response = Response<B>> + Clone + Send + Sync + 'static,
    S::Future: Send,
    S::Error: Into<crate::BoxError>,
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<crate::BoxError>,
{
    fn handle(&self, request: Request<Bytes>) -> BoxFuture<'_, PipelineResult> {
        let service = self.inner.clone();
        Box::pin(async move {
            let (parts, body) = request.into_parts();
            let request = Request::from_parts(parts, Full::new(body));

            let response = service.oneshot(request).await.map_err(Into::into)?;
            let (parts, body) = response.into_parts();
            let body = body.collect().await.map_err(Into::into)?.to_bytes();
            Ok(Some(Response::from_parts(parts, body)))
        })
    }
}
