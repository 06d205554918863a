use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response};

use crate::pipeline::{Pipeline, PipelineResult};

/// What a single stage did with the request it was handed.
pub enum StageOutcome {
    /// The stage produced a response; later stages never run.
    Respond(Response<Bytes>),
    /// The stage passed the request on to the next stage.
    Forward(Request<Bytes>),
}

type BoxStage = Box<dyn Fn(Request<Bytes>) -> BoxFuture<'static, StageOutcome> + Send + Sync>;

/// An ordered pipeline of stages, each taking ownership of the request and
/// either responding or forwarding it. A request that falls off the end is
/// the unhandled outcome.
///
/// ```
/// use bytes::Bytes;
/// use engine::{Stack, StageOutcome, TestEngine};
/// use http::Response;
///
/// let stack = Stack::new().stage(|request| async move {
///     if request.uri().path() == "/" {
///         let response = Response::builder()
///             .body(Bytes::from("Test String"))
///             .unwrap();
///         StageOutcome::Respond(response)
///     } else {
///         StageOutcome::Forward(request)
///     }
/// });
///
/// let engine = TestEngine::new(stack);
/// ```
#[derive(Default)]
pub struct Stack {
    stages: Vec<BoxStage>,
}

impl Stack {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage. Stages run in insertion order.
    pub fn stage<F, Fut>(mut self, stage: F) -> Self
    where
        F: Fn(Request<Bytes>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = StageOutcome> + Send + 'static,
    {
        self.stages
            .push(Box::new(move |request| Box::pin(stage(request))));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Pipeline for Stack {
    fn handle(&self, request: Request<Bytes>) -> BoxFuture<'_, PipelineResult> {
        Box::pin(async move {
            let mut request = request;
            for stage in &self.stages {
                match stage(request).await {
                    StageOutcome::Respond(response) => return Ok(Some(response)),
                    StageOutcome::Forward(next) => request = next,
                }
            }
            Ok(None)
        })
    }
}
