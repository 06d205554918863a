use tracing::{debug, info};

use crate::error::EngineError;
use crate::pipeline::Pipeline;
use crate::record::{CallRecord, SyntheticResponse};
use crate::request::SyntheticRequest;
use crate::settings::Settings;

/// Drives synthetic requests through a pipeline, no socket involved.
///
/// The engine owns the pipeline and the per-run [`Settings`] for one
/// simulated application lifetime; dropping it is the teardown. Sequential
/// dispatches share whatever state the pipeline holds, exactly as
/// sequential real requests would.
pub struct TestEngine<P> {
    pipeline: P,
    settings: Settings,
}

impl<P: Pipeline> TestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        TestEngineBuilder::default().build(pipeline)
    }

    pub fn builder() -> TestEngineBuilder {
        TestEngineBuilder::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs one request through the pipeline and returns its [`CallRecord`].
    ///
    /// Blocking from the caller's point of view: internal suspension is
    /// hidden behind the call boundary, and the call returns only once the
    /// pipeline has responded or determined that no stage will. There is no
    /// timeout; a hung stage hangs the call. The request is consumed exactly
    /// once. A panic inside the pipeline propagates to the caller.
    pub fn dispatch(&self, request: SyntheticRequest) -> Result<CallRecord, EngineError> {
        smol::block_on(self.dispatch_async(request))
    }

    /// The suspension-friendly form of [`dispatch`](Self::dispatch), for
    /// callers already running inside an executor.
    pub async fn dispatch_async(
        &self,
        request: SyntheticRequest,
    ) -> Result<CallRecord, EngineError> {
        let method = request.method().clone();
        let path = request.path().to_string();
        debug!(%method, %path, "dispatching synthetic request");

        let http_request = request.into_http()?;
        let request_headers = http_request.headers().clone();

        let response = self
            .pipeline
            .handle(http_request)
            .await
            .map_err(EngineError::Pipeline)?;

        let response = response.map(|response| {
            let (parts, body) = response.into_parts();
            SyntheticResponse {
                status: parts.status,
                headers: parts.headers,
                body,
            }
        });

        info!(
            %method,
            %path,
            handled = response.is_some(),
            status = response.as_ref().map(|r| r.status.as_u16()),
            "synthetic request completed"
        );

        Ok(CallRecord {
            method,
            path,
            request_headers,
            response,
        })
    }
}

/// Configures a [`TestEngine`] before the pipeline runs, mainly by staging
/// settings overrides.
#[derive(Debug, Default)]
pub struct TestEngineBuilder {
    settings: Settings,
}

impl TestEngineBuilder {
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.set(key, value);
        self
    }

    pub fn build<P: Pipeline>(self, pipeline: P) -> TestEngine<P> {
        TestEngine {
            pipeline,
            settings: self.settings,
        }
    }
}
