//! In-Process Request-Simulation Engine
//!
//! This crate drives synthetic HTTP requests through an application's
//! request-processing pipeline without opening a socket. Test code builds a
//! [`SyntheticRequest`] (optionally with the `encoder` crate's body
//! encoders), hands it to a [`TestEngine`], and asserts on the returned
//! [`CallRecord`] — status, headers, body, and whether any pipeline stage
//! handled the request at all.
//!
//! The pipeline side is the [`Pipeline`] trait: async functions implement it
//! directly, [`Stack`] composes ordered stages, and [`ServicePipeline`]
//! adapts any tower service such as an `axum::Router`.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use engine::{Stack, StageOutcome, SyntheticRequest, TestEngine};
//! use http::Response;
//!
//! let stack = Stack::new().stage(|request| async move {
//!     if request.uri().path() == "/" {
//!         let response = Response::builder()
//!             .body(Bytes::from("Test String"))
//!             .unwrap();
//!         StageOutcome::Respond(response)
//!     } else {
//!         StageOutcome::Forward(request)
//!     }
//! });
//!
//! let engine = TestEngine::new(stack);
//!
//! let record = engine.dispatch(SyntheticRequest::get("/")).unwrap();
//! assert!(record.handled());
//! assert_eq!(record.body_text(), Some("Test String"));
//!
//! let record = engine.dispatch(SyntheticRequest::get("/index.html")).unwrap();
//! assert!(!record.handled());
//! ```

mod engine;
mod error;
mod pipeline;
mod record;
mod request;
mod service;
mod settings;
mod stack;

pub use encoder::{ContentSource, FormField, Part};
pub use engine::{TestEngine, TestEngineBuilder};
pub use error::{BoxError, EngineError};
pub use pipeline::{Pipeline, PipelineResult};
pub use record::{CallRecord, SyntheticResponse};
pub use request::SyntheticRequest;
pub use service::ServicePipeline;
pub use settings::Settings;
pub use stack::{Stack, StageOutcome};
