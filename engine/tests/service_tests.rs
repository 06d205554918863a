use axum::{Router, extract::Path, routing::get};
use engine::{ServicePipeline, SyntheticRequest, TestEngine};
use http::StatusCode;

fn demo_app() -> Router {
    Router::new()
        .route("/", get(|| async { "Test String" }))
        .route(
            "/greet/{name}",
            get(|Path(name): Path<String>| async move { format!("hello {name}") }),
        )
}

#[test]
fn test_router_route_served_in_process() {
    shared::init_test_logging();
    let engine = TestEngine::new(ServicePipeline::new(demo_app()));

    let record = engine.dispatch(SyntheticRequest::get("/")).unwrap();

    assert!(record.handled());
    assert_eq!(record.status(), Some(StatusCode::OK));
    assert_eq!(record.body_text(), Some("Test String"));
}

#[test]
fn test_router_path_extraction() {
    let engine = TestEngine::new(ServicePipeline::new(demo_app()));

    let record = engine
        .dispatch(SyntheticRequest::get("/greet/alice"))
        .unwrap();

    assert_eq!(record.status(), Some(StatusCode::OK));
    assert_eq!(record.body_text(), Some("hello alice"));
}

#[test]
fn test_router_fallback_is_a_handled_404() {
    let engine = TestEngine::new(ServicePipeline::new(demo_app()));

    let record = engine
        .dispatch(SyntheticRequest::get("/index.html"))
        .unwrap();

    // A tower service always responds, so the unmatched path arrives as a
    // handled 404 rather than the unhandled outcome.
    assert!(record.handled());
    assert_eq!(record.status(), Some(StatusCode::NOT_FOUND));
}

#[test]
fn test_router_sees_request_headers() {
    let app = Router::new().route(
        "/echo-agent",
        get(|headers: http::HeaderMap| async move {
            headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("none")
                .to_string()
        }),
    );
    let engine = TestEngine::new(ServicePipeline::new(app));

    let record = engine
        .dispatch(SyntheticRequest::get("/echo-agent").header("user-agent", "sim-engine"))
        .unwrap();

    assert_eq!(record.body_text(), Some("sim-engine"));
}
