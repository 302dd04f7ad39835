//! Application factory tests: CORS, prefix mounting, schema document.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use scheduler_api::settings::{ApiMode, SettingsError};
use scheduler_api::{create_app_with_scheduler, Application};

mod common;

use common::{body_json, cors_settings, get, send, test_settings, FakeScheduler};

fn build(settings: scheduler_api::Settings) -> Application {
    create_app_with_scheduler(settings, FakeScheduler::new()).unwrap()
}

fn with_origin(uri: &str, origin: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_listed_origin_is_echoed() {
    let app = build(cors_settings(&["http://localhost:3000", "https://app.example.com"]));

    for origin in ["http://localhost:3000", "https://app.example.com"] {
        let res = send(app.router(), with_origin("/api/v1/health", origin)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            origin,
            "origin {origin} should be allowed"
        );
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }
}

#[tokio::test]
async fn test_unlisted_origin_gets_no_allow_origin() {
    let app = build(cors_settings(&["http://localhost:3000"]));

    let res = send(app.router(), with_origin("/api/v1/health", "https://evil.test")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_configured_origin_is_coerced() {
    let app = build(cors_settings(&["http://localhost:3000/"]));
    assert_eq!(
        app.settings().backend_cors_origins,
        vec!["http://localhost:3000"]
    );

    let res = send(app.router(), with_origin("/api/v1/health", "http://localhost:3000")).await;
    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_preflight_allows_any_method_and_header() {
    let app = build(cors_settings(&["http://localhost:3000"]));

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/jobs")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom-header")
        .body(Body::empty())
        .unwrap();
    let res = send(app.router(), req).await;

    assert!(res.status().is_success());
    let headers = res.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "PATCH");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "x-custom-header"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_no_cors_without_origins() {
    let app = build(test_settings());
    assert!(!app.middleware().contains(&"cors"));

    let res = send(app.router(), with_origin("/api/v1/health", "http://localhost:3000")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_openapi_served_under_prefix() {
    for prefix in ["/api/v1", "/internal/v2"] {
        let mut settings = test_settings();
        settings.api_v1_str = prefix.to_string();
        let app = build(settings);
        assert_eq!(app.settings().openapi_url(), format!("{prefix}/openapi.json"));

        let res = get(app.router(), &format!("{prefix}/openapi.json")).await;
        assert_eq!(res.status(), StatusCode::OK);

        let doc = body_json(res).await;
        assert_eq!(doc["info"]["title"], "Scheduler API");
        assert_eq!(doc["info"]["version"], "1.0.5");
        assert!(doc["paths"].get(format!("{prefix}/health")).is_some());

        let res = get(app.router(), "/openapi.json").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_routes_only_reachable_under_prefix() {
    let app = build(test_settings());

    for path in ["/health", "/jobs", "/debug/settings"] {
        let res = get(app.router(), &format!("/api/v1{path}")).await;
        assert_eq!(res.status(), StatusCode::OK, "{path} under prefix");

        let res = get(app.router(), path).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path} without prefix");
    }
}

#[tokio::test]
async fn test_debug_route_hidden_in_production() {
    let mut settings = test_settings();
    settings.api_mode = ApiMode::Production;
    let app = build(settings);

    let res = get(app.router(), "/api/v1/debug/settings").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_handlers_read_attached_settings() {
    let app = build(test_settings());
    assert_eq!(app.settings().project_name, "Scheduler API");

    let health = body_json(get(app.router(), "/api/v1/health").await).await;
    assert_eq!(health["project"], "Scheduler API");
    assert_eq!(health["mode"], "debug");

    let settings = body_json(get(app.router(), "/api/v1/debug/settings").await).await;
    assert_eq!(settings["api_v1_str"], "/api/v1");

    let jobs = body_json(get(app.router(), "/api/v1/jobs").await).await;
    assert_eq!(jobs["closed"], false);
    assert_eq!(jobs["jobs"][0]["name"], "fake");
}

#[tokio::test]
async fn test_request_id_assigned_and_propagated() {
    let app = build(test_settings());

    let res = get(app.router(), "/api/v1/health").await;
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let req = Request::get("/api/v1/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let res = send(app.router(), req).await;
    assert_eq!(res.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn test_applications_are_independent() {
    let first = build(cors_settings(&["http://localhost:3000"]));
    let mut second_settings = test_settings();
    second_settings.api_v1_str = "/api/v9".into();
    let second = build(second_settings);

    assert!(first.middleware().contains(&"cors"));
    assert!(!second.middleware().contains(&"cors"));
    assert_eq!(get(first.router(), "/api/v9/health").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(second.router(), "/api/v9/health").await.status(), StatusCode::OK);
}

#[test]
fn test_invalid_settings_yield_no_application() {
    for prefix in ["api", "/:version", "/api/:v1", "/api/*rest"] {
        let mut settings = test_settings();
        settings.api_v1_str = prefix.into();

        let result = create_app_with_scheduler(settings, FakeScheduler::new());
        assert!(
            matches!(result, Err(SettingsError::Validation(_))),
            "prefix {prefix} should be rejected"
        );
    }
}
