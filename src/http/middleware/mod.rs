//! Middleware selection.
//!
//! The stack is decided once, from settings, as a list of
//! (condition, factory) rules. Nothing branches on configuration per request.

pub mod cors;

pub use cors::CorsPolicy;

use std::time::Duration;

use axum::Router;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::http::request::MakeRequestUuidV4;
use crate::settings::Settings;

/// One layer of the application stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Middleware {
    Timeout(Duration),
    RequestId,
    Trace,
    Cors(CorsPolicy),
}

impl Middleware {
    pub fn name(&self) -> &'static str {
        match self {
            Middleware::Timeout(_) => "timeout",
            Middleware::RequestId => "request-id",
            Middleware::Trace => "trace",
            Middleware::Cors(_) => "cors",
        }
    }
}

type Rule = (bool, fn(&Settings) -> Middleware);

/// Middleware to install, innermost first.
pub fn plan(settings: &Settings) -> Vec<Middleware> {
    let rules: [Rule; 4] = [
        (true, |s| Middleware::Timeout(Duration::from_secs(s.request_timeout_secs))),
        (true, |_| Middleware::RequestId),
        (true, |_| Middleware::Trace),
        (settings.cors_enabled(), |s| {
            Middleware::Cors(CorsPolicy::new(s.backend_cors_origins.clone()))
        }),
    ];

    rules
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, build)| build(settings))
        .collect()
}

/// Wrap `router` in one more layer.
#[allow(deprecated)]
pub fn apply(router: Router, middleware: &Middleware) -> Router {
    match middleware {
        Middleware::Timeout(limit) => router.layer(TimeoutLayer::new(*limit)),
        Middleware::RequestId => router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4)),
        Middleware::Trace => router.layer(TraceLayer::new_for_http()),
        Middleware::Cors(policy) => router.layer(policy.layer()),
    }
}
