//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use scheduler_api::scheduler::{JobInfo, JobScheduler, SchedulerError};
use scheduler_api::Settings;
use tower::ServiceExt;

/// Scheduler double that counts close invocations.
#[derive(Default)]
pub struct FakeScheduler {
    closes: AtomicUsize,
    closed: AtomicBool,
    fail_close: bool,
    close_delay: Option<Duration>,
}

#[allow(dead_code)]
impl FakeScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_close: true,
            ..Self::default()
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            close_delay: Some(delay),
            ..Self::default()
        })
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobScheduler for FakeScheduler {
    fn jobs(&self) -> Vec<JobInfo> {
        vec![JobInfo {
            name: "fake".into(),
            interval_ms: 1000,
            runs: 0,
        }]
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    async fn close(&self) -> Result<(), SchedulerError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.close_delay {
            tokio::time::sleep(delay).await;
        }
        self.closed.store(true, Ordering::SeqCst);
        if self.fail_close {
            return Err(SchedulerError::JobPanicked { count: 1 });
        }
        Ok(())
    }
}

/// Settings for tests: no CORS, debug mode.
#[allow(dead_code)]
pub fn test_settings() -> Settings {
    Settings::new("Scheduler API")
}

#[allow(dead_code)]
pub fn cors_settings(origins: &[&str]) -> Settings {
    let mut settings = test_settings();
    settings.backend_cors_origins = origins.iter().map(|o| o.to_string()).collect();
    settings
}

/// Send one request through the router without a socket.
#[allow(dead_code)]
pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn get(router: Router, uri: &str) -> Response<Body> {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
