//! Concurrent request pressure on the forecast service
//!
//! - 50 dashboard clients polling forecasts and status at once
//! - Mixed what-if and policy traffic against a loaded model
//!
//! All requests share one read-only oracle; nothing should serialise them.

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use serde_json::json;
use tokio::task::JoinSet;
use tower::ServiceExt;

use crate::common::{app, get, post_json};
use grid_oversight::forecast::WeatherReading;
use grid_oversight::ml::{LinearLoadModel, ModelOracle};

const CLIENTS: usize = 50;
const REQUESTS_PER_CLIENT: usize = 10;

fn reading() -> Option<WeatherReading> {
    Some(WeatherReading {
        temp: 33.0,
        humidity: 70.0,
    })
}

/// Test: Dashboard polling under concurrent load
///
/// Every request must succeed and the slowest must finish well under the
/// router's request timeout.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // slow
async fn test_dashboard_polling_latency() {
    let router = app(ModelOracle::unavailable(), reading());
    let mut clients = JoinSet::new();

    for i in 0..CLIENTS {
        let router = router.clone();
        clients.spawn(async move {
            let mut slowest = Duration::ZERO;
            for n in 0..REQUESTS_PER_CLIENT {
                let uri = match (i + n) % 4 {
                    0 => "/api/forecast?range=next-hour",
                    1 => "/api/forecast?range=next-month&offset=5",
                    2 => "/api/public/status",
                    _ => "/api/forecast/yearly",
                };
                let start = Instant::now();
                let resp = router.clone().oneshot(get(uri)).await.unwrap();
                slowest = slowest.max(start.elapsed());
                assert_eq!(resp.status(), StatusCode::OK, "{uri}");
            }
            slowest
        });
    }

    let mut max_latency = Duration::ZERO;
    while let Some(result) = clients.join_next().await {
        max_latency = max_latency.max(result.expect("client task panicked"));
    }

    println!("Max request latency under load: {max_latency:?}");
    assert!(
        max_latency < Duration::from_secs(2),
        "request latency exceeded 2s: {max_latency:?}"
    );
}

/// Test: What-if and policy requests against a shared model
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // slow
async fn test_concurrent_model_inference() {
    let oracle = ModelOracle::from_model(Box::new(LinearLoadModel::passthrough()));
    let router = app(oracle, reading());
    let mut tasks = JoinSet::new();

    for i in 0..CLIENTS {
        let router = router.clone();
        tasks.spawn(async move {
            let req = if i % 2 == 0 {
                post_json(
                    "/api/forecast",
                    json!({
                        "range": "next-week",
                        "offset": (i % 21) as u32,
                        "params": { "temp": 20 + (i % 20), "humidity": 60, "solar": 400 }
                    }),
                )
            } else {
                post_json(
                    "/predict",
                    json!({
                        "target_year": 2026 + (i % 5) as i32,
                        "iex_factor": 1.2,
                        "city_data": { "Mumbai": {}, "Pune": { "temp": 35 } }
                    }),
                )
            };
            router.oneshot(req).await.unwrap().status()
        });
    }

    while let Some(result) = tasks.join_next().await {
        assert_eq!(result.expect("task should not panic"), StatusCode::OK);
    }
}
