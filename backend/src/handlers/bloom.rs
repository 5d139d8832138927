//! Bloom status endpoint
//!
//! Always answers 200. Anything that goes wrong inside the pipeline,
//! including a bad request body or a panic, yields the degraded report.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{body::Bytes, extract::State, Json};
use shared::BloomReport;
use tokio::task::{JoinError, JoinHandle};
use tracing::Instrument;
use uuid::Uuid;

use super::parse_location_request;
use crate::error::AppResult;
use crate::services::BloomService;
use crate::AppState;

/// Assess bloom likelihood for a location and date window
pub async fn bloom_status(State(state): State<AppState>, body: Bytes) -> Json<BloomReport> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("bloom_status", %request_id);
    let service = BloomService::new(state.providers.clone(), state.config.observations.radius_km);

    let task = AbortOnDrop(tokio::spawn(run_pipeline(service, body).instrument(span.clone())));

    let report = match task.await {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            span.in_scope(|| tracing::error!("Bloom status request failed: {}", e));
            BloomReport::fallback()
        }
        Err(e) => {
            span.in_scope(|| tracing::error!("Bloom status pipeline aborted: {}", e));
            BloomReport::fallback()
        }
    };

    Json(report)
}

/// Spawned task that is cancelled if the waiting request goes away
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Future for AbortOnDrop<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn run_pipeline(service: BloomService, body: Bytes) -> AppResult<BloomReport> {
    let query = parse_location_request(&body)?.into_query()?;
    service.assess(&query).await
}
