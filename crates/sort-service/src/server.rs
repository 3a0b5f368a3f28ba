//! Router, handlers and server lifecycle

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use slow_sort::{Cancellation, SortApi, SortMetrics, SortService};
use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// Time a sort needs to notice its cancellation and answer
const DRAIN_AFTER_CANCEL: Duration = Duration::from_secs(1);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sorter: Arc<dyn SortApi>,
    pub metrics: Arc<SortMetrics>,
    pub request_timeout: Duration,
    /// Parent of every request's signal; fired when shutdown grace runs out
    pub in_flight: Cancellation,
}

impl AppState {
    /// State backed by a production `SortService`
    pub fn from_config(config: &ServiceConfig) -> Self {
        let service = SortService::new(config.sort_method);
        Self {
            metrics: service.metrics(),
            sorter: Arc::new(service),
            request_timeout: config.request_timeout,
            in_flight: Cancellation::new(),
        }
    }
}

/// Fires the request's cancellation when the handler future is dropped
struct RequestScope(Cancellation);

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_sort))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn handle_sort(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<i64>>, ServiceError> {
    let numbers: Vec<i64> = serde_json::from_slice(&body)?;

    let scope = RequestScope(
        state
            .sorter
            .request_cancellation(&state.in_flight, state.request_timeout),
    );
    let outcome = state.sorter.sort(numbers, &scope.0).await?;
    Ok(Json(outcome.values))
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "sortasaservice",
        "version": env!("CARGO_PKG_VERSION"),
        "sort_method": state.sorter.default_method(),
    }))
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// HTTP server with graceful shutdown
pub struct SortServer {
    config: ServiceConfig,
    state: AppState,
    shutdown: Cancellation,
}

impl SortServer {
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::from_config(&config);
        Self {
            config,
            state,
            shutdown: Cancellation::new(),
        }
    }

    /// Signal that stops the server; cancelling it starts the graceful
    /// shutdown
    pub fn shutdown_handle(&self) -> Cancellation {
        self.shutdown.clone()
    }

    /// Bind and serve until the shutdown handle fires
    ///
    /// Once shutdown starts, in-flight requests get `shutdown_grace` to
    /// finish. After that their sorts are cancelled, and the server task is
    /// abandoned if it still has not finished.
    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            config,
            state,
            shutdown,
        } = self;

        let addr = config.listen_addr();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, method = %config.sort_method, "Starting HTTP server");

        let in_flight = state.in_flight.clone();
        let router = build_router(state);
        let stop = shutdown.clone();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    stop.cancelled().await;
                })
                .await
        });

        tokio::select! {
            result = &mut server => return flatten(result),
            _ = shutdown.cancelled() => info!("Received shutdown signal"),
        }

        if let Ok(result) = tokio::time::timeout(config.shutdown_grace, &mut server).await {
            flatten(result)?;
            info!("closed http server");
            return Ok(());
        }

        warn!(grace = ?config.shutdown_grace, "In-flight requests outlived shutdown grace, cancelling");
        in_flight.cancel();
        match tokio::time::timeout(DRAIN_AFTER_CANCEL, &mut server).await {
            Ok(result) => flatten(result)?,
            Err(_) => server.abort(),
        }

        info!("closed http server");
        Ok(())
    }
}

fn flatten(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> anyhow::Result<()> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!(error = %e, "HTTP server error");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
