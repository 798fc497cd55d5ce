use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::{Json, response::IntoResponse};
use serde::Serialize;
use spechub_domain::constants::SYSTEM_TAG;
use spechub_store::ConfigStore;
use std::sync::{Arc, LazyLock};
use std::time::Instant;
use tracing::warn;
use utoipa::ToSchema;

static STARTED_AT: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Starts the uptime clock reported by `/health`. Later calls are no-ops.
pub fn mark_started() {
    LazyLock::force(&STARTED_AT);
}

/// Liveness of the process and reachability of the configuration store.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct HealthReport {
    /// `up`, or `degraded` when the store cannot be enumerated
    status: &'static str,
    version: &'static str,
    /// Seconds since startup
    uptime: u64,
    /// Number of stored configuration snapshots, absent when degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    configurations: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Service and store are healthy", body = HealthReport),
        (status = SERVICE_UNAVAILABLE, description = "Store cannot be enumerated", body = HealthReport),
    ),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(
    State(store): State<Arc<dyn ConfigStore>>,
) -> impl IntoResponse {
    let (status, configurations) = match store.list().await {
        Ok(ids) => (StatusCode::OK, Some(ids.len())),
        Err(e) => {
            warn!(error = %e, "Health check could not enumerate the configuration store");
            (StatusCode::SERVICE_UNAVAILABLE, None)
        },
    };

    let report = HealthReport {
        status: if status.is_success() { "up" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: STARTED_AT.elapsed().as_secs(),
        configurations,
    };

    (status, [(header::CACHE_CONTROL, "no-store")], Json(report))
}
