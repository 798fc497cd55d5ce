use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use spechub_kernel::domain::id::ConfigId;
use spechub_kernel::domain::spec::ServiceSpec;
use spechub_kernel::server::{ApiState, mark_started};
use spechub_kernel::server::router::system_router;
use spechub_kernel::store::{ConfigStore, MemoryConfigStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[derive(Debug)]
struct OfflineStore;

#[async_trait]
impl ConfigStore for OfflineStore {
    async fn fetch(&self, _id: &ConfigId) -> Result<Arc<ServiceSpec>, StoreError> {
        Err(StoreError::Unavailable { message: "offline".into(), context: None })
    }

    async fn list(&self) -> Result<Vec<ConfigId>, StoreError> {
        Err(StoreError::Unavailable { message: "offline".into(), context: None })
    }
}

async fn get_health(store: Arc<dyn ConfigStore>) -> (StatusCode, Option<String>, Value) {
    let state = ApiState::builder().store(store).build().unwrap();
    let (app, _) = system_router().with_state(state).split_for_parts();
    let app: Router = app;

    let response =
        app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();

    let status = response.status();
    let cache = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, cache, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn reports_up_with_snapshot_count() {
    let store = MemoryConfigStore::new();
    store.store(ServiceSpec::new("a", []));
    store.store(ServiceSpec::new("b", []));

    let (status, cache, body) = get_health(Arc::new(store)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("no-store"));
    assert_eq!(body["status"], "up");
    assert_eq!(body["configurations"], 2);
    assert!(body["uptime"].is_u64());
}

#[tokio::test]
async fn unreachable_store_is_degraded() {
    let (status, _, body) = get_health(Arc::new(OfflineStore)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert!(body.get("configurations").is_none());
}

#[tokio::test]
async fn uptime_counts_from_startup_not_first_request() {
    mark_started();
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (status, _, body) = get_health(Arc::new(MemoryConfigStore::new())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["uptime"].as_u64().unwrap() >= 1);
}
