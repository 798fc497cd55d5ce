mod support;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use spechub_domain::id::ConfigId;
use spechub_kernel::server::ApiState;
use spechub_store::ConfigStore;
use std::sync::Arc;
use support::{BrokenStore, CountingStore, web_db_spec};
use tower::ServiceExt;

fn app(store: Arc<dyn ConfigStore>) -> Router {
    let state = ApiState::builder().store(store).build().expect("state");
    let (router, _api) = spechub_artifacts::router().with_state(state).split_for_parts();
    router
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("infallible");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, content_type, String::from_utf8(body.to_vec()).expect("utf-8 body"))
}

#[tokio::test]
async fn serves_template_as_plain_text() {
    let store = Arc::new(CountingStore::default());
    let id = store.inner.store(web_db_spec());

    let (status, content_type, body) =
        get(app(store), &format!("/v1/artifacts/template/{id}/web/server/app.conf")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(body, "port=8080");
}

#[tokio::test]
async fn malformed_id_is_400_with_empty_body() {
    let store = Arc::new(CountingStore::default());

    let (status, _, body) =
        get(app(store.clone()), "/v1/artifacts/template/not-a-uuid/web/server/app.conf").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
    assert_eq!(store.fetches(), 0);
}

#[tokio::test]
async fn unknown_version_and_unknown_pod_are_both_404() {
    let store = Arc::new(CountingStore::default());
    let id = store.inner.store(web_db_spec());
    let app = app(store);

    let missing = ConfigId::new_v4();
    let (status, _, body) =
        get(app.clone(), &format!("/v1/artifacts/template/{missing}/web/server/app.conf")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, _, body) =
        get(app, &format!("/v1/artifacts/template/{id}/cache/server/app.conf")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty(), "known pod types must not leak: {body}");
}

#[tokio::test]
async fn store_failure_is_500_with_empty_body() {
    let (status, _, body) = get(
        app(Arc::new(BrokenStore)),
        &format!("/v1/artifacts/template/{}/web/server/app.conf", ConfigId::new_v4()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}

#[tokio::test]
async fn percent_encoded_segments_are_decoded() {
    let store = Arc::new(CountingStore::default());
    let id = store.inner.store(web_db_spec());

    let (status, _, body) =
        get(app(store), &format!("/v1/artifacts/template/{id}/web/server/app%2Econf")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "port=8080");
}

#[tokio::test]
async fn non_utf8_segments_get_bare_statuses() {
    let store = Arc::new(CountingStore::default());
    let id = store.inner.store(web_db_spec());
    let app = app(store.clone());

    let (status, _, body) =
        get(app.clone(), "/v1/artifacts/template/%FF/web/server/app.conf").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty(), "route parameters must not leak: {body}");

    for uri in [
        format!("/v1/artifacts/template/{id}/%FF/server/app.conf"),
        format!("/v1/artifacts/template/{id}/web/%FF/app.conf"),
        format!("/v1/artifacts/template/{id}/web/server/%FF"),
    ] {
        let (status, _, body) = get(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body.is_empty(), "route parameters must not leak: {body}");
    }
    assert_eq!(store.fetches(), 0);
}

#[test]
fn route_is_documented_in_openapi() {
    let (_, api) = spechub_artifacts::router::<ApiState>().split_for_parts();
    assert!(
        api.paths
            .paths
            .contains_key("/v1/artifacts/template/{configurationId}/{podType}/{taskName}/{configName}")
    );
}
