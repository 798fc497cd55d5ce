use axum::Router;
use axum::http::StatusCode;
use spechub::domain::constants::{ARTIFACTS_TAG, SYSTEM_TAG};
use spechub::kernel::server::ApiState;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

/// Mount point of the interactive API reference.
pub(crate) const API_REFERENCE_PATH: &str = "/api";

#[derive(OpenApi)]
#[openapi(
    info(title = "SpecHub", description = "Config templates of versioned service specifications"),
    tags(
        (name = SYSTEM_TAG, description = "Liveness and store reachability"),
        (name = ARTIFACTS_TAG, description = "Raw config templates for bootstrapping workers"),
    )
)]
struct ApiDoc;

/// Builds the full application: documented routes, request tracing and the API reference.
pub(crate) fn init(state: ApiState) -> Router {
    let (routes, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(spechub::server::router::api_router())
        .with_state(state)
        .split_for_parts();

    routes
        .merge(Scalar::with_url(API_REFERENCE_PATH, openapi))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
