use super::health;
use axum::extract::FromRef;
use spechub_store::ConfigStore;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes mounted by every deployment, independent of feature slices.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    Arc<dyn ConfigStore>: FromRef<S>,
{
    OpenApiRouter::new().routes(routes!(health::health_handler))
}
